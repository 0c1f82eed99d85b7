use crate::text::expand_token;
use crate::types::Word;

/// Tail lengths tried in order; longer exact tails are less likely to be spurious.
const TAIL_LENGTHS: [usize; 3] = [3, 2, 1];

/// How a phrase end was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Matched the last `n` phrase tokens in the word stream.
    Tail(usize),
    /// No tail matched; cursor advanced by the phrase length.
    Estimated,
    /// No words left; the segment end was used.
    SegmentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub end_sec: f64,
    pub next_word_index: usize,
    pub source: MatchSource,
}

#[derive(Debug, Clone)]
struct StreamKey {
    key: String,
    word_idx: usize,
}

/// Locates phrase end timestamps by anchoring on the phrase tail.
///
/// The word stream is normalized and hyphen-expanded once; every key remembers
/// the word it came from so matches map back to word indices.
pub struct TimestampMatcher<'w> {
    words: &'w [Word],
    stream: Vec<StreamKey>,
    /// First stream position belonging to each word (or `stream.len()`).
    first_key: Vec<usize>,
}

impl<'w> TimestampMatcher<'w> {
    pub fn new(words: &'w [Word]) -> Self {
        let mut stream = Vec::with_capacity(words.len());
        let mut first_key = Vec::with_capacity(words.len() + 1);
        for (word_idx, word) in words.iter().enumerate() {
            first_key.push(stream.len());
            stream.extend(expand_token(&word.text).map(|key| StreamKey { key, word_idx }));
        }
        first_key.push(stream.len());
        Self {
            words,
            stream,
            first_key,
        }
    }

    pub fn words(&self) -> &'w [Word] {
        self.words
    }

    /// Finds the end of `phrase_words` at or after `start_word_index`.
    ///
    /// Returns the matched run's last word end time and the cursor just past it.
    pub fn find_end_timestamp<S: AsRef<str>>(
        &self,
        phrase_words: &[S],
        start_word_index: usize,
    ) -> Option<(f64, usize)> {
        self.find_tail(phrase_words, start_word_index)
            .map(|(end_sec, next, _)| (end_sec, next))
    }

    /// Tail match with the linear-estimate fallback; always yields a timestamp.
    pub fn resolve<S: AsRef<str>>(
        &self,
        phrase_words: &[S],
        start_word_index: usize,
        segment_end_sec: f64,
    ) -> MatchOutcome {
        match self.find_tail(phrase_words, start_word_index) {
            Some((end_sec, next_word_index, tail_len)) => MatchOutcome {
                end_sec,
                next_word_index,
                source: MatchSource::Tail(tail_len),
            },
            None => self.estimate(phrase_words.len(), start_word_index, segment_end_sec),
        }
    }

    fn find_tail<S: AsRef<str>>(
        &self,
        phrase_words: &[S],
        start_word_index: usize,
    ) -> Option<(f64, usize, usize)> {
        if start_word_index >= self.words.len() {
            return None;
        }
        let scan_from = self.first_key[start_word_index];
        TAIL_LENGTHS.into_iter().find_map(|tail_len| {
            self.match_tail(phrase_words, tail_len, scan_from)
                .map(|(end_sec, next)| (end_sec, next, tail_len))
        })
    }

    fn estimate(&self, phrase_len: usize, start: usize, segment_end_sec: f64) -> MatchOutcome {
        if start >= self.words.len() {
            return MatchOutcome {
                end_sec: segment_end_sec,
                next_word_index: start.min(self.words.len()),
                source: MatchSource::SegmentEnd,
            };
        }
        let next_word_index = (start + phrase_len).min(self.words.len());
        let estimated = next_word_index.saturating_sub(1).max(start);
        MatchOutcome {
            end_sec: self.words[estimated].end_sec,
            next_word_index: next_word_index.max(start),
            source: MatchSource::Estimated,
        }
    }

    fn match_tail<S: AsRef<str>>(
        &self,
        phrase_words: &[S],
        tail_len: usize,
        scan_from: usize,
    ) -> Option<(f64, usize)> {
        if tail_len == 0 || phrase_words.len() < tail_len {
            return None;
        }
        let tail: Vec<String> = phrase_words[phrase_words.len() - tail_len..]
            .iter()
            .flat_map(|token| expand_token(token.as_ref()).collect::<Vec<_>>())
            .collect();
        if tail.is_empty() || tail.len() > self.stream.len() {
            return None;
        }

        let last_start = self.stream.len() - tail.len();
        (scan_from..=last_start)
            .find(|&pos| {
                tail.iter()
                    .zip(&self.stream[pos..pos + tail.len()])
                    .all(|(expected, actual)| *expected == actual.key)
            })
            .map(|pos| {
                let word_idx = self.stream[pos + tail.len() - 1].word_idx;
                (self.words[word_idx].end_sec, word_idx + 1)
            })
    }
}
