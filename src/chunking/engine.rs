use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alignment::{timestamps, AlignOp, AlignerKind, PhraseAligner};
use crate::error::Result;
use crate::text::tokenize;
use crate::types::{seconds_to_ms, Chunk, ChunkSettings, Segment, Transcript, Word};

use super::dedup::remove_duplicates;
use super::matcher::{MatchSource, TimestampMatcher};
use super::merger::merge;
use super::splitter::split_phrases;

const WINDOW_EPS: f64 = 1e-9;

/// How phrase timestamps are resolved against the word stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimingStrategy {
    /// Tail-anchored matching with a transcript-wide word cursor.
    #[default]
    TailAnchored,
    /// Per-segment alignment followed by timestamp assignment.
    Aligned(AlignerKind),
}

impl Display for TimingStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingStrategy::TailAnchored => f.write_str("tail-anchored"),
            TimingStrategy::Aligned(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TimingStrategy {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("tail-anchored") {
            return Ok(TimingStrategy::TailAnchored);
        }
        raw.parse::<AlignerKind>()
            .map(TimingStrategy::Aligned)
            .map_err(|_| {
                format!(
                    "unknown timing strategy '{raw}' \
                     (expected tail-anchored, edit-distance, greedy or two-pointer)"
                )
            })
    }
}

impl TryFrom<String> for TimingStrategy {
    type Error = String;

    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<TimingStrategy> for String {
    fn from(strategy: TimingStrategy) -> Self {
        strategy.to_string()
    }
}

/// Turns a transcript into merged, reindexed learning chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkingEngine {
    settings: ChunkSettings,
    strategy: TimingStrategy,
}

impl ChunkingEngine {
    pub fn new(settings: ChunkSettings) -> Self {
        Self {
            settings,
            strategy: TimingStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: TimingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn settings(&self) -> ChunkSettings {
        self.settings
    }

    pub fn strategy(&self) -> TimingStrategy {
        self.strategy
    }

    /// Validates settings and transcript timestamps before processing.
    pub fn try_process(&self, transcript: &Transcript) -> Result<Vec<Chunk>> {
        self.settings.validate()?;
        transcript.validate()?;
        Ok(self.process(transcript))
    }

    /// Runs the full pipeline. Never fails; missing word evidence degrades to
    /// estimated timestamps.
    pub fn process(&self, transcript: &Transcript) -> Vec<Chunk> {
        if transcript.segments.is_empty() {
            debug!("transcript has no segments; nothing to chunk");
            return Vec::new();
        }

        let words = remove_duplicates(&transcript.words);
        let raw = match self.strategy {
            TimingStrategy::TailAnchored => {
                self.raw_chunks_tail_anchored(&transcript.segments, &words)
            }
            TimingStrategy::Aligned(kind) => {
                self.raw_chunks_aligned(&transcript.segments, &words, kind)
            }
        };
        let chunks = merge(&raw, self.settings.min_chunk_ms);

        info!(
            strategy = %self.strategy,
            segments = transcript.segments.len(),
            words = transcript.words.len(),
            deduplicated_words = words.len(),
            raw_chunks = raw.len(),
            chunks = chunks.len(),
            "transcript chunked"
        );
        chunks
    }

    fn raw_chunks_tail_anchored(&self, segments: &[Segment], words: &[Word]) -> Vec<Chunk> {
        let matcher = TimestampMatcher::new(words);
        let mut raw = Vec::new();
        let mut cursor = 0;

        for (segment_idx, segment) in segments.iter().enumerate() {
            for phrase in split_phrases(&segment.text, self.settings.sentence_only) {
                let tokens = tokenize(&phrase);
                let start_sec = words
                    .get(cursor)
                    .map_or(segment.start_sec, |word| word.start_sec);
                let outcome = matcher.resolve(&tokens, cursor, segment.end_sec);
                if !matches!(outcome.source, MatchSource::Tail(_)) {
                    debug!(
                        segment = segment_idx,
                        phrase_index = raw.len(),
                        cursor,
                        next_cursor = outcome.next_word_index,
                        source = ?outcome.source,
                        "no tail match for phrase; using estimated end"
                    );
                }
                cursor = outcome.next_word_index;
                raw.push(timed_chunk(raw.len(), start_sec, outcome.end_sec, phrase));
            }
        }
        raw
    }

    fn raw_chunks_aligned(
        &self,
        segments: &[Segment],
        words: &[Word],
        kind: AlignerKind,
    ) -> Vec<Chunk> {
        let mut raw = Vec::new();
        for (segment_idx, segment) in segments.iter().enumerate() {
            let phrases = split_phrases(&segment.text, self.settings.sentence_only);
            let token_lists: Vec<Vec<&str>> = phrases.iter().map(|phrase| tokenize(phrase)).collect();
            let tokens: Vec<&str> = token_lists.iter().flatten().copied().collect();
            let window = segment_words(words, segment);

            let results = kind.align(&tokens, window);
            if !results.iter().any(|result| result.op == AlignOp::Match) {
                debug!(
                    segment = segment_idx,
                    window_words = window.len(),
                    aligner = %kind,
                    "no aligned words in segment; spreading phrases over segment span"
                );
                spread_over_segment(&mut raw, segment, &phrases, &token_lists);
                continue;
            }

            let timed = timestamps::assign(&tokens, window, &results);
            let mut offset = 0;
            for (phrase, phrase_tokens) in phrases.iter().zip(&token_lists) {
                let span = &timed[offset..offset + phrase_tokens.len()];
                offset += phrase_tokens.len();
                let (Some(first), Some(last)) = (span.first(), span.last()) else {
                    continue;
                };
                raw.push(Chunk::new(
                    raw.len(),
                    first.start_ms,
                    last.end_ms.max(first.start_ms),
                    phrase.clone(),
                ));
            }
        }
        raw
    }
}

/// Words starting inside `[segment.start, segment.end)`. `words` must be
/// sorted by start.
fn segment_words<'w>(words: &'w [Word], segment: &Segment) -> &'w [Word] {
    let lo = words.partition_point(|word| word.start_sec < segment.start_sec - WINDOW_EPS);
    let hi = words.partition_point(|word| word.start_sec < segment.end_sec);
    &words[lo..hi.max(lo)]
}

/// Splits the segment span across phrases in proportion to their token counts.
fn spread_over_segment(
    raw: &mut Vec<Chunk>,
    segment: &Segment,
    phrases: &[String],
    token_lists: &[Vec<&str>],
) {
    let total: usize = token_lists.iter().map(Vec::len).sum();
    if total == 0 {
        return;
    }
    let span = (segment.end_sec - segment.start_sec).max(0.0);
    let mut consumed = 0;
    for (phrase, phrase_tokens) in phrases.iter().zip(token_lists) {
        let start_sec = segment.start_sec + span * consumed as f64 / total as f64;
        consumed += phrase_tokens.len();
        let end_sec = segment.start_sec + span * consumed as f64 / total as f64;
        raw.push(timed_chunk(raw.len(), start_sec, end_sec, phrase.clone()));
    }
}

fn timed_chunk(order_index: usize, start_sec: f64, end_sec: f64, text: String) -> Chunk {
    let start_ms = seconds_to_ms(start_sec);
    let end_ms = seconds_to_ms(end_sec).max(start_ms);
    Chunk::new(order_index, start_ms, end_ms, text)
}

/// Convenience entry point mirroring the engine contract.
pub fn chunk_transcript(
    transcript: &Transcript,
    sentence_only: bool,
    min_chunk_ms: i64,
) -> Vec<Chunk> {
    ChunkingEngine::new(ChunkSettings {
        sentence_only,
        min_chunk_ms,
    })
    .process(transcript)
}
