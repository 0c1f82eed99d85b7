use crate::types::Word;

use super::fuzzy::{fuzzy_match, is_filler};
use super::{keys_match, normalized_keys, AlignResult, PhraseAligner};

const DEFAULT_LOOKAHEAD: usize = 10;

/// Dual-cursor alignment tolerant of disfluencies.
///
/// At each step, in order: exact match, fuzzy match (edit distance 1), skip a
/// filler word, then search the lookahead window for an exact and then
/// a fuzzy match. A phrase that finds nothing is left unmatched.
#[derive(Debug, Clone, Copy)]
pub struct TwoPointerAligner {
    pub lookahead: usize,
}

impl Default for TwoPointerAligner {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

impl PhraseAligner for TwoPointerAligner {
    fn align(&self, phrases: &[&str], words: &[Word]) -> Vec<AlignResult> {
        let (phrase_keys, word_keys) = normalized_keys(phrases, words);
        let mut results = Vec::with_capacity(phrases.len() + words.len());
        let (mut i, mut j) = (0, 0);

        while i < phrase_keys.len() {
            if j >= word_keys.len() {
                results.push(AlignResult::phrase_only(i));
                i += 1;
                continue;
            }
            let phrase = &phrase_keys[i];
            let word = &word_keys[j];

            if keys_match(phrase, word) || fuzzy_match(phrase, word) {
                results.push(AlignResult::matched(i, j));
                i += 1;
                j += 1;
            } else if is_filler(&words[j].text) {
                results.push(AlignResult::word_only(j));
                j += 1;
            } else if let Some(found) = self.look_ahead(phrase, &word_keys, j) {
                results.extend((j..found).map(AlignResult::word_only));
                results.push(AlignResult::matched(i, found));
                i += 1;
                j = found + 1;
            } else {
                results.push(AlignResult::phrase_only(i));
                i += 1;
            }
        }
        results.extend((j..word_keys.len()).map(AlignResult::word_only));
        results
    }
}

impl TwoPointerAligner {
    fn look_ahead(&self, phrase: &str, word_keys: &[String], cursor: usize) -> Option<usize> {
        let window = (cursor + 1)..(cursor + 1 + self.lookahead).min(word_keys.len());
        window
            .clone()
            .find(|&k| keys_match(phrase, &word_keys[k]))
            .or_else(|| window.into_iter().find(|&k| fuzzy_match(phrase, &word_keys[k])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(idx, text)| Word::new(*text, idx as f64, idx as f64 + 0.5))
            .collect()
    }

    #[test]
    fn skips_filler_words() {
        let results = TwoPointerAligner::default().align(&["Hello", "world"], &words(&["Hello", "um", "world"]));
        assert_eq!(
            results,
            vec![
                AlignResult::matched(0, 0),
                AlignResult::word_only(1),
                AlignResult::matched(1, 2),
            ]
        );
    }

    #[test]
    fn fuzzy_matches_near_misses() {
        let results = TwoPointerAligner::default().align(&["colour", "me"], &words(&["color", "me"]));
        assert_eq!(
            results,
            vec![AlignResult::matched(0, 0), AlignResult::matched(1, 1)]
        );
    }

    #[test]
    fn short_tokens_never_fuzzy_match() {
        let results = TwoPointerAligner::default().align(&["a"], &words(&["i"]));
        assert_eq!(
            results,
            vec![AlignResult::phrase_only(0), AlignResult::word_only(0)]
        );
    }

    #[test]
    fn lookahead_prefers_exact_over_fuzzy() {
        let stream = words(&["noise", "cart", "cat"]);
        let results = TwoPointerAligner::default().align(&["cat"], &stream);
        assert_eq!(
            results,
            vec![
                AlignResult::word_only(0),
                AlignResult::word_only(1),
                AlignResult::matched(0, 2),
            ]
        );
    }

    #[test]
    fn filler_phrase_still_matches_exactly() {
        let results = TwoPointerAligner::default().align(&["like", "this"], &words(&["like", "this"]));
        assert_eq!(
            results,
            vec![AlignResult::matched(0, 0), AlignResult::matched(1, 1)]
        );
    }

    #[test]
    fn near_miss_of_filler_matches_before_skip() {
        let stream = vec![Word::new("well", 0.0, 0.4), Word::new("done", 0.4, 0.8)];
        let results = TwoPointerAligner::default().align(&["wall", "done"], &stream);
        assert_eq!(
            results,
            vec![AlignResult::matched(0, 0), AlignResult::matched(1, 1)]
        );
    }

    #[test]
    fn lookahead_failure_leaves_phrase_unmatched() {
        let results = TwoPointerAligner::default().align(&["missing", "here"], &words(&["nothing", "here"]));
        assert_eq!(
            results,
            vec![
                AlignResult::phrase_only(0),
                AlignResult::word_only(0),
                AlignResult::matched(1, 1),
            ]
        );
    }
}
