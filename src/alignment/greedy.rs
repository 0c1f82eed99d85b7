use crate::types::Word;

use super::{keys_match, normalized_keys, AlignResult, PhraseAligner};

const DEFAULT_LOOKAHEAD: usize = 5;

/// Single left-to-right pass accepting the first exact match within a
/// bounded window ahead of the word cursor.
///
/// Linear time, but it misses matches outside the window and can lock onto an
/// early spurious match.
#[derive(Debug, Clone, Copy)]
pub struct GreedyAligner {
    pub lookahead: usize,
}

impl Default for GreedyAligner {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

impl PhraseAligner for GreedyAligner {
    fn align(&self, phrases: &[&str], words: &[Word]) -> Vec<AlignResult> {
        let (phrase_keys, word_keys) = normalized_keys(phrases, words);
        let mut results = Vec::with_capacity(phrases.len() + words.len());
        let mut cursor = 0;

        for (phrase_idx, phrase) in phrase_keys.iter().enumerate() {
            let window_end = (cursor + self.lookahead).min(word_keys.len());
            let found = (cursor..window_end).find(|&j| keys_match(phrase, &word_keys[j]));
            match found {
                Some(word_idx) => {
                    results.extend((cursor..word_idx).map(AlignResult::word_only));
                    results.push(AlignResult::matched(phrase_idx, word_idx));
                    cursor = word_idx + 1;
                }
                None => results.push(AlignResult::phrase_only(phrase_idx)),
            }
        }
        results.extend((cursor..word_keys.len()).map(AlignResult::word_only));
        results
    }
}
