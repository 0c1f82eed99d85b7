use crate::types::Word;

use super::{keys_match, normalized_keys, AlignResult, PhraseAligner};

const MATCH_COST: u32 = 0;
const SUBSTITUTION_COST: u32 = 2;
const GAP_COST: u32 = 1;

/// Optimal sequence alignment over an `(n + 1) x (m + 1)` cost table.
///
/// Substitution costs more than a gap so the path prefers skipping a token
/// over pairing two different ones. O(n·m) time and memory: call it per
/// segment rather than per transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceAligner;

impl PhraseAligner for EditDistanceAligner {
    fn align(&self, phrases: &[&str], words: &[Word]) -> Vec<AlignResult> {
        let (phrase_keys, word_keys) = normalized_keys(phrases, words);
        let dp = fill_table(&phrase_keys, &word_keys);
        backtrack(&dp, &phrase_keys, &word_keys)
    }
}

fn fill_table(phrases: &[String], words: &[String]) -> Vec<Vec<u32>> {
    let n = phrases.len();
    let m = words.len();
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i as u32 * GAP_COST;
    }
    for j in 0..=m {
        dp[0][j] = j as u32 * GAP_COST;
    }
    for i in 1..=n {
        for j in 1..=m {
            let diagonal = dp[i - 1][j - 1] + pair_cost(&phrases[i - 1], &words[j - 1]);
            let phrase_gap = dp[i - 1][j] + GAP_COST;
            let word_gap = dp[i][j - 1] + GAP_COST;
            dp[i][j] = diagonal.min(phrase_gap).min(word_gap);
        }
    }
    dp
}

fn pair_cost(phrase: &str, word: &str) -> u32 {
    if keys_match(phrase, word) {
        MATCH_COST
    } else {
        SUBSTITUTION_COST
    }
}

/// Walks back from `dp[n][m]` without recursion, then reverses the path.
///
/// Only equal pairs are reported as matches; a substitution always ties with
/// a phrase gap followed by a word gap, so it is emitted as those two steps.
fn backtrack(dp: &[Vec<u32>], phrases: &[String], words: &[String]) -> Vec<AlignResult> {
    let mut path = Vec::with_capacity(phrases.len() + words.len());
    let (mut i, mut j) = (phrases.len(), words.len());
    while i > 0 || j > 0 {
        let cost = dp[i][j];
        if i > 0
            && j > 0
            && keys_match(&phrases[i - 1], &words[j - 1])
            && cost == dp[i - 1][j - 1] + MATCH_COST
        {
            path.push(AlignResult::matched(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || cost == dp[i - 1][j] + GAP_COST) {
            path.push(AlignResult::phrase_only(i - 1));
            i -= 1;
        } else {
            path.push(AlignResult::word_only(j - 1));
            j -= 1;
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignOp;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(idx, text)| Word::new(*text, idx as f64 * 0.5, idx as f64 * 0.5 + 0.4))
            .collect()
    }

    #[test]
    fn matches_identical_sequences() {
        let results = EditDistanceAligner.align(&["Hello", "world"], &words(&["hello", "World."]));
        assert_eq!(
            results,
            vec![AlignResult::matched(0, 0), AlignResult::matched(1, 1)]
        );
    }

    #[test]
    fn skips_inserted_words() {
        let results = EditDistanceAligner.align(&["Hello", "world"], &words(&["Hello", "um", "world"]));
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
    fn prefers_gaps_over_substitution() {
        let results = EditDistanceAligner.align(&["cat"], &words(&["dog"]));
        assert!(results.iter().all(|result| result.op != AlignOp::Match));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn handles_empty_sides() {
        assert!(EditDistanceAligner.align(&[], &[]).is_empty());
        assert_eq!(
            EditDistanceAligner.align(&["lonely"], &[]),
            vec![AlignResult::phrase_only(0)]
        );
        assert_eq!(
            EditDistanceAligner.align(&[], &words(&["a", "b"])),
            vec![AlignResult::word_only(0), AlignResult::word_only(1)]
        );
    }

    #[test]
    fn table_cost_counts_edits() {
        let phrases: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let words: Vec<String> = ["a", "x", "c", "d"].iter().map(|s| s.to_string()).collect();
        let dp = fill_table(&phrases, &words);
        assert_eq!(dp[3][4], 3);
    }
}
