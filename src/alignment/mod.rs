//! Phrase-to-word alignment strategies and timestamp assignment.
//!
//! Three interchangeable [`PhraseAligner`] implementations trade optimality for
//! speed and robustness; [`timestamps::assign`] turns any of their outputs into
//! one timed token per phrase.

pub mod edit_distance;
pub mod fuzzy;
pub mod greedy;
pub mod timestamps;
pub mod two_pointer;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::text::normalize_token;
use crate::types::Word;

pub use edit_distance::EditDistanceAligner;
pub use greedy::GreedyAligner;
pub use two_pointer::TwoPointerAligner;

/// Kind of step in an alignment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignOp {
    Match,
    PhraseOnly,
    WordOnly,
}

/// One step of an alignment path.
///
/// `Match` carries both indices; `PhraseOnly` only the phrase index and
/// `WordOnly` only the word index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignResult {
    pub phrase_index: Option<usize>,
    pub word_index: Option<usize>,
    pub op: AlignOp,
}

impl AlignResult {
    pub fn matched(phrase_index: usize, word_index: usize) -> Self {
        Self {
            phrase_index: Some(phrase_index),
            word_index: Some(word_index),
            op: AlignOp::Match,
        }
    }

    pub fn phrase_only(phrase_index: usize) -> Self {
        Self {
            phrase_index: Some(phrase_index),
            word_index: None,
            op: AlignOp::PhraseOnly,
        }
    }

    pub fn word_only(word_index: usize) -> Self {
        Self {
            phrase_index: None,
            word_index: Some(word_index),
            op: AlignOp::WordOnly,
        }
    }
}

/// Maps phrase tokens onto word-timestamp indices.
///
/// Every phrase index appears exactly once as `Match` or `PhraseOnly`; every
/// word index at most once as `Match` or `WordOnly`.
pub trait PhraseAligner {
    fn align(&self, phrases: &[&str], words: &[Word]) -> Vec<AlignResult>;
}

/// Caller policy selecting one of the alignment strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignerKind {
    EditDistance,
    Greedy,
    #[default]
    TwoPointer,
}

impl AlignerKind {
    pub const ALL: [AlignerKind; 3] = [
        AlignerKind::EditDistance,
        AlignerKind::Greedy,
        AlignerKind::TwoPointer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlignerKind::EditDistance => "edit-distance",
            AlignerKind::Greedy => "greedy",
            AlignerKind::TwoPointer => "two-pointer",
        }
    }
}

impl PhraseAligner for AlignerKind {
    fn align(&self, phrases: &[&str], words: &[Word]) -> Vec<AlignResult> {
        match self {
            AlignerKind::EditDistance => EditDistanceAligner.align(phrases, words),
            AlignerKind::Greedy => GreedyAligner::default().align(phrases, words),
            AlignerKind::TwoPointer => TwoPointerAligner::default().align(phrases, words),
        }
    }
}

impl Display for AlignerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignerKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown aligner '{raw}'"))
    }
}

/// Exact key equality. Punctuation-only tokens normalize to an empty key and
/// never match.
pub(crate) fn keys_match(phrase: &str, word: &str) -> bool {
    !phrase.is_empty() && phrase == word
}

/// Normalized keys for both sides of an alignment.
pub(crate) fn normalized_keys(phrases: &[&str], words: &[Word]) -> (Vec<String>, Vec<String>) {
    let phrase_keys = phrases
        .iter()
        .map(|phrase| normalize_token(phrase))
        .collect();
    let word_keys = words
        .iter()
        .map(|word| normalize_token(&word.text))
        .collect();
    (phrase_keys, word_keys)
}
