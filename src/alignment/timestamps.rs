use crate::types::{seconds_to_ms, AlignedToken, TimeRange, Word};

use super::{AlignOp, AlignResult};

/// Width given to a phrase interpolated between two anchors, capped at the
/// next anchor's start.
const INTERPOLATED_WIDTH_SEC: f64 = 0.1;
/// Extension used when only one neighbouring anchor exists.
const EDGE_EXTENSION_SEC: f64 = 0.2;
const NO_ANCHOR_RANGE: TimeRange = TimeRange {
    start: 0.0,
    end: INTERPOLATED_WIDTH_SEC,
};

/// Gives every phrase a time window: matched phrases take their word's span,
/// unmatched ones are placed relative to the nearest matched neighbours.
pub fn assign(phrases: &[&str], words: &[Word], results: &[AlignResult]) -> Vec<AlignedToken> {
    let anchors = matched_ranges(phrases.len(), words, results);

    let mut previous = Vec::with_capacity(anchors.len());
    let mut last_seen = None;
    for (idx, anchor) in anchors.iter().enumerate() {
        previous.push(last_seen);
        if let Some(range) = anchor {
            last_seen = Some((idx, *range));
        }
    }

    let mut next = vec![None; anchors.len()];
    last_seen = None;
    for (idx, anchor) in anchors.iter().enumerate().rev() {
        next[idx] = last_seen;
        if let Some(range) = anchor {
            last_seen = Some((idx, *range));
        }
    }

    phrases
        .iter()
        .enumerate()
        .map(|(idx, phrase)| {
            let range = anchors[idx].unwrap_or_else(|| interpolate(idx, previous[idx], next[idx]));
            AlignedToken {
                text: phrase.to_string(),
                start_ms: seconds_to_ms(range.start),
                end_ms: seconds_to_ms(range.end.max(range.start)),
            }
        })
        .collect()
}

fn matched_ranges(
    phrase_count: usize,
    words: &[Word],
    results: &[AlignResult],
) -> Vec<Option<TimeRange>> {
    let mut anchors = vec![None; phrase_count];
    for result in results.iter().filter(|result| result.op == AlignOp::Match) {
        let (Some(phrase_idx), Some(word_idx)) = (result.phrase_index, result.word_index) else {
            continue;
        };
        if let (Some(slot), Some(word)) = (anchors.get_mut(phrase_idx), words.get(word_idx)) {
            *slot = Some(TimeRange::new(word.start_sec, word.end_sec));
        }
    }
    anchors
}

fn interpolate(
    idx: usize,
    previous: Option<(usize, TimeRange)>,
    next: Option<(usize, TimeRange)>,
) -> TimeRange {
    match (previous, next) {
        (Some((p, before)), Some((q, after))) => {
            let ratio = (idx - p) as f64 / (q - p) as f64;
            let start = before.end + ratio * (after.start - before.end);
            TimeRange::new(start, (start + INTERPOLATED_WIDTH_SEC).min(after.start))
        }
        (Some((_, before)), None) => TimeRange::new(before.end, before.end + EDGE_EXTENSION_SEC),
        (None, Some((_, after))) => {
            TimeRange::new((after.start - EDGE_EXTENSION_SEC).max(0.0), after.start)
        }
        (None, None) => NO_ANCHOR_RANGE,
    }
}
