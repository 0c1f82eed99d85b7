use crate::text::fold_case_and_space;
use crate::types::Word;

/// Collapses duplicated word timestamps produced by ASR jitter.
///
/// Words are sorted by `(start, end)` (stable for ties). A word is dropped when
/// it starts before the last kept word ends and both fold to the same text.
pub fn remove_duplicates(words: &[Word]) -> Vec<Word> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| {
        a.start_sec
            .total_cmp(&b.start_sec)
            .then(a.end_sec.total_cmp(&b.end_sec))
    });

    let mut kept: Vec<Word> = Vec::with_capacity(sorted.len());
    let mut kept_key = String::new();
    for word in sorted {
        let key = fold_case_and_space(&word.text);
        if let Some(last) = kept.last() {
            if word.start_sec < last.end_sec && key == kept_key {
                continue;
            }
        }
        kept_key = key;
        kept.push(word);
    }
    kept
}
