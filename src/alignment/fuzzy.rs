use crate::text::normalize_token;

/// Conversational disfluencies skipped during alignment.
pub const FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "yeah",
    "so",
    "well",
    "okay",
    "right",
    "you know",
    "i mean",
    "actually",
    "basically",
];

const MAX_FUZZY_DISTANCE: usize = 1;
const MIN_FUZZY_LEN: usize = 2;

/// True when the raw word text is one of [`FILLER_WORDS`].
pub fn is_filler(raw: &str) -> bool {
    let key = raw
        .split_whitespace()
        .map(normalize_token)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    FILLER_WORDS.contains(&key.as_str())
}

/// Near-miss match for ASR spelling jitter. Short tokens never fuzz-match.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    if a.chars().count() < MIN_FUZZY_LEN || b.chars().count() < MIN_FUZZY_LEN {
        return false;
    }
    levenshtein(a, b) <= MAX_FUZZY_DISTANCE
}

/// Character-level Levenshtein distance with a rolling row.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
