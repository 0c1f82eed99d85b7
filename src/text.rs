//! Token normalization shared by the matcher, the aligners and dedup.

/// Lowercases a token and drops everything except letters, digits and
/// apostrophes. Typographic apostrophes fold to `'`.
pub fn normalize_token(token: &str) -> String {
    let mut normalized = String::with_capacity(token.len());
    for ch in token.chars() {
        match ch {
            '\'' | '\u{2019}' | '\u{2018}' => normalized.push('\''),
            _ if ch.is_alphanumeric() => normalized.extend(ch.to_lowercase()),
            _ => continue,
        }
    }
    normalized
}

/// Splits hyphenated tokens ("well-known" -> "well", "known") and
/// normalizes each part, dropping parts that normalize to nothing.
pub fn expand_token(token: &str) -> impl Iterator<Item = String> + '_ {
    token
        .split(['-', '\u{2013}', '\u{2014}'])
        .map(normalize_token)
        .filter(|part| !part.is_empty())
}

/// Lowercases and collapses runs of whitespace, keeping punctuation.
pub fn fold_case_and_space(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace tokenization of a phrase.
pub fn tokenize(phrase: &str) -> Vec<&str> {
    phrase.split_whitespace().collect()
}
