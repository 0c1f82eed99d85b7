const SENTENCE_DELIMITERS: &[char] = &['.', '!', '?'];
const PHRASE_DELIMITERS: &[char] = &['.', '!', '?', ','];

/// Splits segment text into sentences, or into clauses when `sentence_only`
/// is false.
///
/// Runs of delimiters ("?!", "...") stay attached to the phrase they close.
/// Trailing text without a delimiter is appended to the previous phrase, or
/// becomes the only phrase when nothing was emitted.
pub fn split_phrases(text: &str, sentence_only: bool) -> Vec<String> {
    let delimiters = if sentence_only {
        SENTENCE_DELIMITERS
    } else {
        PHRASE_DELIMITERS
    };

    let mut phrases = Vec::new();
    let mut buffer = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        buffer.push(ch);
        if !delimiters.contains(&ch) {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !delimiters.contains(&next) {
                break;
            }
            buffer.push(next);
            chars.next();
        }
        push_trimmed(&mut phrases, &buffer);
        buffer.clear();
    }

    let remainder = buffer.trim();
    if !remainder.is_empty() {
        match phrases.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(remainder);
            }
            None => phrases.push(remainder.to_string()),
        }
    }

    phrases
}

fn push_trimmed(phrases: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        phrases.push(trimmed.to_string());
    }
}
