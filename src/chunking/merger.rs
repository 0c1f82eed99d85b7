use crate::types::Chunk;

const CLOSING_QUOTES: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Two-pass chunk consolidation: complete sentences first, then enforce the
/// minimum duration. Output is reindexed from zero.
pub fn merge(chunks: &[Chunk], min_chunk_ms: i64) -> Vec<Chunk> {
    let sentences = merge_sentences(chunks);
    merge_min_duration(&sentences, min_chunk_ms)
}

/// Accumulates chunks until the joined text ends a sentence.
pub fn merge_sentences(chunks: &[Chunk]) -> Vec<Chunk> {
    merge_while(chunks, |pending| ends_sentence(&pending.text))
}

/// Accumulates chunks until the joined span lasts at least `min_chunk_ms`.
pub fn merge_min_duration(chunks: &[Chunk], min_chunk_ms: i64) -> Vec<Chunk> {
    merge_while(chunks, |pending| pending.end_ms - pending.start_ms >= min_chunk_ms)
}

/// True when the text ends in `.`, `!` or `?`, optionally followed by one
/// closing quote.
pub fn ends_sentence(text: &str) -> bool {
    let trimmed = text.trim_end();
    let unquoted = trimmed
        .strip_suffix(CLOSING_QUOTES)
        .unwrap_or(trimmed);
    unquoted.ends_with(['.', '!', '?'])
}

fn merge_while<F>(chunks: &[Chunk], should_flush: F) -> Vec<Chunk>
where
    F: Fn(&PendingChunk) -> bool,
{
    let mut accumulator = MergeAccumulator::new();
    for chunk in chunks {
        accumulator.attach(chunk);
        if accumulator.pending.as_ref().is_some_and(&should_flush) {
            accumulator.flush();
        }
    }
    accumulator.into_chunks()
}

#[derive(Debug)]
struct PendingChunk {
    start_ms: i64,
    end_ms: i64,
    text: String,
}

impl PendingChunk {
    fn absorb(&mut self, end_ms: i64, text: &str) {
        self.end_ms = end_ms;
        if !text.is_empty() {
            if !self.text.is_empty() {
                self.text.push(' ');
            }
            self.text.push_str(text);
        }
    }
}

struct MergeAccumulator {
    flushed: Vec<PendingChunk>,
    pending: Option<PendingChunk>,
}

impl MergeAccumulator {
    fn new() -> Self {
        Self {
            flushed: Vec::new(),
            pending: None,
        }
    }

    fn attach(&mut self, chunk: &Chunk) {
        match self.pending.as_mut() {
            Some(pending) => pending.absorb(chunk.end_ms, &chunk.display_text),
            None => {
                self.pending = Some(PendingChunk {
                    start_ms: chunk.start_ms,
                    end_ms: chunk.end_ms,
                    text: chunk.display_text.clone(),
                })
            }
        }
    }

    fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.flushed.push(pending);
        }
    }

    /// Leftover text folds into the last flushed chunk, or stands alone.
    fn into_chunks(mut self) -> Vec<Chunk> {
        if let Some(remainder) = self.pending.take() {
            match self.flushed.last_mut() {
                Some(last) => last.absorb(remainder.end_ms, &remainder.text),
                None => self.flushed.push(remainder),
            }
        }
        self.flushed
            .into_iter()
            .enumerate()
            .map(|(order_index, pending)| Chunk {
                order_index,
                start_ms: pending.start_ms,
                end_ms: pending.end_ms.max(pending.start_ms),
                display_text: pending.text,
            })
            .collect()
    }
}
