//! Transcript-to-chunk segmentation.
//!
//! Words are deduplicated, segment text is split into phrases, each phrase is
//! timed against the word stream and the resulting raw chunks are merged into
//! sentence-complete chunks of a minimum duration.

pub mod dedup;
pub mod matcher;
pub mod merger;
pub mod splitter;

mod engine;


pub use dedup::remove_duplicates;
pub use engine::{chunk_transcript, ChunkingEngine, TimingStrategy};
pub use matcher::{MatchOutcome, MatchSource, TimestampMatcher};
pub use merger::{merge, merge_min_duration, merge_sentences};
pub use splitter::split_phrases;
