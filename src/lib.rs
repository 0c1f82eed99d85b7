//! lingochunk turns speech-to-text output into timestamped learning chunks
//! for listen-and-repeat practice.

pub mod alignment;
pub mod chunking;
pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use chunking::{chunk_transcript, ChunkingEngine, TimingStrategy};
pub use error::{ChunkingError, Result};
pub use types::{AlignedToken, Chunk, ChunkSettings, Segment, TimeRange, Transcript, Word};
