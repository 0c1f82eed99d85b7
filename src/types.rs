//! Core types for the lingochunk transcript chunking pipeline

use serde::{Deserialize, Serialize};

use crate::error::{ChunkingError, Result};

/// A single word timestamp reported by the speech-to-text engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(alias = "word")]
    pub text: String,
    #[serde(alias = "start", alias = "startSec")]
    pub start_sec: f64,
    #[serde(alias = "end", alias = "endSec")]
    pub end_sec: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            text: text.into(),
            start_sec,
            end_sec,
        }
    }
}

/// A coarse transcript segment, possibly spanning several sentences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(alias = "start", alias = "startSec")]
    pub start_sec: f64,
    #[serde(alias = "end", alias = "endSec")]
    pub end_sec: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec,
            text: text.into(),
        }
    }
}

/// Transcription output: coarse segments plus word-level timestamps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Transcript {
    /// Rejects timestamps the core does not sanitize on its own: non-finite
    /// values and spans that end before they start.
    pub fn validate(&self) -> Result<()> {
        for (idx, segment) in self.segments.iter().enumerate() {
            check_span("segment", idx, segment.start_sec, segment.end_sec)?;
        }
        for (idx, word) in self.words.iter().enumerate() {
            check_span("word", idx, word.start_sec, word.end_sec)?;
        }
        Ok(())
    }
}

/// Playable learning chunk emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub order_index: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub display_text: String,
}

impl Chunk {
    pub fn new(
        order_index: usize,
        start_ms: i64,
        end_ms: i64,
        display_text: impl Into<String>,
    ) -> Self {
        Self {
            order_index,
            start_ms,
            end_ms,
            display_text: display_text.into(),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Caller-owned chunking preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSettings {
    /// Split only on sentence punctuation (`.` `!` `?`), not on commas
    #[serde(default = "default_sentence_only", alias = "sentenceOnly")]
    pub sentence_only: bool,
    /// Shortest chunk (except the last) the merger will emit
    #[serde(default = "default_min_chunk_ms", alias = "minChunkMs")]
    pub min_chunk_ms: i64,
}

fn default_sentence_only() -> bool {
    true
}

fn default_min_chunk_ms() -> i64 {
    2_000
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            sentence_only: default_sentence_only(),
            min_chunk_ms: default_min_chunk_ms(),
        }
    }
}

impl ChunkSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_chunk_ms < 0 {
            return Err(ChunkingError::Settings(format!(
                "min_chunk_ms must be non-negative, got {}",
                self.min_chunk_ms
            )));
        }
        Ok(())
    }
}

/// Time window in seconds, used while interpolating unmatched phrases
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// A phrase with its resolved timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedToken {
    pub text: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// Converts seconds to whole milliseconds, rounding half away from zero.
pub fn seconds_to_ms(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

fn check_span(kind: &str, idx: usize, start: f64, end: f64) -> Result<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChunkingError::invalid_input(format!(
            "{kind} {idx} has a non-finite timestamp ({start}, {end})"
        )));
    }
    if end < start {
        return Err(ChunkingError::invalid_input(format!(
            "{kind} {idx} ends at {end:.3}s before it starts at {start:.3}s"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_duration_is_derived() {
        let chunk = Chunk::new(0, 400, 900, "there.");
        assert_eq!(chunk.duration_ms(), 500);
    }

    #[test]
    fn seconds_round_to_nearest_ms() {
        assert_eq!(seconds_to_ms(0.5), 500);
        assert_eq!(seconds_to_ms(1.2345), 1235);
        assert_eq!(seconds_to_ms(0.0004), 0);
    }

    #[test]
    fn transcript_accepts_provider_field_names() {
        let json = r#"{
            "segments": [{"startSec": 0.0, "endSec": 1.0, "text": "Hello world."}],
            "words": [
                {"word": "Hello", "start": 0.0, "end": 0.5},
                {"text": "world.", "start_sec": 0.5, "end_sec": 1.0}
            ]
        }"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.words[0], Word::new("Hello", 0.0, 0.5));
        assert_eq!(transcript.words[1].end_sec, 1.0);
    }

    #[test]
    fn settings_default_missing_fields() {
        let settings: ChunkSettings = serde_json::from_str(r#"{"minChunkMs": 1200}"#).unwrap();
        assert!(settings.sentence_only);
        assert_eq!(settings.min_chunk_ms, 1200);
    }

    #[test]
    fn chunk_serializes_camel_case() {
        let json = serde_json::to_string(&Chunk::new(2, 10, 20, "Hi.")).unwrap();
        assert!(json.contains("\"orderIndex\":2"));
        assert!(json.contains("\"displayText\":\"Hi.\""));
    }

    #[test]
    fn accepts_well_formed_transcript() {
        let transcript = Transcript {
            segments: vec![Segment::new(0.0, 1.0, "Hi.")],
            words: vec![Word::new("Hi.", 0.0, 1.0)],
        };
        assert!(transcript.validate().is_ok());
    }

    #[test]
    fn rejects_nan_word_timestamp() {
        let transcript = Transcript {
            segments: Vec::new(),
            words: vec![Word::new("oops", f64::NAN, 1.0)],
        };
        let error = transcript.validate().unwrap_err();
        assert!(matches!(error, ChunkingError::InvalidInput(_)));
        assert!(error.to_string().contains("word 0"));
    }

    #[test]
    fn rejects_inverted_segment() {
        let transcript = Transcript {
            segments: vec![Segment::new(2.0, 1.0, "backwards")],
            words: Vec::new(),
        };
        assert!(transcript
            .validate()
            .unwrap_err()
            .to_string()
            .contains("segment 0"));
    }

    #[test]
    fn rejects_negative_min_chunk() {
        let settings = ChunkSettings {
            sentence_only: true,
            min_chunk_ms: -1,
        };
        assert!(matches!(
            settings.validate(),
            Err(ChunkingError::Settings(_))
        ));
    }
}
