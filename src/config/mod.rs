use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::chunking::{ChunkingEngine, TimingStrategy};
use crate::types::ChunkSettings;

/// Engine configuration as read from JSON. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(flatten)]
    pub settings: ChunkSettings,
    #[serde(default)]
    pub strategy: TimingStrategy,
}

impl EngineOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.settings.min_chunk_ms >= 0,
            "minChunkMs must be non-negative, got {}",
            self.settings.min_chunk_ms
        );
        Ok(())
    }

    pub fn engine(&self) -> ChunkingEngine {
        ChunkingEngine::new(self.settings).with_strategy(self.strategy)
    }
}

/// Loads options from a file, else from inline JSON, else defaults.
pub fn load_options(path: Option<&Path>, json: Option<&str>) -> Result<EngineOptions> {
    let options = match (path, json) {
        (Some(p), _) => {
            let data = fs::read_to_string(p)
                .with_context(|| format!("Failed to read options file {:?}", p))?;
            parse_options(&data).with_context(|| format!("Invalid options file {:?}", p))?
        }
        (None, Some(raw)) => parse_options(raw)?,
        (None, None) => EngineOptions::default(),
    };
    options.validate()?;
    Ok(options)
}

fn parse_options(raw: &str) -> Result<EngineOptions> {
    serde_json::from_str(raw).context("Failed to parse options JSON")
}
