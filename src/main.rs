use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lingochunk::config::{load_options, EngineOptions};
use lingochunk::{TimingStrategy, Transcript};

/// lingochunk - Transcript to learning-chunk converter
///
/// Reads a transcript (segments plus word timestamps) as JSON and prints the
/// merged, timestamped chunks as JSON.
#[derive(Parser, Debug)]
#[command(name = "lingochunk")]
#[command(version)]
#[command(about = "Split transcripts into timestamped listen-and-repeat chunks", long_about = None)]
struct Args {
    /// Transcript JSON file (`-` reads stdin)
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,

    /// Path to JSON engine options
    #[arg(long, value_name = "PATH", conflicts_with = "options_json")]
    options_file: Option<PathBuf>,

    /// Inline JSON engine options
    #[arg(long, value_name = "JSON", conflicts_with = "options_file")]
    options_json: Option<String>,

    /// Split only at sentence punctuation (overrides options)
    #[arg(long, value_name = "BOOL")]
    sentence_only: Option<bool>,

    /// Minimum chunk duration in milliseconds (overrides options)
    #[arg(long, value_name = "MS")]
    min_chunk_ms: Option<i64>,

    /// Timing strategy: tail-anchored, edit-distance, greedy or two-pointer
    #[arg(long, value_name = "NAME")]
    strategy: Option<TimingStrategy>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.transcript != Path::new("-") && !self.transcript.is_file() {
            bail!("Transcript file does not exist: {:?}", self.transcript);
        }
        Ok(())
    }

    fn options(&self) -> Result<EngineOptions> {
        let mut options =
            load_options(self.options_file.as_deref(), self.options_json.as_deref())?;
        if let Some(sentence_only) = self.sentence_only {
            options.settings.sentence_only = sentence_only;
        }
        if let Some(min_chunk_ms) = self.min_chunk_ms {
            options.settings.min_chunk_ms = min_chunk_ms;
        }
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    args.validate()
        .context("Failed to validate command-line arguments")?;

    let options = args.options().context("Failed to load engine options")?;
    let transcript = read_transcript(&args.transcript)?;
    info!(
        segments = transcript.segments.len(),
        words = transcript.words.len(),
        strategy = %options.strategy,
        "transcript loaded"
    );

    let chunks = options
        .engine()
        .try_process(&transcript)
        .context("Transcript rejected")?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&chunks)
    } else {
        serde_json::to_string(&chunks)
    }
    .context("Failed to serialize chunks")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("Failed to write chunks")?;
    Ok(())
}

fn read_transcript(path: &Path) -> Result<Transcript> {
    let data = if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("Failed to read transcript from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript file {:?}", path))?
    };
    parse_transcript(&data)
}

fn parse_transcript(raw: &str) -> Result<Transcript> {
    serde_json::from_str(raw).context("Failed to parse transcript JSON")
}
