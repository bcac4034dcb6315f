//! Bulk audio conversion.
//!
//! The batch converter walks an input tree for source files, fans them out to
//! a bounded pool of workers, and collects one outcome per file into a summary.
//! Each worker invokes the external transcoder on a single file and, on
//! success, sweeps the original into the trash directory.

pub mod dispatcher;
pub mod enumerate;
pub mod worker;

use crate::config::Config;
use crate::trash::Trash;
use crate::{tools, Error, Result};
use std::path::{Path, PathBuf};

pub use worker::Outcome;

/// Maximum number of concurrently-running conversion workers.
pub const CONVERT_CONCURRENCY: usize = 4;

/// Conversion direction, fixing source extension, target extension, and
/// transcoder arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lossless PCM extraction.
    FlacToWav,
    /// Maximum-compression lossless re-encoding.
    WavToFlac,
}

impl Direction {
    /// Extension of the files to search for (lowercase, matched case-insensitively).
    pub fn source_ext(&self) -> &'static str {
        match self {
            Direction::FlacToWav => "flac",
            Direction::WavToFlac => "wav",
        }
    }

    /// Extension given to converted files.
    pub fn target_ext(&self) -> &'static str {
        match self {
            Direction::FlacToWav => "wav",
            Direction::WavToFlac => "flac",
        }
    }

    /// The fixed transcoder argument list for one file.
    ///
    /// `-y` is required because the destination is pre-claimed with an empty
    /// placeholder file before the transcoder runs.
    pub fn transcode_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = vec!["-i".to_string(), input.to_string_lossy().to_string()];
        match self {
            Direction::FlacToWav => {
                args.extend([
                    "-acodec".to_string(),
                    "pcm_s16le".to_string(),
                    "-ar".to_string(),
                    "44100".to_string(),
                ]);
            }
            Direction::WavToFlac => {
                args.extend(["-compression_level".to_string(), "12".to_string()]);
            }
        }
        args.extend([
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]);
        args
    }
}

/// Aggregate result of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<Outcome>,
}

impl BatchSummary {
    fn collect(outcomes: Vec<Outcome>) -> Self {
        let mut summary = Self::default();
        for outcome in &outcomes {
            match outcome {
                Outcome::Converted { .. } => summary.converted += 1,
                Outcome::Skipped { .. } => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary.outcomes = outcomes;
        summary
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Batch converter for one direction and output directory.
pub struct BatchConverter {
    direction: Direction,
    output_dir: PathBuf,
    transcoder: PathBuf,
    trash: Trash,
}

impl BatchConverter {
    /// Create a converter, resolving the transcoder binary upfront.
    ///
    /// A missing binary fails the whole run here, before any work is
    /// dispatched.
    pub fn new(config: &Config, direction: Direction, output_dir: &Path) -> Result<Self> {
        let transcoder = tools::get_tool_path("ffmpeg", config.tools.ffmpeg_path.as_deref())?;
        let trash = Trash::new(config.trash_path())?;

        Ok(Self {
            direction,
            output_dir: output_dir.to_path_buf(),
            transcoder,
            trash,
        })
    }

    /// Convert every matching file under `input_dir`, returning the summary.
    pub async fn run(&self, input_dir: &Path) -> Result<BatchSummary> {
        if !input_dir.is_dir() {
            return Err(Error::not_a_directory(input_dir));
        }
        let input_dir = input_dir.canonicalize()?;

        std::fs::create_dir_all(&self.output_dir)?;

        let items = enumerate::find_files(&input_dir, self.direction.source_ext());
        tracing::info!(
            "Found {} .{} file(s) under {}",
            items.len(),
            self.direction.source_ext(),
            input_dir.display()
        );

        let direction = self.direction;
        let output_dir = self.output_dir.clone();
        let transcoder = self.transcoder.clone();
        let trash = self.trash.clone();

        let outcomes = dispatcher::dispatch(items, CONVERT_CONCURRENCY, move |source| {
            worker::convert_file(&transcoder, direction, &source, &output_dir, &trash)
        })
        .await;

        Ok(BatchSummary::collect(outcomes))
    }
}
