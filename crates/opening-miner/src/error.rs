//! Miner error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinerError {
    #[error("Configuration error: min_frequency must be at least 1")]
    InvalidThreshold,

    #[error("No PGN files found in {}", .0.display())]
    NoInput(PathBuf),

    #[error("Output {} is also an input", .0.display())]
    OutputIsInput(PathBuf),

    #[error("Failed to open {}: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error("Invalid PGN directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
