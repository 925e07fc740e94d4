use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::MinerError;

/// Threshold used for the reference corpus runs.
pub const DEFAULT_MIN_FREQUENCY: u64 = 100;

#[derive(Clone, Debug, Parser)]
#[command(name = "mine-openings")]
#[command(about = "Extract frequent opening lines from a PGN corpus")]
#[command(after_help = "Log verbosity is taken from RUST_LOG (default: info). It does not affect the mined lines.")]
pub struct MinerConfig {
    /// PGN file, or a directory whose *.pgn files are read in name order
    pub pgn_path: PathBuf,

    /// File the opening lines are written to, one per line
    pub output_path: PathBuf,

    /// Minimum number of games a line must appear in
    #[arg(short, long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    pub min_frequency: u64,
}

impl MinerConfig {
    pub fn new(pgn_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>, min_frequency: u64) -> Self {
        Self {
            pgn_path: pgn_path.into(),
            output_path: output_path.into(),
            min_frequency,
        }
    }

    pub fn validate(&self) -> Result<(), MinerError> {
        if self.min_frequency == 0 {
            return Err(MinerError::InvalidThreshold);
        }
        Ok(())
    }

    /// PGN files to ingest, in the order they are read.
    ///
    /// A file path is returned as is (opening it is left to the caller). A
    /// directory expands to its `*.pgn` entries sorted by path, since the
    /// longest-prefix snapshot depends on ingestion order.
    pub fn input_files(&self) -> Result<Vec<PathBuf>, MinerError> {
        if !self.pgn_path.is_dir() {
            return Ok(vec![self.pgn_path.clone()]);
        }

        let mut files = pgn_files_in(&self.pgn_path)?;
        files.sort();

        if files.is_empty() {
            return Err(MinerError::NoInput(self.pgn_path.clone()));
        }
        Ok(files)
    }
}

fn pgn_files_in(dir: &Path) -> Result<Vec<PathBuf>, MinerError> {
    let pattern = format!("{}/*.pgn", glob::Pattern::escape(&dir.to_string_lossy()));
    let files = glob::glob(&pattern)?
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_defaults() {
        let config = MinerConfig::try_parse_from(["mine-openings", "games.pgn", "openings.txt"]).unwrap();
        assert_eq!(config.pgn_path, PathBuf::from("games.pgn"));
        assert_eq!(config.output_path, PathBuf::from("openings.txt"));
        assert_eq!(config.min_frequency, DEFAULT_MIN_FREQUENCY);
    }

    #[test]
    fn test_parse_min_frequency() {
        let config =
            MinerConfig::try_parse_from(["mine-openings", "games.pgn", "out.txt", "--min-frequency", "25"]).unwrap();
        assert_eq!(config.min_frequency, 25);
    }

    #[test]
    fn test_parse_requires_paths() {
        assert!(MinerConfig::try_parse_from(["mine-openings", "games.pgn"]).is_err());
    }

    #[test]
    fn test_help_names_log_filter_variable() {
        use clap::CommandFactory;

        let help = MinerConfig::command().render_long_help().to_string();
        assert!(help.contains("RUST_LOG"));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = MinerConfig::new("games.pgn", "out.txt", 0);
        assert!(matches!(config.validate(), Err(MinerError::InvalidThreshold)));
        assert!(MinerConfig::new("games.pgn", "out.txt", 1).validate().is_ok());
    }

    #[test]
    fn test_file_path_is_used_directly() {
        let config = MinerConfig::new("does/not/exist.pgn", "out.txt", 10);
        assert_eq!(config.input_files().unwrap(), vec![PathBuf::from("does/not/exist.pgn")]);
    }

    #[test]
    fn test_directory_expands_sorted_pgn_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pgn"), "").unwrap();
        fs::write(dir.path().join("a.pgn"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let config = MinerConfig::new(dir.path(), "out.txt", 10);
        let files = config.input_files().unwrap();
        assert_eq!(files, vec![dir.path().join("a.pgn"), dir.path().join("b.pgn")]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = MinerConfig::new(dir.path(), "out.txt", 10);
        assert!(matches!(config.input_files(), Err(MinerError::NoInput(_))));
    }
}
