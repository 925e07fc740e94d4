//! Frequent opening line mining over PGN corpora.
//!
//! [`run`] streams every game of the configured corpus into an
//! [`OpeningMiner`], writes the maximal lines that reach the frequency
//! threshold and reports the longest frequent prefix seen on the way.

pub mod config;
pub mod error;
pub mod ingest;
pub mod output;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::time::Instant;

use chess_core::{GameReader, OpeningLine};
use tracing::{info, warn};

pub use config::MinerConfig;
pub use error::MinerError;
pub use ingest::{IngestStats, OpeningMiner};

/// Result of a mining run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningReport {
    /// Lines written to the output file.
    pub unique_lines: usize,
    pub longest_prefix: OpeningLine,
    pub stats: IngestStats,
}

/// Mine `config.pgn_path` and write the frequent opening lines to
/// `config.output_path`.
pub fn run(config: &MinerConfig) -> Result<MiningReport, MinerError> {
    config.validate()?;
    let files = config.input_files()?;

    info!(
        input = %config.pgn_path.display(),
        files = files.len(),
        min_frequency = config.min_frequency,
        "Mining opening lines"
    );

    // A missing output cannot alias anything.
    if let Ok(out_path) = fs::canonicalize(&config.output_path) {
        if files.iter().any(|path| fs::canonicalize(path).is_ok_and(|path| path == out_path)) {
            return Err(MinerError::OutputIsInput(config.output_path.clone()));
        }
    }

    let inputs = files
        .into_iter()
        .map(|path| match File::open(&path) {
            Ok(file) => Ok((path, file)),
            Err(source) => Err(MinerError::OpenInput { path, source }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut miner = OpeningMiner::new(config.min_frequency);
    let start = Instant::now();

    for (path, file) in inputs {
        info!(path = %path.display(), "Processing PGN file");

        miner
            .ingest_all(GameReader::new(BufReader::new(file)), |stats, longest| {
                info!(
                    games_scanned = stats.games_scanned,
                    games_used = stats.games_used,
                    longest = longest.len(),
                    elapsed_secs = start.elapsed().as_secs(),
                    "Ingestion progress"
                );
            })
            .map_err(|source| MinerError::ReadInput { path, source })?;
    }

    let stats = *miner.stats();
    info!(
        games_scanned = stats.games_scanned,
        games_used = stats.games_used,
        games_discarded = stats.games_discarded,
        games_truncated = stats.games_truncated,
        trie_nodes = miner.trie().node_count(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Ingestion complete"
    );

    let lines = output::render_unique_lines(&miner.maximal_lines());
    if lines.is_empty() {
        warn!(min_frequency = config.min_frequency, "No line reached the frequency threshold");
    }

    // Created only once every input has been read in full.
    File::create(&config.output_path)
        .and_then(|out_file| output::write_lines(BufWriter::new(out_file), &lines))
        .map_err(|source| MinerError::WriteOutput {
            path: config.output_path.clone(),
            source,
        })?;

    let longest_prefix = miner.into_longest_prefix();
    info!(
        unique_lines = lines.len(),
        output = %config.output_path.display(),
        "Wrote unique opening lines"
    );
    info!(
        length = longest_prefix.len(),
        "Longest opening line: {}",
        longest_prefix.join(" ")
    );

    Ok(MiningReport {
        unique_lines: lines.len(),
        longest_prefix,
        stats,
    })
}
