//! Extract frequent opening lines from a PGN corpus.
//!
//! Usage: cargo run --release --bin mine-openings -- <pgn_path> <output_path> [--min-frequency 100]
//!
//! `RUST_LOG` sets log verbosity (default `info`) and nothing else.
//!
//! Example:
//!   cargo run --release --bin mine-openings -- lichess_elite_2023-07.pgn lichess_elite_2023-07_openings.txt

use clap::Parser;
use opening_miner::MinerConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = MinerConfig::parse();
    opening_miner::run(&config)?;

    Ok(())
}
