//! Per-game ingestion into the opening trie.
//!
//! Each game is inserted first and then checked against the tracker, so a
//! game's own contribution counts towards its frequent prefix. Games shorter
//! than [`MIN_LINE_LENGTH`] touch neither.

use chess_core::{LongestPrefixTracker, OpeningLine, OpeningTrie, ParsedGame};
use tracing::debug;

/// Lines shorter than this never enter the trie.
pub const MIN_LINE_LENGTH: usize = 2;

/// Scanned games between two progress callbacks.
pub const PROGRESS_INTERVAL: u64 = 1000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Every game produced by the reader.
    pub games_scanned: u64,
    /// Games inserted into the trie.
    pub games_used: u64,
    /// Games dropped for being too short.
    pub games_discarded: u64,
    /// Games cut short by an unplayable move, used or not.
    pub games_truncated: u64,
}

/// Outcome of ingesting a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    Used { new_longest: bool },
    Discarded,
}

/// Owns the trie and tracker for one mining run.
#[derive(Debug)]
pub struct OpeningMiner {
    trie: OpeningTrie,
    tracker: LongestPrefixTracker,
    min_frequency: u64,
    stats: IngestStats,
}

impl OpeningMiner {
    pub fn new(min_frequency: u64) -> Self {
        Self {
            trie: OpeningTrie::new(),
            tracker: LongestPrefixTracker::new(),
            min_frequency,
            stats: IngestStats::default(),
        }
    }

    pub fn ingest(&mut self, game: &ParsedGame) -> Ingested {
        self.stats.games_scanned += 1;

        if game.truncated {
            self.stats.games_truncated += 1;
            debug!(
                game = self.stats.games_scanned,
                kept_moves = game.len(),
                "Game truncated at unplayable move"
            );
        }

        if game.len() < MIN_LINE_LENGTH {
            self.stats.games_discarded += 1;
            return Ingested::Discarded;
        }

        self.trie.insert(&game.moves);
        self.stats.games_used += 1;

        let new_longest = self.tracker.update(&game.moves, &self.trie, self.min_frequency);
        if new_longest {
            debug!(length = self.tracker.len(), "New longest frequent prefix");
        }

        Ingested::Used { new_longest }
    }

    /// Ingest every game in `games`, stopping at the first error.
    ///
    /// `on_progress` runs after every [`PROGRESS_INTERVAL`]th scanned game
    /// with the running stats and the current longest prefix.
    pub fn ingest_all<I, E, F>(&mut self, games: I, mut on_progress: F) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<ParsedGame, E>>,
        F: FnMut(&IngestStats, &[String]),
    {
        for game in games {
            self.ingest(&game?);

            if self.stats.games_scanned % PROGRESS_INTERVAL == 0 {
                on_progress(&self.stats, self.tracker.longest());
            }
        }
        Ok(())
    }

    /// Maximal frequent lines of everything ingested so far, in traversal order.
    pub fn maximal_lines(&self) -> Vec<OpeningLine> {
        self.trie.maximal_lines(self.min_frequency)
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn trie(&self) -> &OpeningTrie {
        &self.trie
    }

    pub fn min_frequency(&self) -> u64 {
        self.min_frequency
    }

    pub fn longest_prefix(&self) -> &[String] {
        self.tracker.longest()
    }

    pub fn into_longest_prefix(self) -> OpeningLine {
        self.tracker.into_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn game(moves: &str) -> ParsedGame {
        ParsedGame {
            moves: moves.split_whitespace().map(String::from).collect(),
            truncated: false,
        }
    }

    fn ok_games(games: Vec<ParsedGame>) -> impl Iterator<Item = io::Result<ParsedGame>> {
        games.into_iter().map(Ok)
    }

    #[test]
    fn test_scenario() {
        let mut miner = OpeningMiner::new(3);
        for _ in 0..3 {
            miner.ingest(&game("e4 e5 Nf3"));
        }
        miner.ingest(&game("e4 e5 Qh5"));
        assert_eq!(miner.ingest(&game("d4")), Ingested::Discarded);

        assert_eq!(miner.maximal_lines(), vec![vec!["e4", "e5", "Nf3"]]);
        assert_eq!(miner.longest_prefix(), ["e4", "e5", "Nf3"]);
        assert_eq!(
            *miner.stats(),
            IngestStats {
                games_scanned: 5,
                games_used: 4,
                games_discarded: 1,
                games_truncated: 0,
            }
        );
    }

    #[test]
    fn test_short_games_touch_nothing() {
        let mut miner = OpeningMiner::new(1);
        assert_eq!(miner.ingest(&game("")), Ingested::Discarded);
        assert_eq!(miner.ingest(&game("e4")), Ingested::Discarded);

        assert_eq!(miner.trie().sequences(), 0);
        assert_eq!(miner.trie().node_count(), 0);
        assert!(miner.longest_prefix().is_empty());
        assert!(miner.maximal_lines().is_empty());
    }

    #[test]
    fn test_truncated_game_contributes_kept_moves_only() {
        let mut miner = OpeningMiner::new(1);
        let mut cut = game("e4 e5 Nf3 Nc6 Bb5");
        cut.truncated = true;

        assert_eq!(miner.ingest(&cut), Ingested::Used { new_longest: true });
        assert_eq!(miner.trie().node_count(), 5);
        assert_eq!(miner.maximal_lines(), vec![cut.moves.clone()]);
        assert_eq!(miner.stats().games_truncated, 1);
    }

    #[test]
    fn test_truncated_short_game_is_discarded() {
        let mut miner = OpeningMiner::new(1);
        let mut cut = game("e4");
        cut.truncated = true;

        assert_eq!(miner.ingest(&cut), Ingested::Discarded);
        assert_eq!(miner.stats().games_truncated, 1);
        assert_eq!(miner.stats().games_discarded, 1);
    }

    #[test]
    fn test_reports_new_longest() {
        let mut miner = OpeningMiner::new(2);
        assert_eq!(miner.ingest(&game("d4 d5 c4")), Ingested::Used { new_longest: false });
        assert_eq!(miner.ingest(&game("d4 d5 c4")), Ingested::Used { new_longest: true });
        assert_eq!(miner.ingest(&game("d4 d5")), Ingested::Used { new_longest: false });
    }

    #[test]
    fn test_progress_callback_interval() {
        let mut miner = OpeningMiner::new(1);
        let games: Vec<ParsedGame> = (0..2500).map(|_| game("e4 e5")).collect();

        let mut calls = Vec::new();
        miner
            .ingest_all(ok_games(games), |stats, longest| {
                calls.push((stats.games_scanned, longest.len()));
            })
            .unwrap();

        assert_eq!(calls, vec![(1000, 2), (2000, 2)]);
        assert_eq!(miner.stats().games_used, 2500);
    }

    #[test]
    fn test_ingest_all_stops_at_first_error() {
        let mut miner = OpeningMiner::new(1);
        let games = vec![
            Ok(game("e4 e5")),
            Err(io::Error::new(io::ErrorKind::InvalidData, "broken")),
            Ok(game("d4 d5")),
        ];

        let result = miner.ingest_all(games, |_, _| {});
        assert!(result.is_err());
        assert_eq!(miner.stats().games_scanned, 1);
        assert_eq!(miner.into_longest_prefix(), vec!["e4", "e5"]);
    }
}
