//! Longest frequent prefix seen during ingestion.
//!
//! The tracker is updated once per game, right after that game was inserted
//! into the trie, so each game counts towards its own prefix. The recorded
//! value only ever grows and depends on the order games are fed in.

use crate::opening_trie::{OpeningLine, OpeningTrie};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LongestPrefixTracker {
    longest: OpeningLine,
}

impl LongestPrefixTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the frequent prefix of `moves` and keep it if it is strictly
    /// longer than the one recorded so far. Returns whether it was replaced.
    pub fn update<S: AsRef<str>>(&mut self, moves: &[S], trie: &OpeningTrie, min_frequency: u64) -> bool {
        let prefix = trie.frequent_prefix(moves, min_frequency);
        if prefix.len() <= self.longest.len() {
            return false;
        }

        self.longest = prefix.iter().map(|mv| mv.as_ref().to_string()).collect();
        true
    }

    pub fn longest(&self) -> &[String] {
        &self.longest
    }

    pub fn len(&self) -> usize {
        self.longest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longest.is_empty()
    }

    pub fn into_line(self) -> OpeningLine {
        self.longest
    }
}
