//! Opening mining primitives: the frequency trie, the longest-prefix tracker
//! and the PGN move-sequence producer feeding them.

pub mod longest_prefix;
pub mod opening_trie;
pub mod pgn;

pub use longest_prefix::LongestPrefixTracker;
pub use opening_trie::{OpeningLine, OpeningTrie, TrieNode};
pub use pgn::{GameReader, ParsedGame};
