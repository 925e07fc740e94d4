use std::fs;
use std::path::{Path, PathBuf};

/// Render a bare movetext game with a result tag, as exported by Lichess.
pub fn pgn_game(movetext: &str) -> String {
    format!("[Event \"Rated Blitz game\"]\n[Result \"*\"]\n\n{movetext} *\n\n")
}

/// Write the given movetexts as one PGN file.
pub fn write_pgn(path: &Path, movetexts: &[&str]) -> PathBuf {
    let pgn: String = movetexts.iter().map(|m| pgn_game(m)).collect();
    fs::write(path, pgn).unwrap();
    path.to_path_buf()
}

/// Output lines in file order.
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}
