//! Rendering and writing of extracted opening lines.

use std::collections::HashSet;
use std::io::{self, Write};

use chess_core::OpeningLine;

/// Join each line's moves with single spaces, dropping repeats while keeping
/// the order lines were produced in.
pub fn render_unique_lines(lines: &[OpeningLine]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .map(|line| line.join(" "))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Write one rendered line per row, newline terminated.
pub fn write_lines<W: Write>(mut out: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
