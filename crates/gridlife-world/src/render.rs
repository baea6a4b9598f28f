//! Plain-text frames for terminal renderers.

use crate::automaton::Automaton;
use crate::grid::Grid;
use crate::occupant::Occupant;

/// Grid glyphs framed by a border, one line per row.
pub fn frame(grid: &Grid<Occupant>) -> String {
    let border = format!("+{}+", "-".repeat(grid.cols()));
    let mut out = String::with_capacity((grid.cols() + 3) * (grid.rows() + 2));

    out.push_str(&border);
    out.push('\n');
    for row in 0..grid.rows() {
        out.push('|');
        if let Ok(cells) = grid.row(row) {
            out.extend(cells.iter().map(Occupant::glyph));
        }
        out.push('|');
        out.push('\n');
    }
    out.push_str(&border);
    out
}

/// Frame plus a status line
pub fn screen<A: Automaton + ?Sized>(automaton: &A) -> String {
    format!(
        "{}\n[{}] {}",
        frame(automaton.grid()),
        automaton.label(),
        automaton.status()
    )
}
