//! Win detection logic for tic-tac-toe.

use super::super::{Grid, Mark, Square};
use tracing::instrument;

/// Every line, in scan order: rows top to bottom, columns left to right,
/// main diagonal, anti-diagonal.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns the mark completing the first winning line in scan order.
///
/// Returns `Some(mark)` if three identical marks share a line,
/// `None` otherwise.
#[instrument(skip(grid))]
pub fn check_winner(grid: &Grid) -> Option<Mark> {
    LINES.iter().find_map(|line| line_winner(grid, line))
}

/// Returns every mark that completes at least one line.
///
/// On grids reached by legal play this holds at most one mark.
pub fn winners(grid: &Grid) -> Vec<Mark> {
    let mut marks: Vec<Mark> = Vec::new();
    for line in &LINES {
        if let Some(mark) = line_winner(grid, line)
            && !marks.contains(&mark)
        {
            marks.push(mark);
        }
    }
    marks
}

fn line_winner(grid: &Grid, [a, b, c]: &[(usize, usize); 3]) -> Option<Mark> {
    let sq = grid.get(a.0, a.1)?;
    if sq != Square::Empty && Some(sq) == grid.get(b.0, b.1) && Some(sq) == grid.get(c.0, c.1) {
        sq.mark()
    } else {
        None
    }
}
