//! Draw detection logic for tic-tac-toe.

use super::super::{Grid, Square};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the grid is full (every cell occupied).
///
/// A full grid with no winner indicates a draw.
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().all(|(_, _, sq)| sq != Square::Empty)
}

/// Checks if the grid is full with no completed line.
#[instrument(skip(grid))]
pub fn is_draw(grid: &Grid) -> bool {
    is_full(grid) && check_winner(grid).is_none()
}

#[cfg(test)]
mod tests {
    use super::super::super::Mark;
    use super::*;

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Grid::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let grid = Grid::from_rows([[E, E, E], [E, X, E], [E, E, E]]);
        assert!(!is_full(&grid));
    }

    #[test]
    fn test_full_board() {
        let grid = Grid::from_rows([[X, X, X], [X, X, X], [X, X, X]]);
        assert!(is_full(&grid));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let grid = Grid::from_rows([[X, O, X], [O, X, X], [O, X, O]]);
        assert!(is_draw(&grid));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let grid = Grid::from_rows([[X, X, X], [O, O, X], [O, X, O]]);
        assert!(is_full(&grid));
        assert!(!is_draw(&grid));
    }
}
