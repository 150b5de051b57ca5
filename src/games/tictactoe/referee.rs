//! Move validation, application and grid evaluation.
//!
//! The referee owns no state. Every operation takes the grid it works on,
//! which keeps the rules testable against arbitrary positions.

use super::action::{Move, MoveError};
use super::rules;
use super::types::{Grid, Mark, Outcome, Square};
use tracing::{debug, instrument, warn};

/// Stateless rule keeper for tic-tac-toe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Referee;

impl Referee {
    /// Checks that `mv` lands on an empty cell of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if either index is outside `0..=2`
    /// and [`MoveError::CellOccupied`] if the cell already holds a mark.
    #[instrument(skip(grid), fields(row = mv.row, col = mv.col))]
    pub fn validate(grid: &Grid, mv: Move) -> Result<(), MoveError> {
        match grid.get(mv.row, mv.col) {
            None => Err(MoveError::OutOfBounds {
                row: mv.row,
                col: mv.col,
            }),
            Some(Square::Occupied(_)) => Err(MoveError::CellOccupied {
                row: mv.row,
                col: mv.col,
            }),
            Some(Square::Empty) => Ok(()),
        }
    }

    /// Writes `mark` into the cell named by `mv`.
    ///
    /// The move is re-validated first; the grid is left untouched when that
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidMove`] wrapping the validation failure.
    #[instrument(skip(grid), fields(row = mv.row, col = mv.col, mark = %mark))]
    pub fn apply(grid: &mut Grid, mv: Move, mark: Mark) -> Result<(), MoveError> {
        if let Err(reason) = Self::validate(grid, mv) {
            warn!(%reason, "Refusing to apply unvalidated move");
            return Err(MoveError::InvalidMove(Box::new(reason)));
        }
        grid.set(mv.row, mv.col, Square::Occupied(mark));
        debug!("Mark placed");
        Ok(())
    }

    /// Evaluates the grid: first completed line wins, a full grid with no
    /// line draws, anything else is still in progress.
    #[instrument(skip(grid))]
    pub fn evaluate(grid: &Grid) -> Outcome {
        match rules::check_winner(grid) {
            Some(mark) => Outcome::win_for(mark),
            None if rules::is_draw(grid) => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}
