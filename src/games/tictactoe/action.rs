//! Move and move-error types for tic-tac-toe.
//!
//! A move is a transient `(row, col)` request. It carries no mark; the
//! game state decides whose mark lands on the grid.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A candidate move: the cell a player wants to mark.
///
/// Coordinates are unchecked until the referee validates them, so a move
/// parsed from free-form text may well point outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.row, self.col)
    }
}

/// Error that can occur when validating or applying a move.
///
/// Every variant is recoverable: the driver reports it and asks the same
/// player for another move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column outside `0..=2`.
    #[display("Move ({row}, {col}) is off the board (rows and columns run 0-2)")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// `apply` was handed a move that fails validation.
    #[display("Invalid move: {_0}")]
    InvalidMove(Box<MoveError>),

    /// The game has already reached a terminal outcome.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
