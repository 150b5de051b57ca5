//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Side length of the grid.
pub const GRID_SIZE: usize = 3;

/// Number of cells, and therefore the move budget of a single game.
pub const MAX_MOVES: usize = GRID_SIZE * GRID_SIZE;

/// Mark a player places on the grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe grid, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Square; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from rows of optional marks.
    pub fn from_rows(rows: [[Option<Mark>; GRID_SIZE]; GRID_SIZE]) -> Self {
        let mut grid = Self::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, mark) in row.iter().enumerate() {
                grid.cells[r][c] = mark.map_or(Square::Empty, Square::Occupied);
            }
        }
        grid
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Square> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Checks if the cell at `(row, col)` exists and is empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Square::Empty))
    }

    /// Returns the rows of the grid.
    pub fn rows(&self) -> &[[Square; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Iterates every cell with its coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Square)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, sq)| (r, c, *sq)))
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells().filter(|(_, _, sq)| *sq != Square::Empty).count()
    }

    /// Writes a square. Only the referee mutates grids.
    pub(super) fn set(&mut self, row: usize, col: usize, square: Square) {
        self.cells[row][col] = square;
    }

    /// Clears every cell.
    pub(super) fn clear(&mut self) {
        self.cells = [[Square::Empty; GRID_SIZE]; GRID_SIZE];
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            let symbols: Vec<String> = row
                .iter()
                .map(|sq| match sq {
                    Square::Empty => " ".to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                })
                .collect();
            write!(f, " {} ", symbols.join(" | "))?;
            if r + 1 < GRID_SIZE {
                write!(f, "\n---+---+---\n")?;
            }
        }
        Ok(())
    }
}

/// Derived result of evaluating a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Outcome {
    /// X completed a line.
    #[strum(to_string = "X wins")]
    XWins,
    /// O completed a line.
    #[strum(to_string = "O wins")]
    OWins,
    /// Grid is full with no line.
    Draw,
    /// Game continues.
    #[strum(to_string = "In progress")]
    InProgress,
}

impl Outcome {
    /// Outcome in which `mark` has won.
    pub fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::X => Outcome::XWins,
            Mark::O => Outcome::OWins,
        }
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::XWins => Some(Mark::X),
            Outcome::OWins => Some(Mark::O),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// Whether the game accepts no further moves.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}
