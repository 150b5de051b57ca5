//! Simple offline player (no LLM).

use super::MoveProvider;
use crate::games::tictactoe::{Grid, Mark, Square};
use anyhow::Result;
use tracing::debug;

/// Simple AI that picks the first empty cell, row-major.
pub struct FirstOpenPlayer {
    name: String,
}

impl FirstOpenPlayer {
    /// Creates a new simple AI.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl MoveProvider for FirstOpenPlayer {
    async fn provide_move(&mut self, grid: &Grid, mark: Mark) -> Result<String> {
        debug!(ai = %self.name, %mark, "AI making move");

        match grid.cells().find(|(_, _, sq)| *sq == Square::Empty) {
            Some((row, col, _)) => {
                debug!(ai = %self.name, row, col, "AI chose cell");
                Ok(format!("{}, {}", row, col))
            }
            None => anyhow::bail!("No valid moves available"),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
