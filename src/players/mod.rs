//! Move providers: anything that can answer "your move" with text.

mod agent;
mod scripted;
mod simple_ai;

pub use agent::{LlmPlayer, player_instructions};
pub use scripted::ScriptedPlayer;
pub use simple_ai::FirstOpenPlayer;

use crate::games::tictactoe::{Grid, Mark};
use anyhow::Result;

/// Trait for players that can be asked for a move.
///
/// Providers answer in free-form text; the orchestrator parses and
/// validates it. One call is made per attempt and awaited before the next.
#[async_trait::async_trait]
pub trait MoveProvider: Send {
    /// Asks for a move for `mark` on `grid` and returns the raw response.
    async fn provide_move(&mut self, grid: &Grid, mark: Mark) -> Result<String>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
