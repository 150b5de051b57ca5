//! Player that replays canned responses.

use super::MoveProvider;
use crate::games::tictactoe::{Grid, Mark};
use anyhow::Result;
use std::collections::VecDeque;
use tracing::debug;

/// Replays a fixed list of responses, one per request.
///
/// Useful for exercising the orchestrator without a network, including
/// responses that should be rejected.
pub struct ScriptedPlayer {
    name: String,
    responses: VecDeque<String>,
    requests: usize,
}

impl ScriptedPlayer {
    /// Creates a player that answers with `responses` in order.
    pub fn new<I, S>(name: impl Into<String>, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            responses: responses.into_iter().map(Into::into).collect(),
            requests: 0,
        }
    }

    /// Number of times this player has been asked for a move.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

#[async_trait::async_trait]
impl MoveProvider for ScriptedPlayer {
    async fn provide_move(&mut self, _grid: &Grid, mark: Mark) -> Result<String> {
        self.requests += 1;
        let Some(response) = self.responses.pop_front() else {
            anyhow::bail!("{} has no scripted responses left", self.name);
        };
        debug!(player = %self.name, %mark, response = %response, "Scripted response");
        Ok(response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_then_fails() {
        let mut player = ScriptedPlayer::new("Player O", ["1, 1", "no idea"]);
        let grid = Grid::new();

        assert_eq!(player.provide_move(&grid, Mark::O).await.unwrap(), "1, 1");
        assert_eq!(player.provide_move(&grid, Mark::O).await.unwrap(), "no idea");
        assert!(player.provide_move(&grid, Mark::O).await.is_err());
        assert_eq!(player.requests(), 3);
    }
}
