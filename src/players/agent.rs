//! LLM agent player driven by a chat-completion API.

use super::MoveProvider;
use crate::games::tictactoe::{Grid, Mark, describe_board};
use crate::llm_client::LlmClient;
use anyhow::Result;
use tracing::{debug, info, instrument};

/// Builds the system instructions for an agent playing `mark`.
pub fn player_instructions(mark: Mark) -> String {
    let opponent = mark.opponent();
    [
        format!("You are a Tic-Tac-Toe player using the symbol '{}'.", mark),
        format!(
            "Your opponent is using the symbol '{}'. Block their potential winning moves.",
            opponent
        ),
        "Make your move in the format 'row, col' based on the current board state.".to_string(),
        "Strategize to win by placing your symbol in a way that blocks your opponent from forming a straight line.".to_string(),
        "Do not include any explanations or extra text. Only provide the move.".to_string(),
        "Don't play where the other player has already played.".to_string(),
        "Row and column indices start from 0.".to_string(),
    ]
    .join("\n")
}

/// Agent player that asks an LLM for each move.
pub struct LlmPlayer {
    name: String,
    client: LlmClient,
}

impl LlmPlayer {
    /// Creates a new agent player backed by `client`.
    pub fn new(name: impl Into<String>, client: LlmClient) -> Self {
        let name = name.into();
        info!(agent = %name, model = %client.config().model(), "Creating agent player");
        Self { name, client }
    }

    /// The user prompt sent for one turn.
    pub fn move_prompt(&self, grid: &Grid) -> String {
        format!(
            "Current board state:\n{}\n{}'s turn. Provide your move in 'row, col' format.",
            describe_board(grid),
            self.name
        )
    }
}

#[async_trait::async_trait]
impl MoveProvider for LlmPlayer {
    #[instrument(skip(self, grid), fields(agent = %self.name, mark = %mark))]
    async fn provide_move(&mut self, grid: &Grid, mark: Mark) -> Result<String> {
        debug!("Agent's turn");
        let response = self
            .client
            .generate(&player_instructions(mark), &self.move_prompt(grid))
            .await?;
        debug!(response = %response, "Agent responded");
        Ok(response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
