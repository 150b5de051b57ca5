//! Judges that rule on a finished board.
//!
//! A verdict is advisory. The referee's outcome settles bets; the judge's
//! text is reported next to it.

use crate::games::tictactoe::{Grid, Outcome, Referee, describe_board};
use crate::llm_client::LlmClient;
use anyhow::Result;
use tracing::{debug, info, instrument};

/// System instructions for an LLM judge.
pub const JUDGE_INSTRUCTIONS: &str = "\
You are the judge of a Tic-Tac-Toe game.
The board is presented as rows with positions separated by '|'.
Rows are labeled from 0 to 2, and columns from 0 to 2.
Determine the winner based on this board state.
The winner is the player with three of their symbols in a straight line (row, column, or diagonal).
If the board is full and there is no winner, declare a draw.
Provide only the result (e.g., 'Player X wins', 'Player O wins', 'Draw').";

/// Something that can rule on a final board.
#[async_trait::async_trait]
pub trait Judge: Send + Sync {
    /// Returns a verdict for `grid`.
    async fn rule(&self, grid: &Grid) -> Result<String>;
}

/// Builds the prompt asking for a verdict on `grid`.
pub fn judge_prompt(grid: &Grid) -> String {
    format!(
        "Final board state:\n{}\nDetermine the winner and provide the result.",
        describe_board(grid)
    )
}

/// Judge backed by a chat-completion model.
pub struct LlmJudge {
    client: LlmClient,
}

impl LlmJudge {
    /// Creates a judge using `client`.
    pub fn new(client: LlmClient) -> Self {
        info!(model = %client.config().model(), "Creating LLM judge");
        Self { client }
    }
}

#[async_trait::async_trait]
impl Judge for LlmJudge {
    #[instrument(skip_all)]
    async fn rule(&self, grid: &Grid) -> Result<String> {
        debug!("Asking judge for verdict");
        let verdict = self
            .client
            .generate(JUDGE_INSTRUCTIONS, &judge_prompt(grid))
            .await?;
        info!(verdict = %verdict.trim(), "Judge ruled");
        Ok(verdict.trim().to_string())
    }
}

/// Deterministic judge that reads the referee's evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefereeJudge;

#[async_trait::async_trait]
impl Judge for RefereeJudge {
    async fn rule(&self, grid: &Grid) -> Result<String> {
        let verdict = match Referee::evaluate(grid) {
            Outcome::XWins => "Player X wins",
            Outcome::OWins => "Player O wins",
            Outcome::Draw => "Draw",
            Outcome::InProgress => "No result yet",
        };
        Ok(verdict.to_string())
    }
}
