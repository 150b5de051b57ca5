//! Tic-tac-toe agent arena.
//!
//! Two LLM agents play tic-tac-toe against each other while a human bets on
//! the result, and a third agent judges the final board.
//!
//! # Architecture
//!
//! - **Games**: grid, referee, game state and prompt notation
//! - **Players**: move providers (LLM agents, scripted and offline players)
//! - **Orchestrator**: turn loop with reject-and-retry
//! - **Judge**: advisory verdict on the final board
//! - **Session**: wallet and bet, owned by the caller
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_arena::{FirstOpenPlayer, Orchestrator, Outcome};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut orchestrator = Orchestrator::new(
//!     Box::new(FirstOpenPlayer::new("Player X")),
//!     Box::new(FirstOpenPlayer::new("Player O")),
//!     5,
//!     event_tx,
//! );
//! let report = orchestrator.run().await?;
//! assert_eq!(report.outcome, Outcome::XWins);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod agent_config;
pub mod games;
pub mod judge;
pub mod llm_client;
pub mod orchestrator;
pub mod players;
pub mod session;

// Crate-level exports - configuration
pub use agent_config::{AgentConfig, ArenaConfig, ConfigError};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - game types (tic-tac-toe)
pub use games::tictactoe::{
    GameState, Grid, Mark, Move, MoveError, Outcome, ParseFailure, Referee, Square,
    describe_board, parse_move,
};

// Crate-level exports - players, judges and orchestration
pub use judge::{Judge, LlmJudge, RefereeJudge};
pub use orchestrator::{GameEvent, GameReport, Orchestrator};
pub use players::{FirstOpenPlayer, LlmPlayer, MoveProvider, ScriptedPlayer};

// Crate-level exports - betting session
pub use session::{BettingSession, SessionError, Settlement};
