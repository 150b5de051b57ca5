//! Game orchestration between two move providers.

use crate::games::tictactoe::{
    GameState, Grid, Mark, Move, Outcome, describe_board, parse_move,
};
use crate::players::MoveProvider;
use crate::session::{BettingSession, Settlement};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the orchestrator to whoever is watching.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A player is being asked for a move.
    TurnStarted {
        /// Player name.
        player: String,
        /// Mark the player is placing.
        mark: Mark,
        /// 1-based attempt number within this turn.
        attempt: usize,
    },
    /// A player answered.
    AgentResponded {
        /// Player name.
        player: String,
        /// Raw response text.
        response: String,
    },
    /// The answer could not be parsed or broke the rules; same turn again.
    MoveRejected {
        /// Player name.
        player: String,
        /// Human-readable reason.
        reason: String,
    },
    /// A move was accepted.
    MoveMade {
        /// Player name.
        player: String,
        /// Mark placed.
        mark: Mark,
        /// Cell marked.
        mv: Move,
    },
    /// Board description, sent for the empty grid and after every accepted
    /// move.
    BoardChanged(String),
    /// Game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
        /// Winning player's name, if any.
        winner: Option<String>,
    },
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    /// Final grid.
    pub grid: Grid,
    /// Terminal outcome.
    pub outcome: Outcome,
    /// Accepted moves in order (X first).
    pub history: Vec<Move>,
}

/// Orchestrates gameplay between two players.
///
/// Bad answers are reported and the same player is asked again; a turn is
/// never skipped. A player that keeps failing for `max_attempts_per_turn`
/// requests ends the game with an error.
pub struct Orchestrator {
    state: GameState,
    player_x: Box<dyn MoveProvider>,
    player_o: Box<dyn MoveProvider>,
    max_attempts_per_turn: usize,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        player_x: Box<dyn MoveProvider>,
        player_o: Box<dyn MoveProvider>,
        max_attempts_per_turn: usize,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            state: GameState::new(),
            player_x,
            player_o,
            max_attempts_per_turn: max_attempts_per_turn.max(1),
            event_tx,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs one game from an empty grid to a terminal outcome.
    ///
    /// # Errors
    ///
    /// Fails if a player errors (e.g. the LLM service is unreachable) or
    /// exhausts its attempts for a turn.
    #[instrument(skip(self), fields(player_x = %self.player_x.name(), player_o = %self.player_o.name()))]
    pub async fn run(&mut self) -> Result<GameReport> {
        info!("Starting game orchestration");
        self.state.reset();
        self.emit(GameEvent::BoardChanged(describe_board(self.state.grid())));

        while !self.state.outcome().is_terminal() {
            self.play_turn().await?;
        }

        let outcome = self.state.outcome();
        let winner = outcome.winner().map(|mark| self.player(mark).name().to_string());
        info!(%outcome, winner = ?winner, moves = self.state.move_count(), "Game over");
        self.emit(GameEvent::GameOver { outcome, winner });

        Ok(GameReport {
            grid: self.state.grid().clone(),
            outcome,
            history: self.state.history().to_vec(),
        })
    }

    /// Runs one game against the bet already placed on `session` and settles
    /// it.
    ///
    /// A game that fails is abandoned and the stake stays in the wallet, so
    /// the session is ready for the next bet either way.
    ///
    /// # Errors
    ///
    /// Fails if no bet is placed, or if [`Orchestrator::run`] fails.
    #[instrument(skip(self, session), fields(balance = session.balance()))]
    pub async fn run_wagered(
        &mut self,
        session: &mut BettingSession,
    ) -> Result<(GameReport, Settlement)> {
        session.begin()?;

        let report = match self.run().await {
            Ok(report) => report,
            Err(e) => {
                session.abandon();
                warn!(error = %e, "Game abandoned, bet returned");
                return Err(e);
            }
        };

        let settlement = session.settle(report.outcome)?;
        Ok((report, settlement))
    }

    /// Asks the current player until one move is accepted.
    async fn play_turn(&mut self) -> Result<()> {
        let mark = self.state.current_turn();
        let player_name = self.player(mark).name().to_string();

        for attempt in 1..=self.max_attempts_per_turn {
            self.emit(GameEvent::TurnStarted {
                player: player_name.clone(),
                mark,
                attempt,
            });

            debug!(player = %player_name, %mark, attempt, "Waiting for move");
            let grid = self.state.grid().clone();
            let response = self.player_mut(mark).provide_move(&grid, mark).await?;
            self.emit(GameEvent::AgentResponded {
                player: player_name.clone(),
                response: response.clone(),
            });

            let accepted = parse_move(&response)
                .map_err(|e| e.to_string())
                .and_then(|mv| self.state.play(mv).map(|_| mv).map_err(|e| e.to_string()));

            match accepted {
                Ok(mv) => {
                    info!(player = %player_name, %mark, %mv, "Move accepted");
                    self.emit(GameEvent::MoveMade {
                        player: player_name,
                        mark,
                        mv,
                    });
                    self.emit(GameEvent::BoardChanged(describe_board(self.state.grid())));
                    return Ok(());
                }
                Err(reason) => {
                    warn!(player = %player_name, attempt, %reason, "Move rejected");
                    self.emit(GameEvent::MoveRejected {
                        player: player_name.clone(),
                        reason,
                    });
                }
            }
        }

        anyhow::bail!(
            "{} gave no valid move in {} attempts",
            player_name,
            self.max_attempts_per_turn
        )
    }

    fn player(&self, mark: Mark) -> &dyn MoveProvider {
        match mark {
            Mark::X => &*self.player_x,
            Mark::O => &*self.player_o,
        }
    }

    fn player_mut(&mut self, mark: Mark) -> &mut dyn MoveProvider {
        match mark {
            Mark::X => &mut *self.player_x,
            Mark::O => &mut *self.player_o,
        }
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No event listener");
        }
    }
}
