//! Betting session owned by the caller and threaded through each game.

use crate::games::tictactoe::{Mark, Outcome};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Result of settling a bet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Settlement {
    /// The chosen side won; the stake was added to the balance.
    Won(f64),
    /// The other side won; the stake was removed from the balance.
    Lost(f64),
    /// Draw; the balance is unchanged.
    Push,
}

/// Wallet balance plus the bet riding on the current game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingSession {
    balance: f64,
    stake: Option<f64>,
    side: Option<Mark>,
    in_progress: bool,
}

impl BettingSession {
    /// Opens a session with `starting_balance`.
    #[instrument]
    pub fn new(starting_balance: f64) -> Self {
        Self {
            balance: starting_balance,
            stake: None,
            side: None,
            in_progress: false,
        }
    }

    /// Current wallet balance.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Amount staked on the next or current game.
    pub fn stake(&self) -> Option<f64> {
        self.stake
    }

    /// Side the bet is on.
    pub fn side(&self) -> Option<Mark> {
        self.side
    }

    /// Whether a game is running against this session.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Places (or replaces) a bet of `amount` on `side`.
    ///
    /// # Errors
    ///
    /// Fails while a game is in progress, or when `amount` is below
    /// `min_bet` or above the balance.
    #[instrument(skip(self), fields(balance = self.balance))]
    pub fn place_bet(
        &mut self,
        amount: f64,
        side: Mark,
        min_bet: f64,
    ) -> Result<(), SessionError> {
        if self.in_progress {
            return Err(SessionError::new("Cannot bet while a game is in progress"));
        }
        if !amount.is_finite() || amount < min_bet {
            return Err(SessionError::new(format!("Bet must be at least {:.2}", min_bet)));
        }
        if amount > self.balance {
            return Err(SessionError::new(format!(
                "Bet {:.2} exceeds balance {:.2}",
                amount, self.balance
            )));
        }
        self.stake = Some(amount);
        self.side = Some(side);
        info!(amount, %side, "Bet placed");
        Ok(())
    }

    /// Marks the session as having a game running.
    ///
    /// # Errors
    ///
    /// Fails if no bet has been placed or a game is already running.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.in_progress {
            return Err(SessionError::new("A game is already in progress"));
        }
        if self.stake.is_none() || self.side.is_none() {
            return Err(SessionError::new("Place a bet before starting a game"));
        }
        self.in_progress = true;
        Ok(())
    }

    /// Settles the bet against `outcome` and clears it.
    ///
    /// # Errors
    ///
    /// Fails if no game is in progress or `outcome` is not terminal.
    #[instrument(skip(self), fields(balance = self.balance))]
    pub fn settle(&mut self, outcome: Outcome) -> Result<Settlement, SessionError> {
        if !self.in_progress {
            return Err(SessionError::new("No game in progress to settle"));
        }
        if !outcome.is_terminal() {
            return Err(SessionError::new("Cannot settle a game still in progress"));
        }
        let (Some(stake), Some(side)) = (self.stake, self.side) else {
            return Err(SessionError::new("No bet to settle"));
        };

        let settlement = match outcome.winner() {
            Some(winner) if winner == side => {
                self.balance += stake;
                Settlement::Won(stake)
            }
            Some(_) => {
                self.balance -= stake;
                Settlement::Lost(stake)
            }
            None => Settlement::Push,
        };

        self.abandon();
        info!(?settlement, balance = self.balance, "Bet settled");
        Ok(settlement)
    }

    /// Drops the current bet and game without moving money.
    pub fn abandon(&mut self) {
        if self.stake.is_some() && self.in_progress {
            warn!(stake = ?self.stake, "Clearing bet");
        }
        self.stake = None;
        self.side = None;
        self.in_progress = false;
    }
}

/// Betting session error.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", message, file, line)]
pub struct SessionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(side: Mark, amount: f64) -> BettingSession {
        let mut session = BettingSession::new(100.0);
        session.place_bet(amount, side, 2.0).unwrap();
        session.begin().unwrap();
        session
    }

    #[test]
    fn test_win_adds_stake() {
        let mut session = running(Mark::X, 10.0);
        assert_eq!(session.settle(Outcome::XWins).unwrap(), Settlement::Won(10.0));
        assert_eq!(session.balance(), 110.0);
        assert!(!session.in_progress());
        assert_eq!(session.stake(), None);
    }

    #[test]
    fn test_loss_removes_stake() {
        let mut session = running(Mark::X, 25.0);
        assert_eq!(session.settle(Outcome::OWins).unwrap(), Settlement::Lost(25.0));
        assert_eq!(session.balance(), 75.0);
    }

    #[test]
    fn test_draw_is_push() {
        let mut session = running(Mark::O, 25.0);
        assert_eq!(session.settle(Outcome::Draw).unwrap(), Settlement::Push);
        assert_eq!(session.balance(), 100.0);
    }

    #[test]
    fn test_bet_limits() {
        let mut session = BettingSession::new(50.0);
        assert!(session.place_bet(1.0, Mark::X, 2.0).is_err());
        assert!(session.place_bet(50.5, Mark::X, 2.0).is_err());
        assert!(session.place_bet(f64::NAN, Mark::X, 2.0).is_err());
        assert!(session.place_bet(50.0, Mark::X, 2.0).is_ok());
    }

    #[test]
    fn test_no_bet_changes_mid_game() {
        let mut session = running(Mark::X, 10.0);
        assert!(session.place_bet(5.0, Mark::O, 2.0).is_err());
        assert!(session.begin().is_err());
        assert!(session.settle(Outcome::InProgress).is_err());
    }

    #[test]
    fn test_begin_requires_bet() {
        assert!(BettingSession::new(100.0).begin().is_err());
    }
}
