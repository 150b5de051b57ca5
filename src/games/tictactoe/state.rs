//! Mutable state of a single tic-tac-toe game.

use super::action::{Move, MoveError};
use super::referee::Referee;
use super::types::{Grid, MAX_MOVES, Mark, Outcome};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument};

/// Grid, turn marker and move counter for one game.
///
/// The grid changes only through [`GameState::play`], which routes every
/// write through the [`Referee`]. A rejected move leaves the turn marker
/// and the counter where they were, so the same player simply tries again.
///
/// Deserializing replays the saved `history` through [`GameState::play`];
/// the saved grid, turn marker and counter are recomputed, not trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    grid: Grid,
    current_turn: Mark,
    move_count: usize,
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new game: empty grid, X to move, no moves played.
    #[instrument]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            current_turn: Mark::X,
            move_count: 0,
            history: Vec::new(),
        }
    }

    /// Starts over with an empty grid and X to move.
    #[instrument(skip(self), fields(discarded_moves = self.move_count))]
    pub fn reset(&mut self) {
        self.grid.clear();
        self.current_turn = Mark::X;
        self.move_count = 0;
        self.history.clear();
        debug!("Game state reset");
    }

    /// Returns the mark expected to move next.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// Returns the number of accepted moves.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Evaluates the grid, forcing a draw once the move budget is spent.
    pub fn outcome(&self) -> Outcome {
        match Referee::evaluate(&self.grid) {
            Outcome::InProgress if self.move_count >= MAX_MOVES => Outcome::Draw,
            outcome => outcome,
        }
    }

    /// Plays `mv` for the mark whose turn it is and returns the new outcome.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game is decided, or the
    /// referee's rejection. Neither changes the state.
    #[instrument(skip(self), fields(mark = %self.current_turn, row = mv.row, col = mv.col))]
    pub fn play(&mut self, mv: Move) -> Result<Outcome, MoveError> {
        if self.outcome().is_terminal() {
            return Err(MoveError::GameOver);
        }

        Referee::validate(&self.grid, mv)?;
        Referee::apply(&mut self.grid, mv, self.current_turn)?;
        self.move_count += 1;
        self.history.push(mv);

        let outcome = self.outcome();
        if outcome.is_terminal() {
            info!(%outcome, moves = self.move_count, "Game finished");
        } else {
            self.current_turn = self.current_turn.opponent();
        }
        Ok(outcome)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for GameState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct MoveLog {
            history: Vec<Move>,
        }

        let log = MoveLog::deserialize(deserializer)?;
        let mut state = Self::new();
        for mv in log.history {
            state.play(mv).map_err(serde::de::Error::custom)?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::Square;
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.current_turn(), Mark::X);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_turn_alternates_on_accepted_moves() {
        let mut state = GameState::new();
        state.play(Move::new(1, 1)).unwrap();
        assert_eq!(state.current_turn(), Mark::O);
        state.play(Move::new(0, 0)).unwrap();
        assert_eq!(state.current_turn(), Mark::X);
        assert_eq!(state.move_count(), 2);
    }

    #[test]
    fn test_rejected_move_keeps_turn_and_counter() {
        let mut state = GameState::new();
        state.play(Move::new(1, 1)).unwrap();

        assert!(state.play(Move::new(1, 1)).is_err());
        assert!(state.play(Move::new(5, 1)).is_err());

        assert_eq!(state.current_turn(), Mark::O);
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.history(), &[Move::new(1, 1)]);
    }

    #[test]
    fn test_finished_game_refuses_moves() {
        let mut state = GameState::new();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            state.play(Move::new(r, c)).unwrap();
        }
        assert_eq!(state.play(Move::new(0, 2)), Ok(Outcome::XWins));
        // Winner keeps the turn marker.
        assert_eq!(state.current_turn(), Mark::X);
        assert_eq!(state.play(Move::new(2, 2)), Err(MoveError::GameOver));
        assert_eq!(state.move_count(), 5);
    }

    #[test]
    fn test_saved_game_restores_by_replay() {
        let mut state = GameState::new();
        state.play(Move::new(1, 1)).unwrap();
        state.play(Move::new(0, 2)).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_saved_counters_are_not_trusted() {
        let json = r#"{"grid":{"cells":[["Empty","Empty","Empty"],["Empty","Empty","Empty"],["Empty","Empty","Empty"]]},"current_turn":"O","move_count":7,"history":[{"row":0,"col":0}]}"#;
        let restored: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(restored.move_count(), 1);
        assert_eq!(restored.current_turn(), Mark::O);
        assert_eq!(restored.grid().get(0, 0), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_saved_illegal_history_rejected() {
        let json = r#"{"history":[{"row":1,"col":1},{"row":1,"col":1}]}"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());

        let json = r#"{"history":[{"row":3,"col":0}]}"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GameState::new();
        state.play(Move::new(0, 0)).unwrap();
        state.play(Move::new(2, 2)).unwrap();
        state.reset();
        assert_eq!(state, GameState::new());
    }
}
