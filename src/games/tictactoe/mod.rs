//! Tic-tac-toe: grid, referee, game state and prompt notation.

mod action;
mod notation;
mod referee;
mod rules;
mod state;
mod types;

pub use action::{Move, MoveError};
pub use notation::{ParseFailure, describe_board, parse_move};
pub use referee::Referee;
pub use rules::{LINES, check_winner, is_draw, is_full, winners};
pub use state::GameState;
pub use types::{GRID_SIZE, Grid, MAX_MOVES, Mark, Outcome, Square};
