//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a grid according
//! to tic-tac-toe rules. Rules are kept apart from grid storage so the
//! referee can compose them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winners};
