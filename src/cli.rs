//! Command-line interface for tictactoe_arena.

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_arena::Mark;

/// Tic-tac-toe arena - bet on LLM agents playing each other
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arena")]
#[command(about = "Watch two LLM agents play tic-tac-toe and bet on the winner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Side to bet on.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Bet on X
    X,
    /// Bet on O
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game between two LLM agents
    Play {
        /// Path to arena configuration file
        #[arg(short, long, default_value = "arena.toml")]
        config: std::path::PathBuf,

        /// Amount to bet
        #[arg(short, long)]
        bet: f64,

        /// Side to bet on
        #[arg(short, long, value_enum)]
        side: Side,

        /// Number of games to bet on with the same wallet
        #[arg(short, long, default_value = "1")]
        rounds: usize,

        /// Skip asking the LLM judge for a verdict
        #[arg(long)]
        no_judge: bool,
    },

    /// Play an offline game between two first-open-cell bots
    Demo {
        /// Amount to bet
        #[arg(short, long, default_value = "10")]
        bet: f64,

        /// Side to bet on
        #[arg(short, long, value_enum, default_value = "x")]
        side: Side,

        /// Number of games to bet on with the same wallet
        #[arg(short, long, default_value = "1")]
        rounds: usize,
    },
}
