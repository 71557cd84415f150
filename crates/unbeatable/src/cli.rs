//! Command-line interface for unbeatable.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use unbeatable_tictactoe::FirstMover;

/// Unbeatable - tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Tic-tac-toe against a perfect minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "unbeatable.toml", global = true)]
    pub config: PathBuf,

    /// Score file (overrides config)
    #[arg(long, global = true)]
    pub scores: Option<PathBuf>,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Milliseconds before the computer's reply appears (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Who opens each game: random, human or computer (overrides config)
        #[arg(long)]
        first: Option<FirstMover>,
    },

    /// Print the win counters
    Scores,

    /// Remove both win counters
    ClearScores,
}
