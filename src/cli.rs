//! Command-line interface for the tic-tac-toe engine.

use clap::{Parser, Subcommand};
use tictactoe_engine::{Difficulty, Mark};

/// Tic-tac-toe with a minimax or greedy computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe round engine with computer opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "tictactoe.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on stdin/stdout
    Play {
        /// Computer strength (overrides config)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Play against another human instead of the computer
        #[arg(long)]
        two_player: bool,

        /// Mark the computer plays (overrides config)
        #[arg(long)]
        computer_mark: Option<Mark>,

        /// Delay before computer moves, in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for random choices (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Print one JSON report per transition instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Pit two engines against each other
    Selfplay {
        /// Number of rounds
        #[arg(short, long, default_value = "10")]
        rounds: u32,

        /// Engine playing X
        #[arg(long, default_value = "hard")]
        x: Difficulty,

        /// Engine playing O
        #[arg(long, default_value = "easy")]
        o: Difficulty,

        /// Seed for random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score every move on a board
    Analyze {
        /// Nine cells, row-major: X, O, or . for empty (e.g. "XX.OO....")
        board: String,

        /// Mark to move
        #[arg(short, long, default_value = "X")]
        mark: Mark,
    },
}
