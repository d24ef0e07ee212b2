//! Tic-tac-toe - command-line driver
//!
//! Plays interactive rounds, runs engine self-play, or analyses a board.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_engine::{
    Board, Difficulty, EngineConfig, GameSession, Mark, Orchestrator, Pick, evaluate,
    heuristic_move, players, run_session, score_moves,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            difficulty,
            two_player,
            computer_mark,
            delay_ms,
            seed,
            json,
        } => {
            let mut config = EngineConfig::load_or_default(&cli.config)?;
            if let Some(difficulty) = difficulty {
                config = config.with_difficulty(difficulty);
            }
            if two_player {
                config = config.with_opponent_enabled(false);
            }
            if let Some(mark) = computer_mark {
                config = config.with_computer_mark(mark);
            }
            if let Some(delay_ms) = delay_ms {
                config = config.with_computer_delay_ms(delay_ms);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(config, json).await
        }
        Command::Selfplay { rounds, x, o, seed } => run_selfplay(rounds, x, o, seed),
        Command::Analyze { board, mark } => run_analyze(&board, mark),
    }
}

/// Run an interactive session on stdin/stdout
#[instrument(skip(config))]
async fn run_play(config: EngineConfig, json: bool) -> Result<()> {
    info!(?config, "Starting interactive session");
    let mut session = GameSession::new(config, json);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_session(&mut session, stdin, tokio::io::stdout()).await
}

/// Run engine-versus-engine rounds
#[instrument]
fn run_selfplay(rounds: u32, x: Difficulty, o: Difficulty, seed: Option<u64>) -> Result<()> {
    // Distinct seeds so two greedy players don't mirror each other.
    let mut arena = Orchestrator::new(
        players::computer(x, seed),
        players::computer(o, seed.map(|s| s.wrapping_add(1))),
    );
    let tally = arena.run(rounds)?;
    println!("X ({x}) vs O ({o}) over {rounds} rounds: {tally}");
    Ok(())
}

/// Print minimax scores and the heuristic pick for a board
#[instrument]
fn run_analyze(text: &str, mark: Mark) -> Result<()> {
    let board = Board::from_marks(text)
        .with_context(|| format!("'{text}' is not a board: use nine of X, O or ."))?;

    println!("{}", board.display());
    println!("Outcome: {}", evaluate(&board));

    let scores = score_moves(&board, mark);
    if scores.is_empty() {
        println!("No moves for {mark}");
        return Ok(());
    }
    for (index, score) in &scores {
        println!("  cell {}: {score:+}", index + 1);
    }
    if let Some(best) = tictactoe_engine::best_move(&board, mark) {
        println!("Best for {mark}: cell {}", best + 1);
    }
    if let Some(greedy) = heuristic_move(&board, mark, Pick::First) {
        println!("Greedy pick for {mark}: cell {}", greedy + 1);
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,tictactoe_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
