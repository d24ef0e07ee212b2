//! Tic-tac-toe round engine
//!
//! A two-player 3x3 game with an optional computer opponent.
//!
//! # Architecture
//!
//! - **Board / rules**: grid storage, legality, win and draw detection
//! - **Engines**: exhaustive minimax search and a greedy one-ply heuristic
//! - **Round controller**: turn and round state machine; computer moves are
//!   handed out as cancellable, delayed tickets
//! - **Session**: text command loop with a score tally, used by the binary
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{ControllerSettings, Mark, RoundController};
//!
//! let mut controller = RoundController::new(ControllerSettings {
//!     opponent_enabled: false,
//!     ..ControllerSettings::default()
//! });
//! controller.start_round(Mark::X);
//! let report = controller.submit_move(4, Mark::X).unwrap();
//! assert_eq!(report.next_turn, Some(Mark::O));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
mod orchestrator;
pub mod players;
mod session;
mod tally;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Self-play
pub use orchestrator::Orchestrator;

// Crate-level exports - Interactive session
pub use session::{Command, GameSession, ParseCommandError, run_session};

// Crate-level exports - Scores
pub use tally::ScoreTally;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BOARD_SIZE, Board, Contract, ControllerSettings, Difficulty, IllegalReason, Invariant,
    InvariantSet, InvariantViolation, LegalMove, Mark, Move, MoveContract, MoveError, MoveReport,
    OpponentMode, Outcome, Phase, Pick, Position, RoundController, RoundInvariants, RoundState,
    ScheduledMove, Square, WIN_LINES, WIN_SCORE, WinLine, best_move, check_winner,
    completes_line, evaluate, heuristic_move, is_draw, is_full, score_moves, winning_line,
};
