//! Tic-tac-toe: board, rules, engines and the round controller.

mod action;
mod contracts;
mod controller;
mod heuristic;
mod invariants;
mod position;
mod round;
mod rules;
mod search;
mod types;

pub use action::{IllegalReason, Move, MoveError};
pub use contracts::{Contract, LegalMove, MoveContract};
pub use controller::{
    ControllerSettings, Difficulty, MoveReport, OpponentMode, RoundController, ScheduledMove,
};
pub use heuristic::{Pick, heuristic_move};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, RoundInvariants};
pub use position::Position;
pub use round::{Phase, RoundState};
pub use rules::{
    Outcome, WIN_LINES, WinLine, check_winner, completes_line, evaluate, is_draw, is_full,
    winning_line,
};
pub use search::{WIN_SCORE, best_move, score_moves};
pub use types::{BOARD_SIZE, Board, Mark, Square};
