//! First-class action and error types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent a player's
//! intent and can be validated independently of execution.

use super::Mark;
use super::position::Position;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Board index (0-8).
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, index: usize) -> Self {
        Self { mark, index }
    }

    /// Returns the named position of this move, if the index is on the board.
    pub fn position(&self) -> Option<Position> {
        Position::from_index(self.index)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position() {
            Some(pos) => write!(f, "{} -> {}", self.mark, pos.label()),
            None => write!(f, "{} -> #{}", self.mark, self.index),
        }
    }
}

/// Why a placement was refused by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IllegalReason {
    /// Index outside 0-8.
    #[display("index {} is off the board", _0)]
    OutOfRange(usize),
    /// The square already holds a mark.
    #[display("square {} is already occupied", _0)]
    Occupied(usize),
    /// The board already has a decided outcome.
    #[display("the round is not active")]
    RoundNotActive,
}

/// Error that can occur when validating or applying a command.
///
/// Every variant is recoverable: the rejected command leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The board refused the placement.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalReason),

    /// It's not this mark's turn.
    #[display("It's {}'s turn, not {}'s", expected, actual)]
    InvalidTurn {
        /// Mark whose turn it is.
        expected: Mark,
        /// Mark that tried to move.
        actual: Mark,
    },

    /// The round is over (or was never started).
    #[display("Round is already over")]
    RoundAlreadyOver,

    /// No hint can be given right now.
    #[display("Hint unavailable")]
    HintUnavailable,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
