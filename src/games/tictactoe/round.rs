//! Live round state: board, turn, phase and move history.

use super::action::{Move, MoveError};
use super::rules::{Outcome, evaluate};
use super::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Round lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round has been started.
    Idle,
    /// Moves are accepted.
    InRound,
    /// Terminal; holds the final outcome.
    RoundOver(Outcome),
}

/// State of one round.
///
/// Only the round controller mutates it; everyone else sees clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    board: Board,
    turn: Mark,
    starting_mark: Mark,
    phase: Phase,
    history: Vec<Move>,
}

impl RoundState {
    /// State before any round is started.
    pub fn idle(starting_mark: Mark) -> Self {
        Self {
            board: Board::new(),
            turn: starting_mark,
            starting_mark,
            phase: Phase::Idle,
            history: Vec::new(),
        }
    }

    /// Fresh round with an empty board and `starting_mark` to move.
    pub fn start(starting_mark: Mark) -> Self {
        Self {
            phase: Phase::InRound,
            ..Self::idle(starting_mark)
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move (or that made the final move, once the round is over).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Mark that opened this round.
    pub fn starting_mark(&self) -> Mark {
        self.starting_mark
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::InRound
    }

    /// Outcome of the board as it stands.
    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::RoundOver(outcome) => outcome,
            _ => evaluate(&self.board),
        }
    }

    /// Mark to move next, `None` unless the round is active.
    pub fn next_turn(&self) -> Option<Mark> {
        self.is_active().then_some(self.turn)
    }

    /// Applies a validated move (use the contract preconditions first).
    ///
    /// Ends the round on a terminal outcome; otherwise hands the turn over.
    pub(super) fn apply(&mut self, action: Move) -> Result<Outcome, MoveError> {
        self.board.place_in(action.index, action.mark)?;
        self.history.push(action);

        let outcome = evaluate(&self.board);
        if outcome.is_terminal() {
            self.phase = Phase::RoundOver(outcome);
        } else {
            self.turn = action.mark.opponent();
        }
        Ok(outcome)
    }

    /// Hands the opening move to `mark`. Only valid before the first move.
    pub(super) fn reassign_opener(&mut self, mark: Mark) {
        debug_assert!(self.history.is_empty());
        self.starting_mark = mark;
        self.turn = mark;
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
