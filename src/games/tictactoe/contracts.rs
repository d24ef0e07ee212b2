//! Contract-based validation for round transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{IllegalReason, Move, MoveError};
use super::invariants::{InvariantSet, RoundInvariants};
use super::round::RoundState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the round accepts moves.
pub struct RoundIsActive;

impl RoundIsActive {
    /// Fails with `RoundAlreadyOver` outside the `InRound` phase.
    pub fn check(state: &RoundState) -> Result<(), MoveError> {
        if state.is_active() {
            Ok(())
        } else {
            Err(MoveError::RoundAlreadyOver)
        }
    }
}

/// Precondition: it must be the mark's turn.
pub struct MarksTurn;

impl MarksTurn {
    /// Fails with `InvalidTurn` when another mark is to move.
    pub fn check(mov: &Move, state: &RoundState) -> Result<(), MoveError> {
        if mov.mark != state.turn() {
            Err(MoveError::InvalidTurn {
                expected: state.turn(),
                actual: mov.mark,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square exists and is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with `IllegalMove` for off-board or occupied squares.
    pub fn check(mov: &Move, state: &RoundState) -> Result<(), MoveError> {
        match state.board().get(mov.index) {
            None => Err(MoveError::IllegalMove(IllegalReason::OutOfRange(mov.index))),
            Some(square) if square.mark().is_some() => {
                Err(MoveError::IllegalMove(IllegalReason::Occupied(mov.index)))
            }
            Some(_) => Ok(()),
        }
    }
}

/// Composite precondition, checked in order: active round, right turn, free square.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &RoundState) -> Result<(), MoveError> {
        RoundIsActive::check(state)?;
        MarksTurn::check(mov, state)?;
        SquareIsEmpty::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - Board remains monotonic
/// - Marks still alternate from the opener
/// - History and phase remain consistent with the board
/// - Exactly one square was filled
pub struct MoveContract;

impl Contract<RoundState, Move> for MoveContract {
    fn pre(state: &RoundState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &RoundState, after: &RoundState) -> Result<(), MoveError> {
        let filled_before = before.board().empty_indices().count();
        let filled_after = after.board().empty_indices().count();
        if filled_before != filled_after + 1 {
            warn!(filled_before, filled_after, "Move did not fill exactly one square");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: move must fill exactly one square".to_string(),
            ));
        }

        RoundInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_precondition_empty_square() {
        let state = RoundState::start(Mark::X);
        assert!(MoveContract::pre(&state, &Move::new(Mark::X, 4)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut state = RoundState::start(Mark::X);
        state.apply(Move::new(Mark::X, 4)).unwrap();
        assert_eq!(
            MoveContract::pre(&state, &Move::new(Mark::O, 4)),
            Err(MoveError::IllegalMove(IllegalReason::Occupied(4)))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let state = RoundState::start(Mark::X);
        assert_eq!(
            MoveContract::pre(&state, &Move::new(Mark::O, 4)),
            Err(MoveError::InvalidTurn {
                expected: Mark::X,
                actual: Mark::O,
            })
        );
    }

    #[test]
    fn test_round_over_checked_before_turn() {
        let state = RoundState::idle(Mark::X);
        assert_eq!(
            MoveContract::pre(&state, &Move::new(Mark::O, 42)),
            Err(MoveError::RoundAlreadyOver)
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = RoundState::start(Mark::X);
        let mut after = before.clone();
        after.apply(Move::new(Mark::X, 0)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_rejects_unchanged_board() {
        let state = RoundState::start(Mark::X);
        assert!(matches!(
            MoveContract::post(&state, &state),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
