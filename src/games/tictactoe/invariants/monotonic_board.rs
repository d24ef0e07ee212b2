//! Monotonic board invariant: squares never change once set.

use super::super::{Board, RoundState};
use super::Invariant;

/// Invariant: board squares are monotonic (never overwritten).
///
/// Verified by replaying the move history onto an empty board and comparing.
pub struct MonotonicBoardInvariant;

impl Invariant<RoundState> for MonotonicBoardInvariant {
    fn holds(state: &RoundState) -> bool {
        let mut reconstructed = Board::new();

        for mov in state.history() {
            // Square must be empty before placing
            if !reconstructed.is_empty(mov.index) {
                return false;
            }
            if reconstructed.place_in(mov.index, mov.mark).is_err() {
                return false;
            }
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Move, Square};

    #[test]
    fn test_fresh_round_holds() {
        let state = RoundState::start(Mark::X);
        assert!(MonotonicBoardInvariant::holds(&state));
    }

    #[test]
    fn test_multiple_moves_hold() {
        let mut state = RoundState::start(Mark::X);
        for (idx, mark) in [(0, Mark::X), (4, Mark::O), (2, Mark::X), (6, Mark::O)] {
            state.apply(Move::new(mark, idx)).unwrap();
        }
        assert!(MonotonicBoardInvariant::holds(&state));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut state = RoundState::start(Mark::X);
        state.apply(Move::new(Mark::X, 4)).unwrap();
        state.board_mut().set(4, Square::Occupied(Mark::O));
        assert!(!MonotonicBoardInvariant::holds(&state));
    }
}
