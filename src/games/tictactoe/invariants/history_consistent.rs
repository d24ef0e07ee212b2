//! History consistency invariant: history, board and phase agree.

use super::super::RoundState;
use super::super::round::Phase;
use super::super::rules::evaluate;
use super::Invariant;

/// Invariant: one history entry per occupied square, and the phase matches
/// what the board says (active iff the board is undecided).
pub struct HistoryConsistentInvariant;

impl Invariant<RoundState> for HistoryConsistentInvariant {
    fn holds(state: &RoundState) -> bool {
        let occupied = 9 - state.board().empty_indices().count();
        if occupied != state.history().len() {
            return false;
        }

        let outcome = evaluate(state.board());
        match state.phase() {
            Phase::Idle => state.history().is_empty(),
            Phase::InRound => !outcome.is_terminal(),
            Phase::RoundOver(recorded) => recorded == outcome,
        }
    }

    fn description() -> &'static str {
        "History and phase are consistent with the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Move, Square};

    #[test]
    fn test_finished_round_holds() {
        let mut state = RoundState::start(Mark::X);
        for (idx, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)] {
            state.apply(Move::new(mark, idx)).unwrap();
        }
        assert!(!state.is_active());
        assert!(HistoryConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_extra_mark_violates() {
        let mut state = RoundState::start(Mark::X);
        state.apply(Move::new(Mark::X, 4)).unwrap();
        state.board_mut().set(8, Square::Occupied(Mark::O));
        assert!(!HistoryConsistentInvariant::holds(&state));
    }
}
