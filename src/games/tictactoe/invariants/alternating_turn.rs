//! Alternating turn invariant: marks take turns, starting with the opener.

use super::super::RoundState;
use super::Invariant;

/// Invariant: the history alternates marks beginning with the round's opener,
/// and while the round is active the mark to move is the one after the last.
pub struct AlternatingTurnInvariant;

impl Invariant<RoundState> for AlternatingTurnInvariant {
    fn holds(state: &RoundState) -> bool {
        let mut expected = state.starting_mark();
        for mov in state.history() {
            if mov.mark != expected {
                return false;
            }
            expected = expected.opponent();
        }

        !state.is_active() || state.turn() == expected
    }

    fn description() -> &'static str {
        "Marks alternate starting with the round's opener"
    }
}
