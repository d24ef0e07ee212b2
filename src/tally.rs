//! Score tally kept by the application across rounds.

use crate::games::tictactoe::{Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Wins per mark plus draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl ScoreTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a finished round. In-progress outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => self.x_wins += 1,
            Outcome::Win { mark: Mark::O, .. } => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => return,
        }
        debug!(tally = %self, "Tally updated");
    }

    /// Wins for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Rounds counted so far.
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Zeroes every count.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} | O {} | Draws {}", self.x_wins, self.o_wins, self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::WIN_LINES;

    #[test]
    fn test_record_counts_terminal_outcomes_only() {
        let mut tally = ScoreTally::new();
        tally.record(&Outcome::Win {
            mark: Mark::O,
            line: WIN_LINES[0],
        });
        tally.record(&Outcome::Draw);
        tally.record(&Outcome::InProgress);
        assert_eq!(tally.wins(Mark::O), 1);
        assert_eq!(tally.wins(Mark::X), 0);
        assert_eq!(tally.draws(), 1);
        assert_eq!(tally.rounds(), 2);
        assert_eq!(tally.to_string(), "X 0 | O 1 | Draws 1");
    }

    #[test]
    fn test_reset() {
        let mut tally = ScoreTally::new();
        tally.record(&Outcome::Draw);
        tally.reset();
        assert_eq!(tally, ScoreTally::default());
    }
}
