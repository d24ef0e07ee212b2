//! Move sources that can drive either side of a round.

mod heuristic;
mod search;

pub use heuristic::HeuristicPlayer;
pub use search::SearchPlayer;

use crate::games::tictactoe::{Board, Difficulty, Mark};

/// Trait for players that can pick moves.
pub trait Player {
    /// Picks the index (0-8) to play for `mark`, or `None` if none is legal.
    fn choose(&mut self, board: &Board, mark: Mark) -> Option<usize>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Builds the computer player for `difficulty`.
pub fn computer(difficulty: Difficulty, seed: Option<u64>) -> Box<dyn Player> {
    match difficulty {
        Difficulty::Hard => Box::new(SearchPlayer::new("Minimax")),
        Difficulty::Easy => Box::new(HeuristicPlayer::new("Greedy", seed)),
    }
}
