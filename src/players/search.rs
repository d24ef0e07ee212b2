//! Player backed by the exhaustive search.

use super::Player;
use crate::games::tictactoe::{Board, Mark, best_move};
use tracing::debug;

/// Plays the minimax-optimal move.
#[derive(Debug, Clone)]
pub struct SearchPlayer {
    name: String,
}

impl SearchPlayer {
    /// Creates a new search player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for SearchPlayer {
    fn choose(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        let choice = best_move(board, mark);
        debug!(player = %self.name, ?choice, "Search player chose");
        choice
    }

    fn name(&self) -> &str {
        &self.name
    }
}
