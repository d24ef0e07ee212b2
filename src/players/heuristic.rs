//! Player backed by the greedy heuristic.

use super::Player;
use crate::games::tictactoe::{Board, Mark, Pick, heuristic_move};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Plays win/block/center/corner/edge, picking corners and edges at random.
#[derive(Debug, Clone)]
pub struct HeuristicPlayer {
    name: String,
    rng: StdRng,
}

impl HeuristicPlayer {
    /// Creates a heuristic player; a seed makes its picks reproducible.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            name: name.into(),
            rng,
        }
    }
}

impl Player for HeuristicPlayer {
    fn choose(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        let choice = heuristic_move(board, mark, Pick::Random(&mut self.rng));
        debug!(player = %self.name, ?choice, "Heuristic player chose");
        choice
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_moves() {
        let board = Board::from_marks("....X....").unwrap();
        let mut a = HeuristicPlayer::new("a", Some(11));
        let mut b = HeuristicPlayer::new("b", Some(11));
        for _ in 0..5 {
            assert_eq!(a.choose(&board, Mark::O), b.choose(&board, Mark::O));
        }
    }
}
