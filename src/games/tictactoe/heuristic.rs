//! Greedy one-ply move selection.
//!
//! Priority: win, block, center, corner, edge. No lookahead, so a fork
//! beats it. Used for the easy opponent and for easy-mode hints.

use super::position::Position;
use super::rules::completes_line;
use super::{Board, Mark};
use rand::RngCore;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// How to choose among several empty corners (or edges).
pub enum Pick<'a> {
    /// First available in index order. Stable, for hints.
    First,
    /// Uniformly at random, for actual play.
    Random(&'a mut dyn RngCore),
}

impl std::fmt::Debug for Pick<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pick::First => write!(f, "First"),
            Pick::Random(_) => write!(f, "Random"),
        }
    }
}

impl Pick<'_> {
    fn choose(self, candidates: &[usize]) -> Option<usize> {
        match self {
            Pick::First => candidates.first().copied(),
            Pick::Random(rng) => candidates.choose(rng).copied(),
        }
    }
}

/// Returns the heuristic move for `mark`, or `None` when the board is full.
#[instrument(skip(board), fields(board = %board))]
pub fn heuristic_move(board: &Board, mark: Mark, pick: Pick<'_>) -> Option<usize> {
    if let Some(idx) = board.empty_indices().find(|&i| completes_line(board, i, mark)) {
        debug!(idx, "Taking the win");
        return Some(idx);
    }

    let opponent = mark.opponent();
    if let Some(idx) = board
        .empty_indices()
        .find(|&i| completes_line(board, i, opponent))
    {
        debug!(idx, "Blocking opponent");
        return Some(idx);
    }

    let center = Position::Center.to_index();
    if board.is_empty(center) {
        return Some(center);
    }

    let corners = open_squares(board, &Position::CORNERS);
    if !corners.is_empty() {
        return pick.choose(&corners);
    }

    let edges = open_squares(board, &Position::EDGES);
    pick.choose(&edges)
}

fn open_squares(board: &Board, group: &[Position]) -> Vec<usize> {
    group
        .iter()
        .map(|pos| pos.to_index())
        .filter(|&idx| board.is_empty(idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_win_before_block() {
        // Both X and O have two in a row; X should win rather than block.
        let board = Board::from_marks("XX. OO. ...").unwrap();
        assert_eq!(heuristic_move(&board, Mark::X, Pick::First), Some(2));
    }

    #[test]
    fn test_blocks_when_no_win() {
        let board = Board::from_marks("OO. .X. ...").unwrap();
        assert_eq!(heuristic_move(&board, Mark::X, Pick::First), Some(2));
    }

    #[test]
    fn test_center_then_corner_then_edge() {
        assert_eq!(heuristic_move(&Board::new(), Mark::O, Pick::First), Some(4));

        let center_taken = Board::from_marks("... .X. ...").unwrap();
        assert_eq!(heuristic_move(&center_taken, Mark::O, Pick::First), Some(0));

        // Corners and center gone, no line is one move from completion.
        let corners_taken = Board::from_marks("XOX .X. OXO").unwrap();
        assert_eq!(heuristic_move(&corners_taken, Mark::X, Pick::First), Some(3));
    }

    #[test]
    fn test_random_pick_stays_in_group() {
        let board = Board::from_marks("... .X. ...").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let idx = heuristic_move(&board, Mark::O, Pick::Random(&mut rng)).unwrap();
            assert!([0, 2, 6, 8].contains(&idx), "picked non-corner {idx}");
        }
    }

    #[test]
    fn test_none_when_full() {
        let full = Board::from_marks("XOX XOO OXX").unwrap();
        assert_eq!(heuristic_move(&full, Mark::X, Pick::First), None);
    }
}
