//! Exhaustive minimax search.
//!
//! The tree below any 3x3 position is small enough (at most 9! leaves) to
//! walk completely, so there is no pruning and no move ordering. Every
//! recursive call works on its own board copy.

use super::rules::{Outcome, evaluate};
use super::{Board, Mark};
use tracing::{debug, instrument};

/// Score of a win reached at depth zero. Each ply costs one point, so a
/// quicker win scores higher and a later loss scores higher than an early one.
pub const WIN_SCORE: i32 = 1000;

/// Returns the optimal move for `mark`, or `None` if the board is decided or full.
///
/// Ties go to the lowest index.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &Board, mark: Mark) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (idx, score) in score_moves(board, mark) {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((idx, score));
        }
    }
    if let Some((idx, score)) = best {
        debug!(idx, score, "Search chose move");
    }
    best.map(|(idx, _)| idx)
}

/// Minimax score of every legal move for `mark`, in ascending index order.
///
/// Empty when the board is already decided.
pub fn score_moves(board: &Board, mark: Mark) -> Vec<(usize, i32)> {
    if evaluate(board).is_terminal() {
        return Vec::new();
    }
    board
        .empty_indices()
        .map(|idx| {
            let next = board.with_mark(idx, mark);
            (idx, minimax(&next, mark.opponent(), mark, 1))
        })
        .collect()
}

fn minimax(board: &Board, to_move: Mark, root: Mark, depth: i32) -> i32 {
    match evaluate(board) {
        Outcome::Win { mark, .. } if mark == root => return WIN_SCORE - depth,
        Outcome::Win { .. } => return depth - WIN_SCORE,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    // Each child is evaluated on entry, so placement skips the checks.
    let children = board
        .empty_indices()
        .map(|idx| minimax(&board.with_mark(idx, to_move), to_move.opponent(), root, depth + 1));

    if to_move == root {
        children.max().unwrap_or(0)
    } else {
        children.min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_immediate_win() {
        let board = Board::from_marks("XX. OO. ...").unwrap();
        assert_eq!(best_move(&board, Mark::X), Some(2));
        assert_eq!(best_move(&board, Mark::O), Some(5));
    }

    #[test]
    fn test_blocks_column_threat() {
        let board = Board::from_marks("X.. X.. ...").unwrap();
        assert_eq!(best_move(&board, Mark::O), Some(6));
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        let board = Board::from_marks("X.. ... ...").unwrap();
        assert_eq!(best_move(&board, Mark::O), Some(4));
    }

    #[test]
    fn test_answers_center_opening_with_corner() {
        let board = Board::from_marks("... .O. ...").unwrap();
        let mv = best_move(&board, Mark::X).unwrap();
        assert!([0, 2, 6, 8].contains(&mv), "got edge {mv}");
    }

    #[test]
    fn test_prefers_quicker_win() {
        // X can win now at 2, or set up a slower win elsewhere.
        let board = Board::from_marks("XX. .O. O..").unwrap();
        let scores = score_moves(&board, Mark::X);
        let (_, immediate) = scores.iter().find(|(idx, _)| *idx == 2).copied().unwrap();
        assert_eq!(immediate, WIN_SCORE - 1);
        assert_eq!(best_move(&board, Mark::X), Some(2));
    }

    #[test]
    fn test_delays_unavoidable_loss() {
        // O answered the corner with an edge; X threatens 0-4-8 and forks next.
        let board = Board::from_marks("XO. .X. ...").unwrap();
        let scores = score_moves(&board, Mark::O);
        assert!(scores.iter().all(|(_, s)| *s < 0), "O is lost: {scores:?}");
        for (idx, score) in &scores {
            let expected = if *idx == 8 { 4 - WIN_SCORE } else { 2 - WIN_SCORE };
            assert_eq!(*score, expected, "move {idx}");
        }
        assert_eq!(best_move(&board, Mark::O), Some(8));
    }

    #[test]
    fn test_none_on_decided_or_full_board() {
        let won = Board::from_marks("XXX OO. ...").unwrap();
        assert_eq!(best_move(&won, Mark::O), None);
        let full = Board::from_marks("XOX XOO OXX").unwrap();
        assert_eq!(best_move(&full, Mark::X), None);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // Every opening draws under perfect play, so the first square wins the tie.
        assert_eq!(best_move(&Board::new(), Mark::X), Some(0));
    }
}
