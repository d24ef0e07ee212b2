//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three board indices that win when held by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([usize; 3]);

impl WinLine {
    /// The indices of this line, in ascending order.
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// True if `idx` lies on this line.
    pub fn contains(&self, idx: usize) -> bool {
        self.0.contains(&idx)
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "[{a}, {b}, {c}]")
    }
}

/// The eight winning lines, checked in this order.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    // Columns
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    // Diagonals
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

/// Returns the first completed line and its owner.
///
/// Lines are scanned in [`WIN_LINES`] order, so if more than one line is
/// complete (impossible in legal play) the earliest one is reported.
#[instrument(level = "trace")]
pub fn winning_line(board: &Board) -> Option<(Mark, WinLine)> {
    let squares = board.squares();
    WIN_LINES.iter().find_map(|line| {
        let [a, b, c] = line.indices();
        match squares[a] {
            Square::Occupied(mark) if squares[b] == squares[a] && squares[c] == squares[a] => {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark has three in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

/// True if placing `mark` on the empty square `idx` completes a line for it.
pub fn completes_line(board: &Board, idx: usize, mark: Mark) -> bool {
    if !board.is_empty(idx) {
        return false;
    }
    let squares = board.squares();
    let held = Square::Occupied(mark);
    WIN_LINES
        .iter()
        .filter(|line| line.contains(idx))
        .any(|line| line.indices().iter().all(|&i| i == idx || squares[i] == held))
}
