//! Core domain types for tic-tac-toe.

use super::action::{IllegalReason, MoveError};
use super::rules;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// Mark placed by a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum Mark {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark on this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// The board is `Copy`: every read outside the live round works on a
/// snapshot, so engines can explore hypothetical moves freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
        }
    }

    /// Parses a board from nine characters (`X`, `O`, `.`/`_`/`-` for empty).
    ///
    /// Whitespace and `|` separators are ignored, so `"XX.|OO.|..."` works.
    pub fn from_marks(text: &str) -> Option<Self> {
        let mut board = Self::new();
        let mut idx = 0;
        for ch in text.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            if idx >= BOARD_SIZE {
                return None;
            }
            board.squares[idx] = match ch.to_ascii_uppercase() {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                _ => return None,
            };
            idx += 1;
        }
        (idx == BOARD_SIZE).then_some(board)
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, idx: usize) -> Option<Square> {
        self.squares.get(idx).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, idx: usize) -> bool {
        matches!(self.get(idx), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Empty indices in ascending order, recomputed from the current cells.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..BOARD_SIZE).filter(move |&idx| self.squares[idx] == Square::Empty)
    }

    /// True iff no empty square remains.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Returns a copy of this board with `mark` placed at `idx`.
    ///
    /// # Errors
    ///
    /// `IllegalMove` when the index is out of range, the square is occupied,
    /// or the board already has a decided outcome.
    #[instrument(skip(self), level = "trace")]
    pub fn place(&self, idx: usize, mark: Mark) -> Result<Board, MoveError> {
        let mut next = *self;
        next.place_in(idx, mark)?;
        Ok(next)
    }

    /// Places `mark` at `idx` in place. The board is untouched on failure.
    pub fn place_in(&mut self, idx: usize, mark: Mark) -> Result<(), MoveError> {
        match self.get(idx) {
            None => return Err(MoveError::IllegalMove(IllegalReason::OutOfRange(idx))),
            Some(Square::Occupied(_)) => {
                return Err(MoveError::IllegalMove(IllegalReason::Occupied(idx)));
            }
            Some(Square::Empty) => {}
        }
        if rules::evaluate(self).is_terminal() {
            return Err(MoveError::IllegalMove(IllegalReason::RoundNotActive));
        }
        self.squares[idx] = Square::Occupied(mark);
        Ok(())
    }

    /// Copy with `mark` at `idx`, without the checks [`Board::place`] makes.
    ///
    /// Only for search, which plays empty squares of undecided boards.
    pub(crate) fn with_mark(mut self, idx: usize, mark: Mark) -> Board {
        debug_assert!(self.is_empty(idx));
        self.squares[idx] = Square::Occupied(mark);
        self
    }

    /// Writes a square without any legality check.
    #[cfg(test)]
    pub(crate) fn set(&mut self, idx: usize, square: Square) {
        self.squares[idx] = square;
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in &self.squares {
            let ch = match square {
                Square::Empty => '.',
                Square::Occupied(Mark::X) => 'X',
                Square::Occupied(Mark::O) => 'O',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_indices().count(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn test_place_returns_new_board() {
        let board = Board::new();
        let next = board.place(4, Mark::X).expect("center is free");
        assert!(board.is_empty(4));
        assert_eq!(next.get(4), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_place_out_of_range() {
        let board = Board::new();
        assert_eq!(
            board.place(9, Mark::X),
            Err(MoveError::IllegalMove(IllegalReason::OutOfRange(9)))
        );
    }

    #[test]
    fn test_place_occupied_leaves_board_unchanged() {
        let mut board = Board::new();
        board.place_in(0, Mark::O).unwrap();
        let before = board;
        assert_eq!(
            board.place_in(0, Mark::X),
            Err(MoveError::IllegalMove(IllegalReason::Occupied(0)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_on_decided_board_rejected() {
        let board = Board::from_marks("XXX OO. ...").unwrap();
        assert_eq!(
            board.place(8, Mark::O),
            Err(MoveError::IllegalMove(IllegalReason::RoundNotActive))
        );
    }

    #[test]
    fn test_empty_indices_ascending() {
        let board = Board::from_marks("X.O .X. O..").unwrap();
        let empties: Vec<_> = board.empty_indices().collect();
        assert_eq!(empties, vec![1, 3, 5, 7, 8]);
        assert_eq!(empties.len() + board.count(Mark::X) + board.count(Mark::O), 9);
    }

    #[test]
    fn test_from_marks_rejects_bad_input() {
        assert!(Board::from_marks("XX").is_none());
        assert!(Board::from_marks("XXXXXXXXXX").is_none());
        assert!(Board::from_marks("XX?......").is_none());
    }

    #[test]
    fn test_display_round_trips_through_from_marks() {
        let board = Board::from_marks("XO. .X. ..O").unwrap();
        assert_eq!(board.to_string(), "XO..X...O");
        assert_eq!(Board::from_marks(&board.to_string()), Some(board));
    }

    #[test]
    fn test_text_grid_shows_cell_numbers() {
        let board = Board::from_marks("X........").unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_with_mark_matches_place_on_open_boards() {
        let board = Board::from_marks("XO. .X. ...").unwrap();
        for idx in board.empty_indices() {
            assert_eq!(Ok(board.with_mark(idx, Mark::O)), board.place(idx, Mark::O));
        }
    }
}
