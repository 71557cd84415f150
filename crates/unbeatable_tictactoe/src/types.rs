//! Core domain types for tic-tac-toe.

use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::position::Position;

/// A side in the game.
///
/// The human always plays `X` and the computer always plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The human at the keyboard, marks `X`.
    #[display("X")]
    Human,
    /// The search engine, marks `O`.
    #[display("O")]
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Returns the mark this player places on the board.
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Iterates over the empty positions in index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |&pos| self.is_empty(pos))
    }

    /// Counts the marks a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(player))
            .count()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|&s| s != Square::Empty)
    }

    /// Checks that the position could arise in play.
    ///
    /// Either side may open, so the mark counts differ by at most one,
    /// and at most one player may own a completed line.
    #[instrument]
    pub fn is_legal(&self) -> bool {
        let humans = self.count(Player::Human);
        let computers = self.count(Player::Computer);
        if humans.abs_diff(computers) > 1 {
            return false;
        }
        !(crate::rules::has_line(self, Player::Human)
            && crate::rules::has_line(self, Player::Computer))
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
                    Square::Occupied(player) => player.mark().to_string(),
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

/// Error returned when a board cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character that is neither a mark nor an empty-cell marker.
    #[display("Unexpected character {found:?} for cell {cell}")]
    InvalidCell {
        /// The offending character.
        found: char,
        /// Zero-based cell the character would have filled.
        cell: usize,
    },
    /// The text did not describe exactly nine cells.
    #[display("Expected 9 cells, found {cells}")]
    WrongLength {
        /// Number of cells found.
        cells: usize,
    },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells in row-major order.
    ///
    /// `X` and `O` are marks (case-insensitive); `_`, `.` and digits are
    /// empty. Whitespace and the `|`, `-`, `+` separators produced by
    /// [`Board::display`] are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut cell = 0;
        for c in s.chars() {
            if c.is_whitespace() || matches!(c, '|' | '-' | '+') {
                continue;
            }
            let square = match c {
                'X' | 'x' => Square::Occupied(Player::Human),
                'O' | 'o' => Square::Occupied(Player::Computer),
                '_' | '.' => Square::Empty,
                d if d.is_ascii_digit() => Square::Empty,
                found => return Err(BoardParseError::InvalidCell { found, cell }),
            };
            if let Some(slot) = board.squares.get_mut(cell) {
                *slot = square;
            }
            cell += 1;
        }
        if cell != 9 {
            return Err(BoardParseError::WrongLength { cells: cell });
        }
        Ok(board)
    }
}
