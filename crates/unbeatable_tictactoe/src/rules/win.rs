//! Win detection logic for tic-tac-toe.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::types::{Board, Player, Square};

/// The eight winning lines: rows, columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the player owning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine {
    /// Owner of all three cells.
    pub player: Player,
    /// The three cells, in [`LINES`] order.
    pub cells: [Position; 3],
}

impl WinLine {
    /// Returns true if the position is one of the three winning cells.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// Returns true if `player` owns any complete line.
pub fn has_line(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == mark))
}

/// Returns the first completed line in [`LINES`] order.
pub fn winning_line(board: &Board) -> Option<WinLine> {
    LINES.iter().find_map(|&[a, b, c]| match board.get(a) {
        Square::Occupied(player) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
            Some(WinLine {
                player,
                cells: [a, b, c],
            })
        }
        _ => None,
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|line| line.player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::Human));
        board.set(Position::TopCenter, Square::Occupied(Player::Human));
        board.set(Position::TopRight, Square::Occupied(Player::Human));
        assert_eq!(check_winner(&board), Some(Player::Human));
        assert!(has_line(&board, Player::Human));
        assert!(!has_line(&board, Player::Computer));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "X_O XO_ O__".parse().unwrap();
        let line = winning_line(&board).expect("diagonal is complete");
        assert_eq!(line.player, Player::Computer);
        assert_eq!(
            line.cells,
            [Position::TopRight, Position::Center, Position::BottomLeft]
        );
        assert!(line.contains(Position::Center));
        assert!(!line.contains(Position::TopLeft));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::Human));
        board.set(Position::TopCenter, Square::Occupied(Player::Human));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_line_detected() {
        for line in LINES {
            let mut board = Board::new();
            for pos in line {
                board.set(pos, Square::Occupied(Player::Computer));
            }
            assert_eq!(winning_line(&board).map(|l| l.cells), Some(line));
        }
    }
}
