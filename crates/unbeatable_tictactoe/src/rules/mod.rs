//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are kept apart from board
//! storage so the search engine and the controller share one definition
//! of a win and a draw.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, WinLine, check_winner, has_line, winning_line};

use crate::outcome::Outcome;
use crate::types::Board;

/// Derives the outcome of a board.
///
/// A completed line takes precedence over a full board.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
