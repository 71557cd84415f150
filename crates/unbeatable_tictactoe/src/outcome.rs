//! Game outcome derived from a board.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::types::Player;

/// Outcome of a position.
///
/// Always computed from the board by [`crate::rules::outcome`]; nothing
/// stores it alongside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// Empty squares remain and nobody has a line.
    #[display("In progress")]
    InProgress,
    /// The board is full without a line.
    #[display("Draw")]
    Draw,
    /// A player completed a line.
    #[display("Player {_0} wins")]
    Win(Player),
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// Returns true once no further move can be made.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}
