//! What a display surface needs to draw the game and route clicks.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::types::Square;

/// Status line shown under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StatusMessage {
    /// No game has been started yet.
    #[display("Click the New Game button to start a new game -->")]
    NewGame,
    /// Waiting for the human.
    #[display("It's the Human's (X) turn")]
    HumanTurn,
    /// The computer's reply is pending.
    #[display("The Computer (O) is thinking...")]
    ComputerTurn,
    /// Board full, no line.
    #[display("The game is a draw")]
    Draw,
    /// Human completed a line.
    #[display("Human (X) wins")]
    HumanWins,
    /// Computer completed a line.
    #[display("Computer (O) wins")]
    ComputerWins,
}

/// Render state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Which cell.
    pub position: Position,
    /// Its current content.
    pub square: Square,
    /// Whether a click here would currently be accepted.
    pub clickable: bool,
    /// Whether the cell belongs to the winning line.
    pub winning: bool,
}
