//! Line commands typed at the terminal host.

use tracing::instrument;
use unbeatable_tictactoe::Position;

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Click a cell.
    Cell(Position),
    /// Press "New Game".
    NewGame,
    /// Press "Clear" on the scoreboard.
    ClearScores,
    /// Print the scoreboard.
    ShowScores,
    /// Print the command list.
    Help,
    /// Leave the host.
    Quit,
}

/// Parses one input line. Returns `None` for anything unrecognised.
///
/// Cells are numbered 1-9 as drawn on the board; cell labels such as
/// `center` work too.
#[instrument]
pub fn parse_input(line: &str) -> Option<Input> {
    let word = line.trim().to_lowercase();
    match word.as_str() {
        "" => None,
        "n" | "new" => Some(Input::NewGame),
        "c" | "clear" => Some(Input::ClearScores),
        "s" | "scores" => Some(Input::ShowScores),
        "h" | "help" | "?" => Some(Input::Help),
        "q" | "quit" | "exit" => Some(Input::Quit),
        other => Position::from_cell_number_or_label(other).map(Input::Cell),
    }
}

/// Command summary printed by [`Input::Help`].
pub const HELP: &str = "Commands: 1-9 play a cell, n new game, c clear scores, s scores, q quit";
