//! Unbeatable tic-tac-toe - a computer opponent that never loses.
//!
//! # Architecture
//!
//! - **Rules**: board model, win lines and outcome derivation
//! - **Search**: exhaustive minimax returning the computer's best move
//! - **Controller**: turn state machine owning the authoritative board
//! - **Scoreboard**: win counters behind an injected key/value store
//! - **View**: per-cell render state and the status line for a host
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{
//!     Controller, FirstMover, MemoryStore, Scoreboard, Transition,
//! };
//!
//! let mut game = Controller::new(Scoreboard::new(MemoryStore::new()), FirstMover::Human);
//! game.start_new_game(&mut rand::rng());
//!
//! if let Transition::ComputerToMove(reply) = game.apply_human_move(4) {
//!     // A host would fire this after a short delay.
//!     game.apply_computer_move(reply);
//! }
//! assert_eq!(game.board().count(unbeatable_tictactoe::Player::Computer), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod controller;
mod outcome;
mod position;
mod scoreboard;
mod search;
mod types;
mod view;

pub mod rules;

// Crate-level exports - Board model
pub use outcome::Outcome;
pub use position::Position;
pub use types::{Board, BoardParseError, Player, Square};

// Crate-level exports - Rules
pub use rules::WinLine;

// Crate-level exports - Search engine
pub use search::{BestMove, COMPUTER_WINS, DRAWN, HUMAN_WINS, Score, best_move, evaluate};

// Crate-level exports - Controller
pub use controller::{
    Controller, DEFAULT_REPLY_DELAY, FirstMover, PendingReply, Phase, Rejection, Transition,
};

// Crate-level exports - Render/input boundary
pub use view::{CellView, StatusMessage};

// Crate-level exports - Scoreboard
pub use scoreboard::{
    COMPUTER_WINS_KEY, HUMAN_WINS_KEY, KeyValueStore, MemoryStore, ScoreEvent, ScoreRecord,
    Scoreboard, StoreError, Tally,
};
