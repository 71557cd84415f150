//! Score-record collaborator: win counters that outlive a single game.

mod error;
mod record;
mod store;

pub use error::StoreError;
pub use record::{COMPUTER_WINS_KEY, HUMAN_WINS_KEY, ScoreEvent, ScoreRecord, Scoreboard, Tally};
pub use store::{KeyValueStore, MemoryStore};
