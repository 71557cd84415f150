//! Win counters persisted through a [`KeyValueStore`].

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{KeyValueStore, StoreError};
use crate::types::Player;

/// Store key holding the human's win count.
pub const HUMAN_WINS_KEY: &str = "PlayerOneWins";

/// Store key holding the computer's win count.
pub const COMPUTER_WINS_KEY: &str = "PlayerTwoWins";

/// What the game core needs from a score keeper.
///
/// The core only ever writes; reading the counters is the scoreboard
/// display's business.
pub trait ScoreRecord {
    /// Adds one win for `winner`.
    fn record_win(&mut self, winner: Player) -> Result<(), StoreError>;

    /// Removes both counters.
    fn clear_scores(&mut self) -> Result<(), StoreError>;
}

/// Current win counts for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters, new)]
pub struct Tally {
    /// Games won by the human.
    human_wins: u32,
    /// Games won by the computer.
    computer_wins: u32,
}

impl Tally {
    /// Returns the win count for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::Human => self.human_wins,
            Player::Computer => self.computer_wins,
        }
    }
}

/// Change notification delivered to scoreboard subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// A win was recorded; `tally` includes it.
    Won {
        /// Who won.
        winner: Player,
        /// Counters after the update.
        tally: Tally,
    },
    /// Both counters were removed.
    Cleared,
}

type Observer = Box<dyn FnMut(&ScoreEvent)>;

/// Persistent scoreboard with change notifications.
pub struct Scoreboard<S> {
    store: S,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> Scoreboard<S> {
    /// Creates a scoreboard over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            observers: Vec::new(),
        }
    }

    /// Registers a callback invoked after every successful change.
    pub fn subscribe(&mut self, observer: impl FnMut(&ScoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads both counters. Missing counters read as zero.
    #[instrument(skip(self))]
    pub fn tally(&self) -> Result<Tally, StoreError> {
        Ok(Tally::new(
            self.read_counter(HUMAN_WINS_KEY)?,
            self.read_counter(COMPUTER_WINS_KEY)?,
        ))
    }

    fn read_counter(&self, key: &str) -> Result<u32, StoreError> {
        match self.store.get(key)? {
            None => Ok(0),
            Some(raw) => raw.trim().parse().map_err(|e| {
                StoreError::new(format!("Counter {} holds {:?}: {}", key, raw, e))
            }),
        }
    }

    fn notify(&mut self, event: ScoreEvent) {
        debug!(?event, observers = self.observers.len(), "Notifying observers");
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

impl<S: KeyValueStore> ScoreRecord for Scoreboard<S> {
    #[instrument(skip(self))]
    fn record_win(&mut self, winner: Player) -> Result<(), StoreError> {
        let key = match winner {
            Player::Human => HUMAN_WINS_KEY,
            Player::Computer => COMPUTER_WINS_KEY,
        };
        // Both counters are read before anything is written.
        let before = self.tally()?;
        let wins = before
            .wins(winner)
            .checked_add(1)
            .ok_or_else(|| StoreError::new(format!("Counter {} overflowed", key)))?;
        let tally = match winner {
            Player::Human => Tally::new(wins, before.computer_wins),
            Player::Computer => Tally::new(before.human_wins, wins),
        };
        self.store.set(key, wins.to_string())?;

        info!(%winner, wins, "Win recorded");
        self.notify(ScoreEvent::Won { winner, tally });
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear_scores(&mut self) -> Result<(), StoreError> {
        self.store.remove(HUMAN_WINS_KEY)?;
        self.store.remove(COMPUTER_WINS_KEY)?;
        info!("Scores cleared");
        self.notify(ScoreEvent::Cleared);
        Ok(())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Scoreboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard")
            .field("store", &self.store)
            .field("observers", &self.observers.len())
            .finish()
    }
}
