//! Unbeatable host - terminal front end for the tic-tac-toe controller.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Store**: JSON file backing the scoreboard's key/value store
//! - **Session**: single-threaded event loop that schedules the computer's reply

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod file_store;
mod input;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, HostConfig};

// Crate-level exports - Persistence
pub use file_store::JsonFileStore;

// Crate-level exports - Terminal host
pub use input::{HELP, Input, parse_input};
pub use session::Session;
