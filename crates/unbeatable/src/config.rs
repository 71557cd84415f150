//! Host configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use unbeatable_tictactoe::FirstMover;

/// Settings for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HostConfig {
    /// Pause before the computer's reply is revealed, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// JSON file holding the win counters.
    #[serde(default = "default_score_file")]
    score_file: PathBuf,

    /// Who opens each game.
    #[serde(default)]
    first_mover: FirstMover,
}

#[instrument]
fn default_reply_delay_ms() -> u64 {
    u64::try_from(unbeatable_tictactoe::DEFAULT_REPLY_DELAY.as_millis()).unwrap_or(u64::MAX)
}

#[instrument]
fn default_score_file() -> PathBuf {
    PathBuf::from("unbeatable_scores.json")
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            score_file: default_score_file(),
            first_mover: FirstMover::default(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse config: {}", e))
        })?;

        info!(
            reply_delay_ms = config.reply_delay_ms,
            first_mover = %config.first_mover,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        reply_delay_ms: Option<u64>,
        score_file: Option<PathBuf>,
        first_mover: Option<FirstMover>,
    ) -> Self {
        if let Some(ms) = reply_delay_ms {
            self.reply_delay_ms = ms;
        }
        if let Some(path) = score_file {
            self.score_file = path;
        }
        if let Some(first) = first_mover {
            self.first_mover = first;
        }
        self
    }

    /// Reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
