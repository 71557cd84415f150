//! Key/value store persisted as a JSON object on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use unbeatable_tictactoe::{KeyValueStore, StoreError};

/// JSON-file backed [`KeyValueStore`].
///
/// The whole map is rewritten on every change. The file is created on the
/// first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, reading existing entries if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or is
    /// not a JSON object of strings.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                StoreError::new(format!("Failed to read '{}': {}", path.display(), e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                StoreError::new(format!("Failed to parse '{}': {}", path.display(), e))
            })?
        } else {
            debug!("Score file missing, starting empty");
            BTreeMap::new()
        };

        info!(entries = entries.len(), "Score store opened");
        Ok(Self { path, entries })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StoreError::new(format!("Failed to encode scores: {}", e)))?;
        std::fs::write(&self.path, content).map_err(|e| {
            StoreError::new(format!("Failed to write '{}': {}", self.path.display(), e))
        })?;
        debug!(entries = self.entries.len(), "Score file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
