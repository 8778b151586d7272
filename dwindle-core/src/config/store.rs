//! Configuration persistence
//!
//! Loads the session record through a [`RecordStorage`] backend.
//! Falls back to defaults if the record is missing or unreadable.

use log::{debug, info, warn};

use super::types::PersistedConfig;
use crate::traits::{RecordStorage, StorageError};

/// Configuration persistence manager
pub struct ConfigStore<S: RecordStorage> {
    storage: S,
}

impl<S: RecordStorage> ConfigStore<S> {
    /// Create a new config store on top of a storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the configuration
    ///
    /// Never fails: read errors and corrupt data are logged and replaced by
    /// [`PersistedConfig::default`].
    pub fn load(&mut self) -> PersistedConfig {
        let raw = match self.storage.read() {
            Ok(raw) => raw,
            Err(StorageError::NotFound) => {
                debug!("No stored configuration, using defaults");
                return PersistedConfig::default();
            }
            Err(e) => {
                warn!("Error reading configuration ({:?}), using defaults", e);
                return PersistedConfig::default();
            }
        };

        if raw.target.is_none() || raw.remaining.is_none() {
            warn!("Stored configuration incomplete, substituting defaults");
        }

        let config = PersistedConfig::from_raw(raw);
        info!(
            "Configuration loaded: target={} remaining={}",
            config.target, config.remaining
        );
        config
    }

    /// Overwrite the stored configuration
    pub fn save(&mut self, config: &PersistedConfig) -> Result<(), StorageError> {
        self.storage.write(config)?;
        debug!(
            "Configuration saved: target={} remaining={}",
            config.target, config.remaining
        );
        Ok(())
    }
}
