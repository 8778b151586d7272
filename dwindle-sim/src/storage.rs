//! JSON file storage for the persisted record
//!
//! The record is a small document:
//! `{ "motionTarget": <number>, "motionRemaining": <number> }`.
//! Writes go to a temporary file first and are renamed into place so a
//! crash never leaves a half-written record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde_json::Value;

use dwindle_core::config::{PersistedConfig, RawRecord};
use dwindle_core::traits::{RecordStorage, StorageError};

/// Field holding the motion target
pub const TARGET_KEY: &str = "motionTarget";

/// Field holding the remaining motion
pub const REMAINING_KEY: &str = "motionRemaining";

/// File-backed record storage
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl RecordStorage for JsonFileStorage {
    fn read(&mut self) -> Result<RawRecord, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(e) => {
                warn!("Cannot read {}: {}", self.path.display(), e);
                return Err(StorageError::Io);
            }
        };
        decode_record(&text)
    }

    fn write(&mut self, config: &PersistedConfig) -> Result<(), StorageError> {
        let json = serde_json::to_string(config).map_err(|_| StorageError::Corrupted)?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| {
            warn!("Cannot write {}: {}", temp.display(), e);
            StorageError::Io
        })?;
        fs::rename(&temp, &self.path).map_err(|e| {
            warn!("Cannot replace {}: {}", self.path.display(), e);
            StorageError::Io
        })
    }
}

/// Decode a record, leaving non-numeric fields empty
pub fn decode_record(text: &str) -> Result<RawRecord, StorageError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        warn!("Configuration is not valid JSON: {}", e);
        StorageError::Corrupted
    })?;

    Ok(RawRecord {
        target: number_field(&value, TARGET_KEY),
        remaining: number_field(&value, REMAINING_KEY),
    })
}

fn number_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key)?.as_f64()
}
