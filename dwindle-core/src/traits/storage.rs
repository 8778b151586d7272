//! Persistent record storage trait
//!
//! Backends hold a single small document with the motion target and the
//! remaining motion. Decoding is lenient: a field that is missing or not a
//! number comes back as `None`, and validation happens in
//! [`crate::config::ConfigStore`].

use crate::config::{PersistedConfig, RawRecord};

/// Errors from record storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No record has been written yet
    NotFound,
    /// Underlying read or write failed
    Io,
    /// Record exists but could not be decoded
    Corrupted,
}

/// Trait for the persisted configuration record
pub trait RecordStorage {
    /// Read and decode the stored record
    fn read(&mut self) -> Result<RawRecord, StorageError>;

    /// Replace the stored record
    ///
    /// Last write wins. Implementations should not leave a partially written
    /// record behind.
    fn write(&mut self, config: &PersistedConfig) -> Result<(), StorageError>;
}
