//! Persisted configuration
//!
//! Two numeric fields survive between launches: the motion target and the
//! remaining motion of the last session.

pub mod store;
pub mod types;

pub use store::ConfigStore;
pub use types::{PersistedConfig, RawRecord, DEFAULT_REMAINING, DEFAULT_TARGET};
