//! Configuration type definitions
//!
//! The persisted record holds only the motion target and the remaining
//! motion of the last session.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target used when nothing valid is stored
pub const DEFAULT_TARGET: f64 = 200.0;

/// Remaining motion used when nothing valid is stored
pub const DEFAULT_REMAINING: f64 = 0.0;

/// Persisted session record
///
/// Serialized as `{ "motionTarget": <number>, "motionRemaining": <number> }`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PersistedConfig {
    /// Motion target
    #[cfg_attr(feature = "serde", serde(rename = "motionTarget"))]
    pub target: f64,
    /// Motion remaining when last saved
    #[cfg_attr(feature = "serde", serde(rename = "motionRemaining"))]
    pub remaining: f64,
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            remaining: DEFAULT_REMAINING,
        }
    }
}

impl PersistedConfig {
    /// Create a record from explicit values
    pub const fn new(target: f64, remaining: f64) -> Self {
        Self { target, remaining }
    }

    /// Build a validated config from a decoded record
    ///
    /// Missing or non-finite fields are replaced by their defaults one by
    /// one. A negative target clamps to zero. A positive remaining value
    /// below the target redefines the target, so an interrupted session
    /// picks up where it left off.
    pub fn from_raw(raw: RawRecord) -> Self {
        let target = finite_or(raw.target, DEFAULT_TARGET).max(0.0);
        let remaining = finite_or(raw.remaining, DEFAULT_REMAINING);

        let target = if remaining > 0.0 && remaining < target {
            remaining
        } else {
            target
        };

        Self { target, remaining }
    }
}

/// Record as decoded by a storage backend, before validation
///
/// A field is `None` when it was absent or not a number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawRecord {
    pub target: Option<f64>,
    pub remaining: Option<f64>,
}

impl RawRecord {
    /// Create a record with both fields present
    pub const fn new(target: f64, remaining: f64) -> Self {
        Self {
            target: Some(target),
            remaining: Some(remaining),
        }
    }
}

impl From<PersistedConfig> for RawRecord {
    fn from(config: PersistedConfig) -> Self {
        Self::new(config.target, config.remaining)
    }
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    }
}
