//! Board-agnostic core logic for the Dwindle motion countdown
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motion sensor, haptics, display, storage)
//! - Motion tracking (displacement, threshold buckets, completion)
//! - Session state machine and controller
//! - Cancellable completion vibration burst
//! - Persisted configuration with validation and defaults

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod haptics;
pub mod motion;
pub mod session;
pub mod state;
pub mod traits;
