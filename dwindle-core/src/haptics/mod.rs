//! Haptic scheduling
//!
//! Single pulses are fired directly through [`crate::traits::Haptics`];
//! repeated pulses are scheduled here.

pub mod burst;

pub use burst::{BurstSchedule, HapticBurst, COMPLETION_BURST};
