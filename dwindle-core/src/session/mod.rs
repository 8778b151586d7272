//! Countdown session
//!
//! The controller mediates user commands and sensor samples, owns the
//! motion tracker and completion burst, and drives the device ports.

pub mod controller;
pub mod input;

pub use controller::{SessionController, SessionError};
pub use input::{Button, TargetStep};
