//! Motion tracking
//!
//! Turns raw accelerometer samples into a decreasing "motion remaining"
//! value and reports threshold crossings and completion.

pub mod sample;
pub mod tracker;

pub use sample::MotionSample;
pub use tracker::{
    MotionTracker, TrackerCalibration, TrackerEvent, DISPLACEMENT_DIVISOR, THRESHOLD_INTERVAL,
};
