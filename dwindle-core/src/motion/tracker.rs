//! Motion countdown tracker
//!
//! Consumes successive accelerometer samples and decrements the remaining
//! motion by the scaled distance between consecutive readings.
//!
//! The first sample after a (re)start only establishes the baseline. Every
//! later sample may produce at most one [`TrackerEvent`]:
//! - `ThresholdCrossed` when `floor(remaining / interval)` strictly drops and
//!   motion is still remaining
//! - `Completed` the first time remaining reaches zero or below
//!
//! The two are mutually exclusive within a sample since a crossing requires
//! `remaining > 0`.

use super::sample::MotionSample;

/// Calibration divisor applied to raw accelerometer distance
pub const DISPLACEMENT_DIVISOR: f64 = 50.0;

/// Motion units between haptic progress pulses
pub const THRESHOLD_INTERVAL: f64 = 50.0;

/// Events produced by a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerEvent {
    /// Remaining motion dropped into a lower threshold bucket
    ThresholdCrossed,
    /// Remaining motion reached zero (fires once per session)
    Completed,
}

/// Tunable tracker constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerCalibration {
    /// Raw distance is divided by this to get displacement
    pub displacement_divisor: f64,
    /// Bucket width for threshold pulses
    pub threshold_interval: f64,
}

impl Default for TrackerCalibration {
    fn default() -> Self {
        Self {
            displacement_divisor: DISPLACEMENT_DIVISOR,
            threshold_interval: THRESHOLD_INTERVAL,
        }
    }
}

/// Motion countdown state
#[derive(Debug, Clone)]
pub struct MotionTracker {
    /// Motion required to complete a session (always finite and >= 0)
    target: f64,
    /// Motion left; may go negative after completion
    remaining: f64,
    /// Last sample seen, `None` until the baseline read
    previous: Option<MotionSample>,
    /// Completion event already emitted this session
    completion_signalled: bool,
    calibration: TrackerCalibration,
}

impl MotionTracker {
    /// Create a tracker with the default calibration
    pub fn new(target: f64) -> Self {
        Self::with_calibration(target, TrackerCalibration::default())
    }

    /// Create a tracker with custom calibration
    ///
    /// Non-positive or non-finite calibration values fall back to defaults.
    pub fn with_calibration(target: f64, calibration: TrackerCalibration) -> Self {
        let defaults = TrackerCalibration::default();
        let calibration = TrackerCalibration {
            displacement_divisor: positive_or(
                calibration.displacement_divisor,
                defaults.displacement_divisor,
            ),
            threshold_interval: positive_or(
                calibration.threshold_interval,
                defaults.threshold_interval,
            ),
        };
        let target = sanitize_target(target);

        Self {
            target,
            remaining: target,
            previous: None,
            completion_signalled: false,
            calibration,
        }
    }

    /// Motion target for the session
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Motion left before completion
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Whether the completion event already fired this session
    pub fn completion_signalled(&self) -> bool {
        self.completion_signalled
    }

    /// Whether a baseline sample has been recorded
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    /// Replace the target, clamped to a finite value >= 0
    pub fn set_target(&mut self, target: f64) {
        self.target = sanitize_target(target);
    }

    /// Add `delta` to the target, clamping at zero
    ///
    /// Returns the new target.
    pub fn adjust_target(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.set_target(self.target + delta);
        }
        self.target
    }

    /// Start a fresh session
    ///
    /// Remaining goes back to the target, the completion flag clears, and
    /// the next sample becomes the new baseline.
    pub fn reset(&mut self) {
        self.remaining = self.target;
        self.completion_signalled = false;
        self.previous = None;
    }

    /// Threshold bucket index for a remaining value
    pub fn bucket(&self, remaining: f64) -> i32 {
        libm::floor(remaining / self.calibration.threshold_interval) as i32
    }

    /// Consume one sample
    pub fn on_sample(&mut self, sample: MotionSample) -> Option<TrackerEvent> {
        if !sample.is_finite() {
            log::warn!("Discarding non-finite motion sample");
            return None;
        }

        let Some(previous) = self.previous.replace(sample) else {
            log::debug!("Baseline sample recorded");
            return None;
        };

        let displacement = previous.distance_to(&sample) / self.calibration.displacement_divisor;
        let before = self.remaining;
        self.remaining = before - displacement;

        if self.remaining > 0.0 {
            if self.bucket(self.remaining) < self.bucket(before) {
                return Some(TrackerEvent::ThresholdCrossed);
            }
        } else if !self.completion_signalled {
            self.completion_signalled = true;
            return Some(TrackerEvent::Completed);
        }

        None
    }
}

/// Clamp a target to a finite value >= 0
fn sanitize_target(target: f64) -> f64 {
    if target.is_finite() && target > 0.0 {
        target
    } else {
        0.0
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
