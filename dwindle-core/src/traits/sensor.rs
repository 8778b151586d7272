//! Motion sensor trait

use crate::motion::MotionSample;

/// Trait for a three-axis motion sensor
///
/// The sensor is a resource scoped to a running session: the controller
/// starts it on start/resume and stops it on pause/stop. Implementations
/// should only produce readings while started.
pub trait MotionSensor {
    /// Begin periodic sampling
    fn start(&mut self);

    /// Suspend sampling
    fn stop(&mut self);

    /// Check if the sensor is currently sampling
    fn is_active(&self) -> bool;

    /// Take the latest reading
    ///
    /// Returns `None` when the sensor is stopped or has nothing new.
    fn read(&mut self) -> Option<MotionSample>;
}
