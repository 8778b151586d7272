//! Accelerometer sample type

/// One accelerometer reading
///
/// Samples carry no identity beyond arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    /// Create a sample from its three axes
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another sample across all three axes
    pub fn distance_to(&self, other: &MotionSample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        libm::sqrt(dx * dx + dy * dy + dz * dz)
    }

    /// Check that every axis holds a finite value
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
