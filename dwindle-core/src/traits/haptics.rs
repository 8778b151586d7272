//! Haptic output trait

/// Vibration patterns offered by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HapticPattern {
    /// Light tap, used for target adjustments
    Pulse,
    /// Strong tap, used for acknowledgements, thresholds and completion
    StrongPulse,
}

impl HapticPattern {
    /// Pattern name as exposed by the vibration capability
    pub const fn name(self) -> &'static str {
        match self {
            HapticPattern::Pulse => "pulse",
            HapticPattern::StrongPulse => "strong-pulse",
        }
    }
}

/// Trait for the vibration motor
///
/// Implementations fire a single pattern and return immediately. Repeated
/// patterns are scheduled by [`crate::haptics::HapticBurst`].
pub trait Haptics {
    /// Play a pattern once
    fn play(&mut self, pattern: HapticPattern);
}
