//! Events that trigger session transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// User pressed start on the settings screen
    Start,
    /// User pressed pause
    Pause,
    /// User pressed resume on the paused screen
    Resume,
    /// User pressed stop
    Stop,
    /// User changed the motion target
    AdjustTarget,
}
