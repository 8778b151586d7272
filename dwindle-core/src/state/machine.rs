//! Session state machine definition
//!
//! Sensor sampling, haptics, and screen selection are all a function of the
//! current state and an event.

use super::events::Event;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Settings screen visible, target editable, sensor off
    #[default]
    Idle,
    /// Countdown active, sensor sampling
    Running,
    /// Countdown suspended by user, sensor off
    Paused,
}

impl SessionState {
    /// Check if this state samples the motion sensor
    pub fn sampling_active(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    /// Check whether `event` is accepted in this state
    pub fn accepts(&self, event: Event) -> bool {
        use Event::*;
        use SessionState::*;

        matches!(
            (*self, event),
            (Idle, Start)
                | (Idle, AdjustTarget)
                | (Running, Pause)
                | (Running, Stop)
                | (Paused, Resume)
                | (Paused, Stop)
        )
    }

    /// Process an event and return the next state
    ///
    /// Events not accepted in the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use SessionState::*;

        match (self, event) {
            (Idle, Start) => Running,
            (Idle, AdjustTarget) => Idle,

            (Running, Pause) => Paused,
            (Running, Stop) => Idle,

            (Paused, Resume) => Running,
            (Paused, Stop) => Idle,

            _ => self,
        }
    }
}
