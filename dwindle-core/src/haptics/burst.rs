//! Cancellable repeated vibration
//!
//! A burst fires its first pulse immediately and the rest at a fixed
//! interval. It has no timer of its own: the owner polls it with the
//! current time in milliseconds, which keeps it deterministic under test.
//!
//! Only one burst can be in flight. Starting a new session must cancel it so
//! a stale completion never vibrates into the next countdown.

/// Shape of a repeated vibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstSchedule {
    /// Total pulses including the immediate one
    pub count: u8,
    /// Delay between pulses (ms)
    pub interval_ms: u32,
}

/// Burst played when the motion target is reached
pub const COMPLETION_BURST: BurstSchedule = BurstSchedule {
    count: 4,
    interval_ms: 500,
};

/// In-flight burst state
#[derive(Debug, Clone, Default)]
pub struct HapticBurst {
    /// Pulses still to fire after the immediate one
    pending: u8,
    /// Time the next pulse is due (ms)
    next_due_ms: u64,
    /// Interval of the active burst (ms)
    interval_ms: u32,
}

impl HapticBurst {
    /// Create an idle burst
    pub const fn new() -> Self {
        Self {
            pending: 0,
            next_due_ms: 0,
            interval_ms: 0,
        }
    }

    /// Check if pulses are still scheduled
    pub fn is_active(&self) -> bool {
        self.pending > 0
    }

    /// Pulses still scheduled
    pub fn remaining_pulses(&self) -> u8 {
        self.pending
    }

    /// Arm a burst
    ///
    /// Returns `true` if the caller should fire the first pulse now, or
    /// `false` if a burst is already in flight (bursts never overlap) or the
    /// schedule is empty.
    pub fn start(&mut self, now_ms: u64, schedule: BurstSchedule) -> bool {
        if self.is_active() || schedule.count == 0 {
            return false;
        }

        self.pending = schedule.count - 1;
        self.interval_ms = schedule.interval_ms;
        self.next_due_ms = now_ms.saturating_add(schedule.interval_ms as u64);
        true
    }

    /// Check whether a pulse is due
    ///
    /// Returns `true` at most once per call. A late poll fires a single
    /// pulse and schedules the next one a full interval later.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.is_active() || now_ms < self.next_due_ms {
            return false;
        }

        self.pending -= 1;
        self.next_due_ms = now_ms.saturating_add(self.interval_ms as u64);
        true
    }

    /// Drop any scheduled pulses
    pub fn cancel(&mut self) {
        self.pending = 0;
    }
}
