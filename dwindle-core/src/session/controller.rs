//! Session controller coordinating tracker, state machine, and ports
//!
//! The controller is the central brain that:
//! - Processes button presses and checks them against the state machine
//! - Starts and stops the motion sensor with the session
//! - Feeds samples to the tracker and turns its events into vibrations
//! - Persists the configuration on start and on exit
//! - Pushes screen and text updates to the display

use log::{debug, info, warn};

use super::input::Button;
use crate::config::{ConfigStore, PersistedConfig};
use crate::haptics::{HapticBurst, COMPLETION_BURST};
use crate::motion::{MotionSample, MotionTracker, TrackerCalibration, TrackerEvent};
use crate::state::{Event, SessionState};
use crate::traits::{
    HapticPattern, Haptics, MotionSensor, Presentation, PresentationExt, RecordStorage, Screen,
};

/// Errors from session operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// The event is not accepted in the current state
    InvalidTransition { state: SessionState, event: Event },
}

/// Controller state for one app run
pub struct SessionController<M, H, P, S>
where
    M: MotionSensor,
    H: Haptics,
    P: Presentation,
    S: RecordStorage,
{
    /// Current session state
    state: SessionState,
    /// Motion countdown
    tracker: MotionTracker,
    /// Completion vibration in flight
    burst: HapticBurst,
    /// Persisted target/remaining record
    store: ConfigStore<S>,
    sensor: M,
    haptics: H,
    display: P,
}

impl<M, H, P, S> SessionController<M, H, P, S>
where
    M: MotionSensor,
    H: Haptics,
    P: Presentation,
    S: RecordStorage,
{
    /// Create a controller with the default tracker calibration
    ///
    /// Loads the stored configuration and opens on the settings screen.
    pub fn new(sensor: M, haptics: H, display: P, storage: S) -> Self {
        Self::with_calibration(sensor, haptics, display, storage, TrackerCalibration::default())
    }

    /// Create a controller with a custom tracker calibration
    pub fn with_calibration(
        sensor: M,
        haptics: H,
        display: P,
        storage: S,
        calibration: TrackerCalibration,
    ) -> Self {
        let mut store = ConfigStore::new(storage);
        let config = store.load();

        let mut tracker = MotionTracker::with_calibration(config.target, calibration);
        tracker.reset();

        let mut controller = Self {
            state: SessionState::Idle,
            tracker,
            burst: HapticBurst::new(),
            store,
            sensor,
            haptics,
            display,
        };
        controller.display.show_target(controller.tracker.target());
        controller.display.show_screen(Screen::Settings);
        controller
    }

    /// Get current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the motion target
    pub fn target(&self) -> f64 {
        self.tracker.target()
    }

    /// Get the motion remaining
    pub fn remaining(&self) -> f64 {
        self.tracker.remaining()
    }

    /// Get the motion tracker
    pub fn tracker(&self) -> &MotionTracker {
        &self.tracker
    }

    /// Check if the completion burst is still vibrating
    pub fn burst_active(&self) -> bool {
        self.burst.is_active()
    }

    /// Get the motion sensor port
    pub fn sensor(&self) -> &M {
        &self.sensor
    }

    /// Get the haptics port
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Get the display port
    pub fn display(&self) -> &P {
        &self.display
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Process a button press
    pub fn dispatch(&mut self, button: Button) -> Result<(), SessionError> {
        match button {
            Button::Start => self.start(),
            Button::Pause => self.pause(),
            Button::Resume => self.resume(),
            Button::Stop => self.stop(),
            Button::Adjust(step) => self.adjust_target(step.delta()),
        }
    }

    /// Save settings and start a new countdown
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.check(Event::Start)?;

        self.persist();
        self.burst.cancel();
        self.tracker.reset();
        self.sensor.start();
        self.haptics.play(HapticPattern::StrongPulse);
        self.transition(Event::Start);

        self.display.show_remaining(self.tracker.remaining());
        self.display.show_screen(Screen::Active);
        info!("Session started, target={}", self.tracker.target());
        Ok(())
    }

    /// Suspend the countdown
    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.check(Event::Pause)?;

        self.sensor.stop();
        self.haptics.play(HapticPattern::StrongPulse);
        self.transition(Event::Pause);

        self.display.show_screen(Screen::Paused);
        info!("Session paused, remaining={}", self.tracker.remaining());
        Ok(())
    }

    /// Continue a paused countdown from where it stopped
    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.check(Event::Resume)?;

        self.sensor.start();
        self.haptics.play(HapticPattern::StrongPulse);
        self.transition(Event::Resume);

        self.display.show_screen(Screen::Active);
        info!("Session resumed, remaining={}", self.tracker.remaining());
        Ok(())
    }

    /// End the session and discard partial progress
    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.check(Event::Stop)?;

        self.sensor.stop();
        self.haptics.play(HapticPattern::StrongPulse);
        self.burst.cancel();
        self.tracker.reset();
        self.transition(Event::Stop);

        self.display.show_target(self.tracker.target());
        self.display.show_screen(Screen::Settings);
        info!("Session stopped");
        Ok(())
    }

    /// Change the motion target by `delta`, clamping at zero
    pub fn adjust_target(&mut self, delta: f64) -> Result<(), SessionError> {
        self.check(Event::AdjustTarget)?;

        let target = self.tracker.adjust_target(delta);
        self.tracker.reset();
        self.haptics.play(HapticPattern::Pulse);

        self.display.show_target(target);
        debug!("Target adjusted by {} to {}", delta, target);
        Ok(())
    }

    /// Process one accelerometer sample
    ///
    /// Samples are ignored unless the session is running.
    pub fn on_sample(&mut self, sample: MotionSample, now_ms: u64) -> Option<TrackerEvent> {
        if !self.state.sampling_active() {
            debug!("Sample ignored in {:?}", self.state);
            return None;
        }

        let event = self.tracker.on_sample(sample);
        self.display.show_remaining(self.tracker.remaining());

        match event {
            Some(TrackerEvent::ThresholdCrossed) => {
                debug!("Threshold crossed, remaining={}", self.tracker.remaining());
                self.haptics.play(HapticPattern::StrongPulse);
            }
            Some(TrackerEvent::Completed) => {
                info!("Motion target reached");
                if self.burst.start(now_ms, COMPLETION_BURST) {
                    self.haptics.play(HapticPattern::StrongPulse);
                }
            }
            None => {}
        }

        event
    }

    /// Read the sensor and process the sample, if any
    pub fn poll_sensor(&mut self, now_ms: u64) -> Option<TrackerEvent> {
        if !self.state.sampling_active() {
            return None;
        }
        let sample = self.sensor.read()?;
        self.on_sample(sample, now_ms)
    }

    /// Periodic tick update
    ///
    /// Call this regularly (e.g., every 100ms) with the current timestamp.
    /// Returns true if a burst pulse was played.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.burst.poll(now_ms) {
            self.haptics.play(HapticPattern::StrongPulse);
            true
        } else {
            false
        }
    }

    /// App exit hook
    ///
    /// Cancels pending vibration, releases the sensor and saves the current
    /// target and remaining motion.
    pub fn shutdown(&mut self) {
        self.burst.cancel();
        if self.state.sampling_active() {
            self.sensor.stop();
        }
        self.persist();
        info!("Shutdown complete");
    }

    /// Reject events the state machine does not accept
    fn check(&self, event: Event) -> Result<(), SessionError> {
        if self.state.accepts(event) {
            Ok(())
        } else {
            debug!("{:?} ignored in {:?}", event, self.state);
            Err(SessionError::InvalidTransition {
                state: self.state,
                event,
            })
        }
    }

    /// Perform state transition
    fn transition(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Save target and remaining, logging failures
    fn persist(&mut self) {
        let config = PersistedConfig::new(self.tracker.target(), self.tracker.remaining());
        if let Err(e) = self.store.save(&config) {
            warn!("Failed to save configuration: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawRecord;
    use crate::session::TargetStep;
    use crate::traits::StorageError;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeSensor {
        active: bool,
        starts: u32,
        stops: u32,
        queue: VecDeque<MotionSample>,
    }

    impl MotionSensor for FakeSensor {
        fn start(&mut self) {
            self.active = true;
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.active = false;
            self.stops += 1;
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn read(&mut self) -> Option<MotionSample> {
            if self.active {
                self.queue.pop_front()
            } else {
                None
            }
        }
    }

    #[derive(Default)]
    struct RecordingHaptics {
        played: Vec<HapticPattern>,
    }

    impl RecordingHaptics {
        fn strong(&self) -> usize {
            self.played
                .iter()
                .filter(|p| **p == HapticPattern::StrongPulse)
                .count()
        }
    }

    impl Haptics for RecordingHaptics {
        fn play(&mut self, pattern: HapticPattern) {
            self.played.push(pattern);
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        screens: Vec<Screen>,
        remaining: String,
        target: String,
    }

    impl Presentation for RecordingDisplay {
        fn show_screen(&mut self, screen: Screen) {
            self.screens.push(screen);
        }

        fn set_remaining_text(&mut self, text: &str) {
            self.remaining = text.to_string();
        }

        fn set_target_text(&mut self, text: &str) {
            self.target = text.to_string();
        }
    }

    struct MemoryStorage {
        record: Result<RawRecord, StorageError>,
        writes: Vec<PersistedConfig>,
    }

    impl MemoryStorage {
        fn with(target: f64, remaining: f64) -> Self {
            Self {
                record: Ok(RawRecord::new(target, remaining)),
                writes: Vec::new(),
            }
        }
    }

    impl RecordStorage for MemoryStorage {
        fn read(&mut self) -> Result<RawRecord, StorageError> {
            self.record
        }

        fn write(&mut self, config: &PersistedConfig) -> Result<(), StorageError> {
            self.writes.push(*config);
            self.record = Ok(RawRecord::from(*config));
            Ok(())
        }
    }

    type TestController =
        SessionController<FakeSensor, RecordingHaptics, RecordingDisplay, MemoryStorage>;

    fn controller(target: f64) -> TestController {
        SessionController::new(
            FakeSensor::default(),
            RecordingHaptics::default(),
            RecordingDisplay::default(),
            MemoryStorage::with(target, target),
        )
    }

    fn sample_x(x: f64) -> MotionSample {
        MotionSample::new(x, 0.0, 0.0)
    }

    #[test]
    fn test_opens_on_settings_screen() {
        let ctrl = controller(150.0);
        assert_eq!(ctrl.state(), SessionState::Idle);
        assert_eq!(ctrl.target(), 150.0);
        assert_eq!(ctrl.remaining(), 150.0);
        assert_eq!(ctrl.display().screens, [Screen::Settings]);
        assert_eq!(ctrl.display().target, "150.0");
        assert!(!ctrl.sensor().is_active());
    }

    #[test]
    fn test_corrupt_storage_uses_defaults() {
        let ctrl = SessionController::new(
            FakeSensor::default(),
            RecordingHaptics::default(),
            RecordingDisplay::default(),
            MemoryStorage {
                record: Err(StorageError::Corrupted),
                writes: Vec::new(),
            },
        );
        assert_eq!(ctrl.target(), 200.0);
        assert_eq!(ctrl.remaining(), 200.0);
    }

    #[test]
    fn test_interrupted_session_redefines_target() {
        let ctrl = SessionController::new(
            FakeSensor::default(),
            RecordingHaptics::default(),
            RecordingDisplay::default(),
            MemoryStorage::with(200.0, 37.0),
        );
        assert_eq!(ctrl.target(), 37.0);
        assert_eq!(ctrl.remaining(), 37.0);
    }

    #[test]
    fn test_start_from_idle() {
        let mut ctrl = controller(200.0);
        ctrl.start().unwrap();

        assert_eq!(ctrl.state(), SessionState::Running);
        assert!(ctrl.sensor().is_active());
        assert_eq!(ctrl.haptics().played, [HapticPattern::StrongPulse]);
        assert_eq!(ctrl.display().screens.last(), Some(&Screen::Active));
        assert_eq!(ctrl.display().remaining, "200.0");
        assert_eq!(ctrl.storage().writes, [PersistedConfig::new(200.0, 200.0)]);
    }

    #[test]
    fn test_invalid_commands_have_no_side_effects() {
        let mut ctrl = controller(200.0);
        assert_eq!(
            ctrl.pause(),
            Err(SessionError::InvalidTransition {
                state: SessionState::Idle,
                event: Event::Pause,
            })
        );
        assert!(ctrl.resume().is_err());
        assert!(ctrl.stop().is_err());

        ctrl.start().unwrap();
        assert!(ctrl.start().is_err());
        assert!(ctrl.adjust_target(10.0).is_err());
        assert!(ctrl.resume().is_err());

        assert_eq!(ctrl.haptics().played.len(), 1);
        assert_eq!(ctrl.target(), 200.0);
        assert_eq!(ctrl.sensor().starts, 1);
        assert_eq!(ctrl.storage().writes.len(), 1);
    }

    #[test]
    fn test_baseline_then_crossing() {
        let mut ctrl = controller(200.0);
        ctrl.start().unwrap();

        assert_eq!(ctrl.on_sample(sample_x(0.0), 0), None);
        assert_eq!(ctrl.remaining(), 200.0);
        assert_eq!(ctrl.haptics().played.len(), 1);

        assert_eq!(
            ctrl.on_sample(sample_x(150.0), 1_000),
            Some(TrackerEvent::ThresholdCrossed)
        );
        assert_eq!(ctrl.remaining(), 197.0);
        assert_eq!(ctrl.display().remaining, "197.0");
        assert_eq!(ctrl.haptics().strong(), 2);
    }

    #[test]
    fn test_pause_resume_keeps_progress() {
        let mut ctrl = controller(200.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);
        ctrl.on_sample(sample_x(100.0), 1_000);
        assert_eq!(ctrl.remaining(), 198.0);

        ctrl.pause().unwrap();
        assert_eq!(ctrl.state(), SessionState::Paused);
        assert!(!ctrl.sensor().is_active());
        assert_eq!(ctrl.display().screens.last(), Some(&Screen::Paused));

        // Samples while paused are ignored
        assert_eq!(ctrl.on_sample(sample_x(5_000.0), 2_000), None);
        assert_eq!(ctrl.remaining(), 198.0);

        ctrl.resume().unwrap();
        assert_eq!(ctrl.state(), SessionState::Running);
        assert!(ctrl.sensor().is_active());
        assert_eq!(ctrl.display().screens.last(), Some(&Screen::Active));

        // Baseline survives the pause
        ctrl.on_sample(sample_x(150.0), 3_000);
        assert_eq!(ctrl.remaining(), 197.0);

        // start, crossing at 198, pause, resume
        assert_eq!(ctrl.haptics().strong(), 4);
    }

    #[test]
    fn test_stop_discards_progress() {
        let mut ctrl = controller(200.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);
        ctrl.on_sample(sample_x(8_150.0), 1_000);
        assert_eq!(ctrl.remaining(), 37.0);

        ctrl.stop().unwrap();
        assert_eq!(ctrl.state(), SessionState::Idle);
        assert_eq!(ctrl.remaining(), 200.0);
        assert!(!ctrl.tracker().completion_signalled());
        assert!(!ctrl.sensor().is_active());
        assert_eq!(ctrl.display().screens.last(), Some(&Screen::Settings));
        assert_eq!(ctrl.display().target, "200.0");
    }

    #[test]
    fn test_adjust_target_clamps_at_zero() {
        let mut ctrl = controller(50.0);
        ctrl.dispatch(Button::Adjust(TargetStep::Subtract100)).unwrap();

        assert_eq!(ctrl.target(), 0.0);
        assert_eq!(ctrl.remaining(), 0.0);
        assert_eq!(ctrl.display().target, "0.0");
        assert_eq!(ctrl.haptics().played, [HapticPattern::Pulse]);
    }

    #[test]
    fn test_adjustment_buttons() {
        let mut ctrl = controller(200.0);
        for step in [
            TargetStep::Add100,
            TargetStep::Add10,
            TargetStep::Add1,
            TargetStep::Subtract10,
        ] {
            ctrl.dispatch(Button::Adjust(step)).unwrap();
        }
        assert_eq!(ctrl.target(), 301.0);
        assert_eq!(ctrl.display().target, "301.0");
    }

    #[test]
    fn test_completion_burst_plays_four_pulses() {
        let mut ctrl = controller(2.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);

        assert_eq!(
            ctrl.on_sample(sample_x(150.0), 1_000),
            Some(TrackerEvent::Completed)
        );
        assert!(ctrl.burst_active());
        assert_eq!(ctrl.haptics().strong(), 2);

        assert!(!ctrl.tick(1_400));
        assert!(ctrl.tick(1_500));
        assert!(ctrl.tick(2_000));
        assert!(ctrl.tick(2_500));
        assert!(!ctrl.tick(3_000));
        assert!(!ctrl.burst_active());
        assert_eq!(ctrl.haptics().strong(), 5);

        // Further movement never re-triggers completion
        assert_eq!(ctrl.on_sample(sample_x(0.0), 3_500), None);
        assert!(!ctrl.tick(4_000));
        assert_eq!(ctrl.haptics().strong(), 5);
    }

    #[test]
    fn test_restart_cancels_completion_burst() {
        let mut ctrl = controller(2.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);
        ctrl.on_sample(sample_x(150.0), 1_000);
        assert!(ctrl.tick(1_500));

        ctrl.stop().unwrap();
        assert!(!ctrl.burst_active());
        ctrl.start().unwrap();

        // start, completion, one burst pulse, stop, start
        assert_eq!(ctrl.haptics().strong(), 5);
        assert!(!ctrl.tick(2_000));
        assert!(!ctrl.tick(2_500));
        assert_eq!(ctrl.haptics().strong(), 5);
    }

    #[test]
    fn test_poll_sensor_only_while_running() {
        let mut ctrl = controller(200.0);
        ctrl.sensor.queue.extend([sample_x(0.0), sample_x(150.0)]);

        assert_eq!(ctrl.poll_sensor(0), None);
        assert_eq!(ctrl.sensor().queue.len(), 2);

        ctrl.start().unwrap();
        assert_eq!(ctrl.poll_sensor(0), None);
        assert_eq!(ctrl.poll_sensor(1_000), Some(TrackerEvent::ThresholdCrossed));
        assert_eq!(ctrl.poll_sensor(2_000), None);
        assert_eq!(ctrl.remaining(), 197.0);
    }

    #[test]
    fn test_shutdown_persists_progress() {
        let mut ctrl = controller(200.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);
        ctrl.on_sample(sample_x(8_150.0), 1_000);

        ctrl.shutdown();
        assert!(!ctrl.sensor().is_active());
        assert_eq!(
            ctrl.storage().writes.last(),
            Some(&PersistedConfig::new(200.0, 37.0))
        );
    }

    #[test]
    fn test_shutdown_when_idle_leaves_sensor_alone() {
        let mut ctrl = controller(200.0);
        ctrl.shutdown();
        assert_eq!(ctrl.sensor().stops, 0);
        assert_eq!(
            ctrl.storage().writes,
            [PersistedConfig::new(200.0, 200.0)]
        );
    }

    #[test]
    fn test_shutdown_cancels_completion_burst() {
        let mut ctrl = controller(2.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);
        ctrl.on_sample(sample_x(150.0), 1_000);
        assert!(ctrl.tick(1_500));

        ctrl.shutdown();
        assert!(!ctrl.burst_active());

        // start, completion, one burst pulse
        assert_eq!(ctrl.haptics().strong(), 3);
        assert!(!ctrl.tick(2_000));
        assert!(!ctrl.tick(2_500));
        assert!(!ctrl.tick(3_000));
        assert_eq!(ctrl.haptics().strong(), 3);
    }

    #[test]
    fn test_pause_lets_completion_burst_finish() {
        let mut ctrl = controller(2.0);
        ctrl.start().unwrap();
        ctrl.on_sample(sample_x(0.0), 0);
        ctrl.on_sample(sample_x(150.0), 1_000);

        ctrl.pause().unwrap();
        assert_eq!(ctrl.state(), SessionState::Paused);
        assert!(ctrl.burst_active());

        assert!(ctrl.tick(1_500));
        assert!(ctrl.tick(2_000));
        assert!(ctrl.tick(2_500));
        assert!(!ctrl.burst_active());

        // start, completion, pause ack, three burst pulses
        assert_eq!(ctrl.haptics().strong(), 6);
    }

    #[test]
    fn test_shutdown_while_paused_stops_sensor_once() {
        let mut ctrl = controller(200.0);
        ctrl.start().unwrap();
        ctrl.pause().unwrap();

        ctrl.shutdown();
        assert_eq!(ctrl.sensor().stops, 1);
        assert!(!ctrl.sensor().is_active());
    }
}
