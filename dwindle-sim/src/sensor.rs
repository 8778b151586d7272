//! Simulated accelerometer
//!
//! Readings come either from a replay file or from a synthetic wrist-swing
//! generator. The sensor only produces readings between `start()` and
//! `stop()`, like the device capability it stands in for.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};

use dwindle_core::motion::MotionSample;
use dwindle_core::traits::MotionSensor;

/// Resting gravity on the z axis (m/s²)
const GRAVITY: f64 = 9.81;

/// Phase advance per synthetic reading (radians)
const SWING_STEP: f64 = 0.9;

/// Where readings come from
#[derive(Debug, Clone)]
pub enum SampleSource {
    /// Recorded readings, looped
    Replay {
        samples: Vec<MotionSample>,
        cursor: usize,
    },
    /// Periodic arm swing
    Synthetic { amplitude: f64, step: u32 },
}

impl SampleSource {
    /// Produce the next reading
    pub fn next_sample(&mut self) -> MotionSample {
        match self {
            SampleSource::Replay { samples, cursor } => {
                let sample = samples[*cursor % samples.len()];
                *cursor = (*cursor + 1) % samples.len();
                sample
            }
            SampleSource::Synthetic { amplitude, step } => {
                let phase = *step as f64 * SWING_STEP;
                *step = step.wrapping_add(1);
                MotionSample::new(
                    *amplitude * phase.sin(),
                    *amplitude * 0.5 * phase.cos(),
                    GRAVITY + *amplitude * 0.25 * (phase * 1.7).sin(),
                )
            }
        }
    }
}

/// Accelerometer backed by a [`SampleSource`]
pub struct Accelerometer {
    source: SampleSource,
    active: bool,
}

impl Accelerometer {
    /// Open the accelerometer
    ///
    /// Fails when the replay file cannot be used or the synthetic amplitude
    /// is not a usable number; the app cannot run without a sensor.
    pub fn open(replay: Option<&Path>, amplitude: f64) -> Result<Self> {
        let source = match replay {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("cannot read replay file {}", path.display()))?;
                let samples = parse_replay(&text)
                    .with_context(|| format!("invalid replay file {}", path.display()))?;
                info!("Replaying {} readings from {}", samples.len(), path.display());
                SampleSource::Replay { samples, cursor: 0 }
            }
            None => {
                if !amplitude.is_finite() || amplitude < 0.0 {
                    bail!("synthetic amplitude must be a finite non-negative number");
                }
                info!("Using synthetic accelerometer, amplitude {}", amplitude);
                SampleSource::Synthetic { amplitude, step: 0 }
            }
        };

        Ok(Self::from_source(source))
    }

    fn from_source(source: SampleSource) -> Self {
        Self {
            source,
            active: false,
        }
    }
}

impl MotionSensor for Accelerometer {
    fn start(&mut self) {
        debug!("Accelerometer started");
        self.active = true;
    }

    fn stop(&mut self) {
        debug!("Accelerometer stopped");
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn read(&mut self) -> Option<MotionSample> {
        self.active.then(|| self.source.next_sample())
    }
}

/// Parse `x,y,z` lines; blank lines and `#` comments are skipped
pub fn parse_replay(text: &str) -> Result<Vec<MotionSample>> {
    let mut samples = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let axes = line
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {}: expected numbers", index + 1))?;

        match axes.as_slice() {
            [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
                samples.push(MotionSample::new(*x, *y, *z));
            }
            [_, _, _] => bail!("line {}: non-finite reading", index + 1),
            _ => bail!("line {}: expected 3 axes, found {}", index + 1, axes.len()),
        }
    }

    if samples.is_empty() {
        bail!("no readings");
    }
    Ok(samples)
}
