//! Command-line options

use std::path::PathBuf;

use clap::Parser;

/// Default location of the persisted record
pub const DEFAULT_CONFIG_FILE: &str = "configuration.json";

/// Motion countdown running against a simulated accelerometer
#[derive(Debug, Parser)]
#[command(name = "dwindle-sim", version, about)]
pub struct Cli {
    /// Persisted target/remaining record
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Replay accelerometer readings from a CSV file (`x,y,z` per line)
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Accelerometer sampling frequency
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub sample_hz: u32,

    /// Swing amplitude of the synthetic accelerometer
    #[arg(long, default_value_t = 60.0)]
    pub amplitude: f64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Sampling period in milliseconds
    pub fn sample_period_ms(&self) -> u64 {
        1_000 / self.sample_hz.max(1) as u64
    }

    /// Default log filter
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
