//! Dwindle - Motion Countdown Simulator
//!
//! Host runtime for the motion countdown. Counts accelerometer displacement
//! down from a target, with a console watch face and stdin buttons standing
//! in for the device.

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{select3, Either3};
use embassy_time::{Duration, Instant, Ticker, Timer};
use log::{debug, error, info, warn};

use dwindle_core::session::SessionController;

mod channels;
mod cli;
mod console;
mod input;
mod sensor;
mod storage;

use crate::channels::{InputCommand, INPUT_CHANNEL};
use crate::cli::Cli;
use crate::console::{ConsoleDisplay, ConsoleHaptics};
use crate::sensor::Accelerometer;
use crate::storage::JsonFileStorage;

/// Interval for burst scheduling
const TICK_INTERVAL_MS: u64 = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    info!("Dwindle starting...");

    let sensor = match Accelerometer::open(cli.replay.as_deref(), cli.amplitude) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("This device does NOT have an accelerometer: {:#}", e);
            std::process::exit(1);
        }
    };

    let storage = JsonFileStorage::new(&cli.config);
    let mut controller =
        SessionController::new(sensor, ConsoleHaptics::new(), ConsoleDisplay::new(), storage);

    if let Err(e) = input::spawn_stdin_reader() {
        error!("Failed to start input reader: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = input::install_signal_handler() {
        warn!("Ctrl-C will exit without saving: {}", e);
    }
    input::print_help();

    let mut ticker = Ticker::every(Duration::from_millis(cli.sample_period_ms()));
    info!(
        "Sampling every {}ms, config at {}",
        cli.sample_period_ms(),
        controller.storage().path().display()
    );

    loop {
        match select3(
            INPUT_CHANNEL.receive(),
            ticker.next(),
            Timer::after_millis(TICK_INTERVAL_MS),
        )
        .await
        {
            Either3::First(command) => match command {
                InputCommand::Press(button) => {
                    debug!("Button: {}", button.name());
                    if let Err(e) = controller.dispatch(button) {
                        warn!("{} not available: {:?}", button.name(), e);
                    }
                }
                InputCommand::Help => input::print_help(),
                InputCommand::Quit => break,
            },
            Either3::Second(()) => {
                controller.poll_sensor(now_ms());
            }
            Either3::Third(()) => {}
        }

        controller.tick(now_ms());
    }

    controller.shutdown();
    info!(
        "Dwindle exiting, {} haptic patterns played",
        controller.haptics().played()
    );
    std::process::exit(0);
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}
