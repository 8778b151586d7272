//! Inter-task communication channels
//!
//! Button commands arrive from the stdin reader thread and are consumed by
//! the main loop. Uses embassy-sync primitives so the loop can await them.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use dwindle_core::session::Button;

/// Channel capacity for input commands
const INPUT_CHANNEL_SIZE: usize = 8;

/// Commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// A watch-face button was pressed
    Press(Button),
    /// Print the list of commands
    Help,
    /// Leave the app (runs the exit hook)
    Quit,
}

/// Input commands from stdin
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputCommand, INPUT_CHANNEL_SIZE> =
    Channel::new();
