//! Line-based button input from stdin

use std::io::{self, BufRead};
use std::thread;

use embassy_futures::block_on;
use log::{debug, warn};

use dwindle_core::session::Button;

use crate::channels::{InputCommand, INPUT_CHANNEL};

/// Parse one input line
///
/// Accepts button names (`start`, `pause`, `+10`, ...), `help` and
/// `quit`/`q`/`exit`. Returns `None` for blank or unknown lines.
pub fn parse_command(line: &str) -> Option<InputCommand> {
    let word = line.trim();
    match word {
        "" => None,
        "help" | "h" | "?" => Some(InputCommand::Help),
        "quit" | "q" | "exit" => Some(InputCommand::Quit),
        _ => Button::from_name(word).map(InputCommand::Press),
    }
}

/// Print the command list
pub fn print_help() {
    let names: Vec<&str> = Button::ALL.iter().map(|button| button.name()).collect();
    println!("buttons: {}", names.join(" "));
    println!("other:   help quit");
}

/// Ask the main loop to leave through the exit hook
pub fn request_quit() {
    if INPUT_CHANNEL.try_send(InputCommand::Quit).is_err() {
        warn!("Input queue full, quit request dropped");
    }
}

/// Turn Ctrl-C and termination signals into a quit request
pub fn install_signal_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(request_quit)
}

/// Read stdin on a thread and forward commands to [`INPUT_CHANNEL`]
///
/// End of input is treated as quit.
pub fn spawn_stdin_reader() -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin".into())
        .spawn(|| {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("stdin read failed: {}", e);
                        break;
                    }
                };

                match parse_command(&line) {
                    Some(command) => block_on(INPUT_CHANNEL.send(command)),
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command '{}', type help", line.trim()),
                }
            }

            debug!("stdin closed");
            block_on(INPUT_CHANNEL.send(InputCommand::Quit));
        })
}
