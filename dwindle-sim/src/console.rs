//! Console stand-ins for the vibration motor and watch face

use log::info;

use dwindle_core::traits::{HapticPattern, Haptics, Presentation, Screen};

/// Vibration motor that logs each pattern
#[derive(Debug, Default)]
pub struct ConsoleHaptics {
    played: u32,
}

impl ConsoleHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of patterns played so far
    pub fn played(&self) -> u32 {
        self.played
    }
}

impl Haptics for ConsoleHaptics {
    fn play(&mut self, pattern: HapticPattern) {
        self.played += 1;
        info!("*bzz* {}", pattern.name());
    }
}

/// Watch face printed as one line per change
#[derive(Debug)]
pub struct ConsoleDisplay {
    screen: Screen,
    remaining: String,
    target: String,
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self {
            screen: Screen::Settings,
            remaining: String::new(),
            target: String::new(),
        }
    }
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the visible layers
    pub fn render(&self) -> String {
        let layers = self.screen.layers();
        let mut parts = Vec::new();

        if layers.motion_text {
            parts.push(format!("remaining {}", self.remaining));
        }
        if layers.pause {
            parts.push("[pause]".to_string());
        }
        if layers.play_stop {
            parts.push("[resume] [stop]".to_string());
        }
        if layers.settings {
            parts.push(format!(
                "target {}  [-100] [-10] [-1] [+1] [+10] [+100]  [start]",
                self.target
            ));
        }

        parts.join("  ")
    }

    fn refresh(&self) {
        println!("| {}", self.render());
    }
}

impl Presentation for ConsoleDisplay {
    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.refresh();
    }

    fn set_remaining_text(&mut self, text: &str) {
        self.remaining = text.to_string();
        if self.screen.layers().motion_text {
            self.refresh();
        }
    }

    fn set_target_text(&mut self, text: &str) {
        self.target = text.to_string();
        if self.screen.layers().settings {
            self.refresh();
        }
    }
}
