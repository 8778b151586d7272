//! Presentation trait for the watch face
//!
//! The display is read-only from the core's point of view: the controller
//! picks a screen and pushes the numeric texts, and the only thing coming
//! back are button presses (see [`crate::session::Button`]).

use core::fmt::Write;

use heapless::String;

/// Capacity for a formatted motion value
///
/// Large enough for any finite `f64` printed with one decimal.
pub const VALUE_TEXT_LEN: usize = 320;

/// Screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Countdown running: remaining value and pause button
    Active,
    /// Countdown paused: remaining value with resume and stop buttons
    Paused,
    /// Target editor with start button
    Settings,
}

/// Visibility of the four display layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerVisibility {
    /// Large remaining-motion text
    pub motion_text: bool,
    /// Pause button
    pub pause: bool,
    /// Resume and stop buttons
    pub play_stop: bool,
    /// Target text, adjustment buttons and start button
    pub settings: bool,
}

impl Screen {
    /// Which layers are visible on this screen
    pub const fn layers(self) -> LayerVisibility {
        match self {
            Screen::Active => LayerVisibility {
                motion_text: true,
                pause: true,
                play_stop: false,
                settings: false,
            },
            Screen::Paused => LayerVisibility {
                motion_text: true,
                pause: false,
                play_stop: true,
                settings: false,
            },
            Screen::Settings => LayerVisibility {
                motion_text: false,
                pause: false,
                play_stop: false,
                settings: true,
            },
        }
    }
}

/// Trait for the watch face
pub trait Presentation {
    /// Switch to a screen
    fn show_screen(&mut self, screen: Screen);

    /// Replace the remaining-motion text
    fn set_remaining_text(&mut self, text: &str);

    /// Replace the target text on the settings screen
    fn set_target_text(&mut self, text: &str);
}

/// Helpers for pushing numeric values
pub trait PresentationExt: Presentation {
    /// Show remaining motion with one decimal place
    fn show_remaining(&mut self, remaining: f64) {
        let text = format_tenths(remaining);
        self.set_remaining_text(&text);
    }

    /// Show the motion target with one decimal place
    fn show_target(&mut self, target: f64) {
        let text = format_tenths(target);
        self.set_target_text(&text);
    }
}

// Blanket implementation for all Presentation types
impl<T: Presentation> PresentationExt for T {}

/// Format a value with exactly one decimal place
pub fn format_tenths(value: f64) -> String<VALUE_TEXT_LEN> {
    let mut text = String::new();
    if write!(text, "{:.1}", value).is_err() {
        text.clear();
        let _ = text.push_str("---");
    }
    text
}
