//! Buttons on the watch face

/// Target adjustment steps on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetStep {
    Add1,
    Add10,
    Add100,
    Subtract1,
    Subtract10,
    Subtract100,
}

impl TargetStep {
    /// Change applied to the target
    pub const fn delta(self) -> f64 {
        match self {
            TargetStep::Add1 => 1.0,
            TargetStep::Add10 => 10.0,
            TargetStep::Add100 => 100.0,
            TargetStep::Subtract1 => -1.0,
            TargetStep::Subtract10 => -10.0,
            TargetStep::Subtract100 => -100.0,
        }
    }
}

/// Button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Large play button on the paused screen
    Resume,
    /// Small play button on the settings screen
    Start,
    /// Pause button on the active screen
    Pause,
    /// Stop button on the paused screen
    Stop,
    /// One of the six target buttons
    Adjust(TargetStep),
}

impl Button {
    /// Every button, in screen order
    pub const ALL: [Button; 10] = [
        Button::Resume,
        Button::Start,
        Button::Pause,
        Button::Stop,
        Button::Adjust(TargetStep::Add1),
        Button::Adjust(TargetStep::Add10),
        Button::Adjust(TargetStep::Add100),
        Button::Adjust(TargetStep::Subtract1),
        Button::Adjust(TargetStep::Subtract10),
        Button::Adjust(TargetStep::Subtract100),
    ];

    /// Short name used by input sources
    pub const fn name(self) -> &'static str {
        match self {
            Button::Resume => "resume",
            Button::Start => "start",
            Button::Pause => "pause",
            Button::Stop => "stop",
            Button::Adjust(TargetStep::Add1) => "+1",
            Button::Adjust(TargetStep::Add10) => "+10",
            Button::Adjust(TargetStep::Add100) => "+100",
            Button::Adjust(TargetStep::Subtract1) => "-1",
            Button::Adjust(TargetStep::Subtract10) => "-10",
            Button::Adjust(TargetStep::Subtract100) => "-100",
        }
    }

    /// Parse a button from its short name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }
}
