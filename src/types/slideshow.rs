use serde::{Deserialize, Serialize};

/// Display power mode accepted by `POST /api/display`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    On,
    Off,
    Auto,
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "auto" => Ok(Self::Auto),
            other => Err(format!("invalid display mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowCommand {
    Next,
    Previous,
    TogglePause,
    SetDisplay(DisplayMode),
}

/// Successful outcome of a slideshow command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowAck {
    Next,
    Previous,
    Paused(bool),
    Display(DisplayMode),
}

impl SlideshowAck {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Next => "Moved to next image",
            Self::Previous => "Moved to previous image",
            Self::Paused(true) => "Slideshow paused",
            Self::Paused(false) => "Slideshow resumed",
            Self::Display(DisplayMode::On) => "Display turned on",
            Self::Display(DisplayMode::Off) => "Display turned off",
            Self::Display(DisplayMode::Auto) => "Display set to auto mode",
        }
    }
}
