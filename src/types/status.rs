use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// System metrics reported alongside the slideshow status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemStats {
    pub memory_free_mb: Option<f64>,
    pub cpu_percent: Option<f64>,
    pub cpu_temp: Option<f64>,
    pub disk_free_gb: Option<f64>,
    pub disk_used_percent: Option<f64>,
}

/// Body of `GET /api/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceStatus {
    /// Seconds until the slideshow advances, as computed by the device
    pub time_remaining: u32,
    pub paused: bool,
    pub current_image: Option<String>,
    /// 1-based position of the current image
    pub current_index: Option<u32>,
    pub total_images: Option<u32>,
    pub temperature: Option<String>,
    pub weather: Option<String>,
    pub time: Option<String>,
    pub date: Option<String>,
    pub display_on: Option<bool>,
    pub manual_override: Option<bool>,
    pub delay_seconds: Option<u32>,
    pub system: Option<SystemStats>,
}

/// Immutable, timestamped copy of the last successfully polled device status
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub time_remaining_seconds: u32,
    pub paused: bool,
    /// Local clock reading taken right after the response arrived
    pub observed_at: Instant,
    /// Local clock reading taken when the poll was issued
    pub requested_at: Instant,
    pub details: DeviceStatus,
}

impl StatusSnapshot {
    pub fn new(details: DeviceStatus, requested_at: Instant, observed_at: Instant) -> Self {
        Self {
            time_remaining_seconds: details.time_remaining,
            paused: details.paused,
            observed_at,
            requested_at,
            details,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DisplayState {
    Active,
    Paused,
    Expired,
}

/// Countdown derived from the latest snapshot and the local clock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountdownView {
    pub display_seconds: u32,
    pub state: DisplayState,
    /// Low-time flag for urgency styling
    pub urgent: bool,
}
