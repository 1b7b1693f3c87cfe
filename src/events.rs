use crate::error::ApiError;
use crate::types::*;
use tokio::time::Instant;

/// Events that can happen in the app
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Schedulers
    /// Status poll interval elapsed
    Poll,
    /// Countdown display tick
    Tick,
    /// A power action deadline was reached
    TimerElapsed,

    // Power actions (user)
    Confirm(PowerActionKind),
    Dismiss,
    Request {
        countdown_seconds: Option<u32>,
    },
    Cancel,

    // Slideshow controls (user)
    Slideshow(SlideshowCommand),

    // HTTP responses
    StatusFetched {
        requested_at: Instant,
        result: Result<DeviceStatus, ApiError>,
    },
    PowerActionResponse(Result<(), ApiError>),
    CancelResponse(Result<(), ApiError>),
    SlideshowResponse(Result<SlideshowAck, ApiError>),
}

/// Side effects requested by the core and executed by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchStatus {
        requested_at: Instant,
    },
    RequestPowerAction {
        kind: PowerActionKind,
        countdown_seconds: u32,
    },
    CancelPowerAction,
    Slideshow(SlideshowCommand),
    Notify(Notification),
    /// Rebuild the client from scratch
    Reload,
}
