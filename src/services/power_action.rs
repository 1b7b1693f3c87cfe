use crate::{
    error::ApiError,
    events::Effect,
    frame_client::PowerActionRequest,
    services::timers::{CountdownTimers, OneShot, earliest, whole_seconds_until},
    types::{
        Notification, PowerAction, PowerActionKind, PowerActionView, PowerPhase,
        countdown_message,
    },
};
use log::{debug, error, info, warn};
use serde_valid::Validate;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_COUNTDOWN_SECS: u32 = 10;
/// Time the device gets to come back before the client reloads after a restart
pub const RELOAD_GRACE_PERIOD: Duration = Duration::from_secs(30);
/// How long a completed shutdown stays on screen before the controller idles
pub const SHUTDOWN_HOLD: Duration = Duration::from_secs(5);
pub const CANCELLED_MESSAGE: &str = "Power action cancelled successfully";

/// Owns the single power action of the client and all of its timers
#[derive(Debug)]
pub struct PowerActionController {
    default_countdown: u32,
    action: Option<PowerAction>,
    timers: CountdownTimers,
    /// Ends `Completing`: reload after a restart, back to idle after a shutdown
    terminal: OneShot,
    cancel_in_flight: bool,
    remaining_seconds: Option<u32>,
}

impl Default for PowerActionController {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}

impl PowerActionController {
    pub fn new(default_countdown: u32) -> Self {
        Self {
            default_countdown,
            action: None,
            timers: CountdownTimers::default(),
            terminal: OneShot::default(),
            cancel_in_flight: false,
            remaining_seconds: None,
        }
    }

    pub fn action(&self) -> Option<&PowerAction> {
        self.action.as_ref()
    }

    pub fn phase(&self) -> PowerPhase {
        self.action.as_ref().map_or(PowerPhase::Idle, |a| a.phase)
    }

    /// True while a countdown tick, completion or terminal timer is pending
    pub fn has_live_timers(&self) -> bool {
        self.timers.is_armed() || self.terminal.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.timers.next_deadline(), self.terminal.deadline())
    }

    pub fn view(&self) -> PowerActionView {
        let Some(action) = &self.action else {
            return PowerActionView::default();
        };

        let message = match action.phase {
            PowerPhase::CountingDown => self
                .remaining_seconds
                .map(|remaining| countdown_message(action.kind, remaining)),
            PowerPhase::Completing => Some(action.kind.completed_message().to_string()),
            _ => None,
        };

        PowerActionView {
            kind: Some(action.kind),
            phase: action.phase,
            remaining_seconds: self.remaining_seconds,
            message,
            cancellable: action.phase == PowerPhase::CountingDown && !self.cancel_in_flight,
        }
    }

    pub fn confirm(&mut self, kind: PowerActionKind) -> Vec<Effect> {
        if let Some(current) = &self.action {
            warn!(
                "rejecting {kind}: {} is already {:?}",
                current.kind, current.phase
            );
            return vec![Effect::Notify(Notification::warning(
                ApiError::CONFLICT_FALLBACK,
            ))];
        }

        info!("{kind}: awaiting confirmation");
        self.action = Some(PowerAction::confirming(kind));
        vec![]
    }

    pub fn dismiss(&mut self) -> Vec<Effect> {
        match self.phase() {
            PowerPhase::Confirming => {
                info!("power action dismissed");
                self.reset();
            }
            phase => debug!("dismiss ignored in phase {phase:?}"),
        }
        vec![]
    }

    /// Send the confirmed action, `None` or zero meaning the default countdown
    pub fn request(&mut self, countdown_seconds: Option<u32>) -> Vec<Effect> {
        let Some(action) = self
            .action
            .as_mut()
            .filter(|a| a.phase == PowerPhase::Confirming)
        else {
            warn!("request ignored: nothing to confirm");
            return vec![];
        };

        let countdown = countdown_seconds
            .filter(|secs| *secs > 0)
            .unwrap_or(self.default_countdown);

        if let Err(e) = (PowerActionRequest { countdown }).validate() {
            warn!("invalid countdown {countdown}: {e}");
            return vec![Effect::Notify(Notification::error(format!(
                "Invalid countdown: {countdown}"
            )))];
        }

        action.phase = PowerPhase::Requesting;
        action.countdown_seconds = countdown;
        info!("{}: requesting with {countdown}s countdown", action.kind);

        vec![Effect::RequestPowerAction {
            kind: action.kind,
            countdown_seconds: countdown,
        }]
    }

    pub fn on_request_response(
        &mut self,
        result: Result<(), ApiError>,
        now: Instant,
    ) -> Vec<Effect> {
        let Some(action) = self
            .action
            .as_mut()
            .filter(|a| a.phase == PowerPhase::Requesting)
        else {
            debug!("ignoring power action response without pending request");
            return vec![];
        };
        let kind = action.kind;

        match result {
            Ok(()) => {
                let countdown = action.countdown_seconds;
                let end_at = now + Duration::from_secs(u64::from(countdown));
                action.phase = PowerPhase::CountingDown;
                action.end_at = Some(end_at);
                self.timers.arm(now, end_at);
                self.remaining_seconds = Some(whole_seconds_until(end_at, now));
                info!("{kind}: counting down from {countdown}s");
                vec![Effect::Notify(Notification::success(
                    kind.started_message(countdown),
                ))]
            }
            Err(e) if e.is_conflict() => {
                info!("{kind}: rejected by device: {e}");
                self.reset();
                vec![Effect::Notify(Notification::warning(e.reason()))]
            }
            Err(e) => {
                error!("{kind}: request failed: {e}");
                let message = match &e {
                    ApiError::Network(reason) => format!("Error initiating {kind}: {reason}"),
                    _ => format!("{} failed: {}", kind.name(), e.reason()),
                };
                self.reset();
                vec![Effect::Notify(Notification::error(message))]
            }
        }
    }

    pub fn cancel(&mut self) -> Vec<Effect> {
        if self.phase() != PowerPhase::CountingDown {
            warn!("cancel ignored: no countdown running");
            return vec![];
        }
        if self.cancel_in_flight {
            debug!("cancel already in flight");
            return vec![];
        }

        info!("requesting cancel");
        self.cancel_in_flight = true;
        vec![Effect::CancelPowerAction]
    }

    /// Local timers are only torn down once the device confirmed the cancel
    pub fn on_cancel_response(&mut self, result: Result<(), ApiError>) -> Vec<Effect> {
        self.cancel_in_flight = false;

        let Some(action) = self
            .action
            .as_mut()
            .filter(|a| matches!(a.phase, PowerPhase::CountingDown | PowerPhase::Completing))
        else {
            debug!("ignoring cancel response without active power action");
            return vec![];
        };

        match result {
            Ok(()) => {
                info!("{}: cancelled", action.kind);
                self.reset();
                vec![Effect::Notify(Notification::success(CANCELLED_MESSAGE))]
            }
            Err(ApiError::Network(reason)) => {
                error!("cancel failed: {reason}");
                vec![Effect::Notify(Notification::error(format!(
                    "Error cancelling power action: {reason}"
                )))]
            }
            Err(e) => {
                error!("cancel failed: {e}");
                vec![Effect::Notify(Notification::error(format!(
                    "Cancel failed: {}",
                    e.reason()
                )))]
            }
        }
    }

    /// Advance whatever deadlines have passed at `now`
    pub fn on_timer(&mut self, now: Instant) -> Vec<Effect> {
        if self.terminal.fire(now) {
            let kind = self.action.as_ref().map(|a| a.kind);
            self.reset();
            return match kind {
                Some(PowerActionKind::Restart) => {
                    info!("reload grace period elapsed");
                    vec![Effect::Reload]
                }
                _ => {
                    info!("shutdown completed");
                    vec![]
                }
            };
        }

        let Some(action) = self
            .action
            .as_mut()
            .filter(|a| a.phase == PowerPhase::CountingDown)
        else {
            return vec![];
        };

        if self.timers.completion_elapsed(now) {
            self.timers.clear();
            action.phase = PowerPhase::Completing;
            self.remaining_seconds = Some(0);
            match action.kind {
                PowerActionKind::Restart => {
                    action.completion_scheduled = true;
                    self.terminal.arm(now + RELOAD_GRACE_PERIOD);
                }
                PowerActionKind::Shutdown => self.terminal.arm(now + SHUTDOWN_HOLD),
            }
            info!("{}: countdown elapsed", action.kind);
            return vec![Effect::Notify(Notification::warning(
                action.kind.completed_message(),
            ))];
        }

        if self.timers.tick_elapsed(now) {
            self.remaining_seconds = action
                .end_at
                .map(|end_at| whole_seconds_until(end_at, now));
        }
        vec![]
    }

    fn reset(&mut self) {
        self.action = None;
        self.timers.clear();
        self.terminal.clear();
        self.cancel_in_flight = false;
        self.remaining_seconds = None;
    }
}
