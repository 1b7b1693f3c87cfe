use crate::{
    services::timers::{ONE_SECOND, whole_seconds_since},
    types::{CountdownView, DisplayState, StatusSnapshot},
};
use std::time::Duration;
use tokio::time::Instant;

pub const TICK_INTERVAL: Duration = ONE_SECOND;
pub const URGENT_THRESHOLD_SECS: u32 = 5;

/// Derives the slideshow countdown between polls
#[derive(Debug, Default)]
pub struct CountdownReconciler {
    view: Option<CountdownView>,
}

impl CountdownReconciler {
    /// `None` until the first snapshot has been observed
    pub fn view(&self) -> Option<CountdownView> {
        self.view
    }

    pub fn recompute(
        &mut self,
        snapshot: Option<&StatusSnapshot>,
        now: Instant,
    ) -> Option<CountdownView> {
        if let Some(snapshot) = snapshot {
            self.view = Some(reconcile(snapshot, now));
        }
        self.view
    }
}

/// Remaining seconds implied by `snapshot` at `now`
///
/// While paused the authoritative value is shown as is.
pub fn reconcile(snapshot: &StatusSnapshot, now: Instant) -> CountdownView {
    if snapshot.paused {
        return CountdownView {
            display_seconds: snapshot.time_remaining_seconds,
            state: DisplayState::Paused,
            urgent: false,
        };
    }

    let elapsed = whole_seconds_since(snapshot.observed_at, now);
    let display_seconds =
        u32::try_from(u64::from(snapshot.time_remaining_seconds).saturating_sub(elapsed))
            .unwrap_or(0);

    CountdownView {
        display_seconds,
        state: if display_seconds == 0 {
            DisplayState::Expired
        } else {
            DisplayState::Active
        },
        urgent: display_seconds <= URGENT_THRESHOLD_SECS,
    }
}
