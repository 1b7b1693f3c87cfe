use crate::{
    error::ApiError,
    events::Effect,
    types::{DeviceStatus, StatusSnapshot},
};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::Instant;

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Keeps the freshest device status snapshot
///
/// Failed polls are only logged: the next scheduled poll is the retry.
#[derive(Debug, Default)]
pub struct StatusPoller {
    snapshot: Option<StatusSnapshot>,
    consecutive_failures: u32,
}

impl StatusPoller {
    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Issue one status request
    pub fn poll(&self, now: Instant) -> Effect {
        Effect::FetchStatus { requested_at: now }
    }

    /// Replace the snapshot with a successful response
    ///
    /// Returns true if a new snapshot was published. Failures and responses
    /// to requests older than the published snapshot leave it untouched.
    pub fn publish(
        &mut self,
        requested_at: Instant,
        result: Result<DeviceStatus, ApiError>,
        now: Instant,
    ) -> bool {
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                self.consecutive_failures += 1;
                warn!(
                    "status poll failed ({} in a row): {e}",
                    self.consecutive_failures
                );
                return false;
            }
        };

        let mut observed_at = now;
        if let Some(current) = &self.snapshot {
            if requested_at < current.requested_at {
                debug!("dropping out-of-order status response");
                return false;
            }
            observed_at = observed_at.max(current.observed_at);
        }

        if self.consecutive_failures > 0 {
            info!(
                "status poll recovered after {} failures",
                self.consecutive_failures
            );
            self.consecutive_failures = 0;
        }

        self.snapshot = Some(StatusSnapshot::new(status, requested_at, observed_at));
        true
    }
}
