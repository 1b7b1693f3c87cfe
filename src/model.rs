use serde::Serialize;
use tokio::time::Instant;

use crate::services::{CountdownReconciler, PowerActionController, StatusPoller};
use crate::types::*;

/// Application Model - the complete state
#[derive(Debug, Default)]
pub struct Model {
    // Status state
    pub poller: StatusPoller,
    pub countdown: CountdownReconciler,

    // Power action state
    pub power: PowerActionController,
}

impl Model {
    pub fn new(default_countdown: u32) -> Self {
        Self {
            power: PowerActionController::new(default_countdown),
            ..Default::default()
        }
    }

    /// Earliest pending power action deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.power.next_deadline()
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            status: self.poller.snapshot().map(|s| s.details.clone()),
            countdown: self.countdown.view(),
            power_action: self.power.view(),
        }
    }
}

/// What the shell presents
#[derive(Debug, Default, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Latest device status, `None` until the first successful poll
    pub status: Option<DeviceStatus>,
    pub countdown: Option<CountdownView>,
    pub power_action: PowerActionView,
}
