pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod frame_client;
pub mod http_client;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod runtime;
pub mod services;
pub mod types;
pub mod update;

#[cfg(test)]
mod tests;

use tokio::time::Instant;

// Re-export core types
pub use crate::{
    error::ApiError,
    events::{Effect, Event},
    model::{Model, ViewModel},
    types::*,
};

/// The Core application
///
/// Pure state machine: every input arrives as an [`Event`] together with the
/// current instant and every output is an [`Effect`] for the shell to run.
#[derive(Debug)]
pub struct App {
    model: Model,
    default_countdown: u32,
}

impl App {
    pub fn new(default_countdown: u32) -> Self {
        Self {
            model: Model::new(default_countdown),
            default_countdown,
        }
    }

    pub fn update(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        update::update(event, &mut self.model, now)
    }

    pub fn view(&self) -> ViewModel {
        self.model.view()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Earliest instant at which the shell must send [`Event::TimerElapsed`]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.model.next_deadline()
    }

    /// Discard all state, as a fresh start of the client would
    pub fn reload(&mut self) {
        self.model = Model::new(self.default_countdown);
    }
}
