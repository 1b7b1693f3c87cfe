mod power;
mod slideshow;
mod status;

use tokio::time::Instant;

use crate::events::{Effect, Event};
use crate::model::Model;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model, now: Instant) -> Vec<Effect> {
    match event {
        // Status domain
        Event::Poll | Event::StatusFetched { .. } | Event::Tick => {
            status::handle(event, model, now)
        }

        // Power action domain
        Event::Confirm(_)
        | Event::Dismiss
        | Event::Request { .. }
        | Event::Cancel
        | Event::PowerActionResponse(_)
        | Event::CancelResponse(_)
        | Event::TimerElapsed => power::handle(event, model, now),

        // Slideshow domain
        Event::Slideshow(_) | Event::SlideshowResponse(_) => slideshow::handle(event, model, now),
    }
}
