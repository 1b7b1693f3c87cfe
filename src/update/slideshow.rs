use log::{info, warn};
use tokio::time::Instant;

use crate::events::{Effect, Event};
use crate::model::Model;
use crate::types::Notification;

/// Handle slideshow control events
pub fn handle(event: Event, model: &mut Model, now: Instant) -> Vec<Effect> {
    match event {
        Event::Slideshow(command) => {
            info!("slideshow command: {command:?}");
            vec![Effect::Slideshow(command)]
        }
        // refresh right away so the countdown reflects the change
        Event::SlideshowResponse(Ok(ack)) => vec![
            Effect::Notify(Notification::success(ack.message())),
            model.poller.poll(now),
        ],
        Event::SlideshowResponse(Err(e)) => {
            warn!("slideshow command failed: {e}");
            vec![Effect::Notify(Notification::error(format!(
                "Error: {}",
                e.reason()
            )))]
        }
        _ => unreachable!("Non-slideshow event passed to slideshow handler"),
    }
}

