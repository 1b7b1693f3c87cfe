use tokio::time::Instant;

use crate::events::{Effect, Event};
use crate::model::Model;

/// Handle status polling and countdown reconciliation events
pub fn handle(event: Event, model: &mut Model, now: Instant) -> Vec<Effect> {
    match event {
        Event::Poll => vec![model.poller.poll(now)],
        Event::StatusFetched {
            requested_at,
            result,
        } => {
            if model.poller.publish(requested_at, result, now) {
                model.countdown.recompute(model.poller.snapshot(), now);
            }
            vec![]
        }
        Event::Tick => {
            model.countdown.recompute(model.poller.snapshot(), now);
            vec![]
        }
        _ => unreachable!("Non-status event passed to status handler"),
    }
}
