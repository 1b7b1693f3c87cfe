use tokio::time::Instant;

use crate::events::{Effect, Event};
use crate::model::Model;

/// Handle power action events (confirm, request, cancel, deadlines)
pub fn handle(event: Event, model: &mut Model, now: Instant) -> Vec<Effect> {
    match event {
        Event::Confirm(kind) => model.power.confirm(kind),
        Event::Dismiss => model.power.dismiss(),
        Event::Request { countdown_seconds } => model.power.request(countdown_seconds),
        Event::PowerActionResponse(result) => model.power.on_request_response(result, now),
        Event::Cancel => model.power.cancel(),
        Event::CancelResponse(result) => model.power.on_cancel_response(result),
        Event::TimerElapsed => model.power.on_timer(now),
        _ => unreachable!("Non-power event passed to power handler"),
    }
}
