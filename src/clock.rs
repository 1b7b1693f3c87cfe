use tokio::time::Instant;

/// Source of monotonic clock readings
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by Tokio's time driver
///
/// Follows the runtime's virtual clock when time is paused, which is what
/// the runtime tests rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
