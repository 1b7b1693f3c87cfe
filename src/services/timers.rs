//! Deadline-based timers shared by the countdowns.
//!
//! Timers are plain absolute deadlines owned by the state machine that uses
//! them. The runtime sleeps until the earliest deadline and then hands the
//! current instant back; nothing fires on its own, so a cleared timer can
//! never deliver a late callback.

use std::time::Duration;
use tokio::time::Instant;

pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// Whole seconds elapsed since `since`, rounded down
pub fn whole_seconds_since(since: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(since).as_secs()
}

/// Whole seconds left until `deadline`, rounded up and clamped at zero
pub fn whole_seconds_until(deadline: Instant, now: Instant) -> u32 {
    let left = deadline.saturating_duration_since(now);
    let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// The earlier of two optional deadlines
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Timer that fires once at its deadline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShot {
    due: Option<Instant>,
}

impl OneShot {
    pub fn arm(&mut self, due: Instant) {
        self.due = Some(due);
    }

    pub fn clear(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Disarm and return true if the deadline has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Timer that fires every `period`, anchored at its start instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeating {
    period: Duration,
    next: Option<Instant>,
}

impl Repeating {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn clear(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Return true if at least one period elapsed and schedule the next one
    ///
    /// Missed periods collapse into a single firing; the schedule stays
    /// anchored to the original start so it does not drift.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(mut next) = self.next else {
            return false;
        };
        if next > now {
            return false;
        }
        while next <= now {
            next += self.period;
        }
        self.next = Some(next);
        true
    }
}

/// The live timer pair of one countdown: a display tick and the completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTimers {
    tick: Repeating,
    completion: OneShot,
}

impl Default for CountdownTimers {
    fn default() -> Self {
        Self {
            tick: Repeating::new(ONE_SECOND),
            completion: OneShot::default(),
        }
    }
}

impl CountdownTimers {
    /// Arm both timers, discarding whatever was armed before
    pub fn arm(&mut self, now: Instant, end_at: Instant) {
        self.clear();
        self.tick.start(now);
        self.completion.arm(end_at);
    }

    pub fn clear(&mut self) {
        self.tick.clear();
        self.completion.clear();
    }

    pub fn is_armed(&self) -> bool {
        self.tick.is_armed() || self.completion.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.tick.deadline(), self.completion.deadline())
    }

    pub fn tick_elapsed(&mut self, now: Instant) -> bool {
        self.tick.fire(now)
    }

    pub fn completion_elapsed(&mut self, now: Instant) -> bool {
        self.completion.fire(now)
    }
}
