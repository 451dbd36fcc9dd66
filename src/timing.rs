//! Fixed-interval scheduling for the simulation.

use std::time::{Duration, Instant};

use tracing::debug;

/// Decides when the next simulation tick is due.
///
/// Deadlines advance by exactly one period per tick, so a late frame catches up on the
/// following polls instead of drifting. A ticker that falls more than a few periods behind
/// skips ahead rather than replaying every missed tick.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    halted: bool,
}

/// How many periods a ticker may lag before it drops the backlog.
const MAX_BACKLOG: u32 = 5;

impl Ticker {
    /// Creates a running ticker whose first tick is due one period from `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
            halted: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true if a tick is due at `now`, and schedules the one after it.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.halted || now < self.next {
            return false;
        }

        self.next += self.period;
        if now > self.next + self.period * MAX_BACKLOG {
            debug!(behind = ?(now - self.next), "Ticker fell behind, skipping ahead");
            self.next = now + self.period;
        }
        true
    }

    /// Stops producing ticks until [`Ticker::resume`].
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Starts ticking again, with the next tick one full period after `now`.
    pub fn resume(&mut self, now: Instant) {
        self.halted = false;
        self.next = now + self.period;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Time left until the next tick is due; `None` while halted.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        (!self.halted).then(|| self.next.saturating_duration_since(now))
    }
}
