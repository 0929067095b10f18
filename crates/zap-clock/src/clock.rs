use std::time::Instant;

use zap_timestep::TickSpan;

/// A source of time elapsed since some fixed origin.
///
/// Readings should never decrease, but on some platforms precise
/// measurements of very short intervals occasionally do. Callers must cope.
pub trait Clock {
    /// Time since the clock's origin.
    fn elapsed(&mut self) -> TickSpan;
}

/// Wall-clock time from [`std::time::Instant`], starting at construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&mut self) -> TickSpan {
        // Saturates only after ~29k years of uptime.
        TickSpan::try_from(self.origin.elapsed()).unwrap_or(TickSpan::MAX)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: TickSpan,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading. Going backwards is allowed.
    pub fn set(&mut self, now: TickSpan) {
        self.now = now;
    }

    /// Move the reading by `delta`, which may be negative. Saturates at the tick range.
    pub fn advance(&mut self, delta: TickSpan) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn now(&self) -> TickSpan {
        self.now
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> TickSpan {
        self.now
    }
}
