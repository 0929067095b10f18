use chrono::{DateTime, Utc};
use zap_timestep::{ElapsedSteps, ElapsedTime, FixedTimestep, RangeError, TickSpan};

use crate::clock::{Clock, MonotonicClock};

/// What one [`StopwatchTimestep::update`] observed and produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopwatchFrame {
    /// Time measured since the previous update (zero if the clock stalled or regressed).
    pub elapsed: ElapsedTime,
    /// Whole steps due and interpolation alpha.
    pub steps: ElapsedSteps,
}

/// A [`FixedTimestep`] driven by a clock.
///
/// Measuring starts at construction. Each `update` reads the clock, feeds the
/// time since the previous reading to the accumulator and returns the result.
/// Not thread-safe; one owner drives it from one loop.
#[derive(Debug, Clone)]
pub struct StopwatchTimestep<C: Clock = MonotonicClock> {
    timestep: FixedTimestep,
    clock: C,
    /// Highest clock reading consumed so far.
    last_elapsed: TickSpan,
}

impl StopwatchTimestep<MonotonicClock> {
    /// Fails if `step` is not a valid step length.
    pub fn new(step: TickSpan) -> Result<Self, RangeError> {
        Ok(Self::with_clock(FixedTimestep::new(step)?, MonotonicClock::new()))
    }

    /// The start time only affects `last_update_time`.
    pub fn with_start_time(step: TickSpan, start_time: DateTime<Utc>) -> Result<Self, RangeError> {
        Ok(Self::with_clock(
            FixedTimestep::with_start_time(step, start_time)?,
            MonotonicClock::new(),
        ))
    }
}

impl<C: Clock> StopwatchTimestep<C> {
    /// Wrap an existing accumulator. The clock's current reading becomes the baseline.
    pub fn with_clock(timestep: FixedTimestep, mut clock: C) -> Self {
        let last_elapsed = clock.elapsed();
        Self {
            timestep,
            clock,
            last_elapsed,
        }
    }

    /// Read the clock and advance the accumulator by the time since the last update.
    ///
    /// If the clock reads at or before the previous reading, zero elapsed time
    /// is fed instead of an error, and the baseline stays put so the same
    /// interval is never counted twice. Alpha can still be non-zero then.
    pub fn update(&mut self) -> StopwatchFrame {
        let current = self.clock.elapsed();

        let elapsed = if current > self.last_elapsed {
            // Readings may span more than the tick range (e.g. negative to huge).
            let dt = current.saturating_sub(self.last_elapsed);
            self.last_elapsed = current;
            ElapsedTime::new(dt).unwrap_or(ElapsedTime::ZERO)
        } else {
            if current < self.last_elapsed {
                log::debug!(
                    "stopwatch: clock went back {} ticks, treating as no time elapsed",
                    self.last_elapsed.saturating_sub(current).ticks()
                );
            }
            ElapsedTime::ZERO
        };

        let steps = self.timestep.advance(elapsed);
        StopwatchFrame { elapsed, steps }
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// See [`FixedTimestep::total_timestep_time`].
    pub fn total_timestep_time(&self) -> TickSpan {
        self.timestep.total_timestep_time()
    }

    /// See [`FixedTimestep::total_time`].
    pub fn total_time(&self) -> TickSpan {
        self.timestep.total_time()
    }

    /// See [`FixedTimestep::last_update_time`].
    pub fn last_update_time(&self) -> DateTime<Utc> {
        self.timestep.last_update_time()
    }
}
