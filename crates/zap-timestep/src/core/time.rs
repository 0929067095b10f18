use chrono::{DateTime, TimeDelta, Utc};

use crate::api::error::RangeError;
use crate::api::types::{ElapsedSteps, ElapsedTime, TickSpan, TICKS_PER_SECOND};

/// Largest whole-step count a single advance can report.
const MAX_FULL_STEPS: i64 = i32::MAX as i64;

/// Longest accepted step length, in ticks (about 7 minutes).
///
/// Bounded so that `MAX_FULL_STEPS * step` always fits in an `i64` tick count.
pub const MAX_STEP_TICKS: i64 = i64::MAX / MAX_FULL_STEPS;

const _: () = assert!(MAX_STEP_TICKS.checked_mul(MAX_FULL_STEPS).is_some());

pub(crate) fn check_step(step: TickSpan) -> Result<(), RangeError> {
    if step.ticks() <= 0 || step.ticks() > MAX_STEP_TICKS {
        return Err(RangeError::StepLength {
            ticks: step.ticks(),
            max: MAX_STEP_TICKS,
        });
    }
    Ok(())
}

/// Fixed timestep accumulator.
/// Turns irregular frame times into a number of whole fixed steps to simulate,
/// plus an interpolation alpha for rendering between the last two steps.
///
/// All arithmetic is done on integer ticks, so no time is lost or invented
/// between calls. Only time and counts are tracked; the caller runs its own
/// update and render logic.
///
/// Single owner, single thread: `advance` takes `&mut self` and there is no
/// internal synchronization.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed length of one step.
    step: TickSpan,
    /// Only used to derive `last_update_time`.
    start_time: DateTime<Utc>,
    /// Sum of all whole steps consumed so far.
    elapsed_steps: TickSpan,
    /// Time not yet consumed by a whole step. In `[0, step)` between calls,
    /// unless a saturated advance left whole steps for the next call.
    accumulated: TickSpan,
}

impl FixedTimestep {
    /// Creates an accumulator whose start time is now.
    ///
    /// Fails if `step` is not positive or exceeds [`MAX_STEP_TICKS`].
    pub fn new(step: TickSpan) -> Result<Self, RangeError> {
        Self::with_start_time(step, Utc::now())
    }

    /// Creates an accumulator with an explicit start time.
    /// The start time only affects [`last_update_time`](Self::last_update_time).
    pub fn with_start_time(step: TickSpan, start_time: DateTime<Utc>) -> Result<Self, RangeError> {
        check_step(step)?;
        log::debug!("fixed timestep: step={} ticks, start={}", step.ticks(), start_time);

        Ok(Self {
            step,
            start_time,
            elapsed_steps: TickSpan::ZERO,
            accumulated: TickSpan::ZERO,
        })
    }

    /// Adds the time elapsed since the previous call and returns the whole
    /// steps that became due, plus alpha.
    ///
    /// Step counts are incremental: each call only reports steps not reported
    /// before. If a single call covers more than `i32::MAX` steps the count
    /// saturates and the surplus stays accumulated for later calls.
    ///
    /// The accumulated time saturates too: [`total_time`](Self::total_time)
    /// never exceeds [`TickSpan::MAX`], and time fed beyond that is dropped.
    pub fn advance(&mut self, dt: ElapsedTime) -> ElapsedSteps {
        // `elapsed_steps` is never negative, so the headroom cannot overflow.
        let headroom = TickSpan::MAX - self.elapsed_steps;
        let accumulated = self.accumulated.saturating_add(dt.time());
        if accumulated > headroom {
            log::warn!("fixed timestep: total time saturated at {} ticks", i64::MAX);
        }
        self.accumulated = accumulated.min(headroom);

        // Round down to a multiple of the step length.
        let full_steps = self.accumulated.ticks() / self.step.ticks();
        if full_steps > MAX_FULL_STEPS {
            log::warn!(
                "fixed timestep: {} steps due in one advance, reporting {}",
                full_steps,
                MAX_FULL_STEPS
            );
        }
        let full_steps = full_steps.min(MAX_FULL_STEPS);
        // Cannot overflow: the step length is capped at MAX_STEP_TICKS.
        let consumed = TickSpan::from_ticks(full_steps * self.step.ticks());

        // Bounded by the headroom clamp above.
        self.elapsed_steps = self.elapsed_steps + consumed;
        self.accumulated = self.accumulated - consumed;

        let alpha = self.alpha();
        log::trace!(
            "fixed timestep: +{} ticks -> {} steps, alpha {:.4}",
            dt.ticks(),
            full_steps,
            alpha
        );

        ElapsedSteps::from_valid(full_steps as i32, alpha)
    }

    /// Like [`advance`](Self::advance), for callers holding a raw span.
    ///
    /// A negative span is rejected before any state changes.
    pub fn advance_span(&mut self, dt: TickSpan) -> Result<ElapsedSteps, RangeError> {
        let dt = ElapsedTime::new(dt)?;
        Ok(self.advance(dt))
    }

    /// Progress toward the next step, in `[0, 1)`.
    #[inline]
    pub fn alpha(&self) -> f64 {
        // The modulo only matters after a saturated advance left whole steps behind.
        let partial = self.accumulated.ticks() % self.step.ticks();
        partial as f64 / self.step.ticks() as f64
    }

    /// The fixed step length.
    #[inline]
    pub fn step_length(&self) -> TickSpan {
        self.step
    }

    /// One step as an elapsed time, ready to pass to the integration helpers.
    #[inline]
    pub fn step(&self) -> ElapsedTime {
        ElapsedTime::from_valid(self.step)
    }

    /// The fixed step length in seconds.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.step.as_secs_f64()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Sum of all whole steps reported so far.
    /// Only changes through `advance`. May be less than [`total_time`](Self::total_time).
    #[inline]
    pub fn total_timestep_time(&self) -> TickSpan {
        self.elapsed_steps
    }

    /// Total time fed in so far, including the partial step.
    /// Only changes through `advance`.
    #[inline]
    pub fn total_time(&self) -> TickSpan {
        self.elapsed_steps + self.accumulated
    }

    /// Start time plus [`total_time`](Self::total_time): when `advance` was last
    /// called, assuming the start time was given correctly.
    ///
    /// Saturates at the latest instant chrono can represent.
    pub fn last_update_time(&self) -> DateTime<Utc> {
        let total = self.total_time().ticks();
        let delta = TimeDelta::seconds(total / TICKS_PER_SECOND)
            + TimeDelta::nanoseconds((total % TICKS_PER_SECOND) * 100);
        self.start_time
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
