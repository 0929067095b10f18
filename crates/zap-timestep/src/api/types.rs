use std::ops::{Add, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::error::RangeError;

/// Number of ticks in one second. One tick is 100 nanoseconds.
pub const TICKS_PER_SECOND: i64 = 10_000_000;
/// Number of ticks in one millisecond.
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
const NANOS_PER_TICK: i64 = 100;
/// Largest `f32` below 1.0.
const MAX_ALPHA_F32: f32 = 1.0 - f32::EPSILON / 2.0;

/// A signed span of time measured in 100ns ticks.
///
/// This is the duration representation used throughout the crate. It may be
/// negative; validation happens where a span is turned into an [`ElapsedTime`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickSpan(i64);

impl TickSpan {
    pub const ZERO: TickSpan = TickSpan(0);
    pub const MAX: TickSpan = TickSpan(i64::MAX);

    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Saturates at the `i64` tick range (about ±29k years).
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(TICKS_PER_MILLISECOND))
    }

    /// Saturates at the `i64` tick range (about ±29k years).
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(TICKS_PER_SECOND))
    }

    #[inline]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn saturating_add(self, rhs: TickSpan) -> TickSpan {
        TickSpan(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub const fn saturating_sub(self, rhs: TickSpan) -> TickSpan {
        TickSpan(self.0.saturating_sub(rhs.0))
    }
}

impl Add for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn add(self, rhs: TickSpan) -> TickSpan {
        TickSpan(self.0 + rhs.0)
    }
}

impl Sub for TickSpan {
    type Output = TickSpan;

    #[inline]
    fn sub(self, rhs: TickSpan) -> TickSpan {
        TickSpan(self.0 - rhs.0)
    }
}

impl TryFrom<Duration> for TickSpan {
    type Error = RangeError;

    /// Sub-tick nanoseconds are truncated.
    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        let ticks = duration.as_nanos() / NANOS_PER_TICK as u128;
        i64::try_from(ticks)
            .map(TickSpan)
            .map_err(|_| RangeError::DurationOverflow { duration })
    }
}

// ── ElapsedTime ──────────────────────────────────────────────────────────

/// Real time observed since the previous poll.
///
/// Always non-negative, and its seconds value is always finite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElapsedTime {
    time: TickSpan,
    seconds: f64,
}

impl ElapsedTime {
    /// No time has elapsed.
    pub const ZERO: ElapsedTime = ElapsedTime {
        time: TickSpan::ZERO,
        seconds: 0.0,
    };

    /// Fails if `time` is negative.
    pub fn new(time: TickSpan) -> Result<Self, RangeError> {
        if time.is_negative() {
            return Err(RangeError::NegativeElapsed { ticks: time.ticks() });
        }
        Ok(Self {
            time,
            seconds: time.as_secs_f64(),
        })
    }

    pub fn from_ticks(ticks: i64) -> Result<Self, RangeError> {
        Self::new(TickSpan::from_ticks(ticks))
    }

    /// For spans already known to be non-negative.
    #[inline]
    pub(crate) fn from_valid(time: TickSpan) -> Self {
        debug_assert!(!time.is_negative());
        Self {
            time,
            seconds: time.as_secs_f64(),
        }
    }

    /// Builds an elapsed time from seconds, rounded to the nearest 100ns tick.
    ///
    /// The given seconds are kept as-is, so `seconds()` returns exactly `seconds`.
    pub fn from_secs_f64(seconds: f64) -> Result<Self, RangeError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(RangeError::InvalidSeconds { seconds });
        }

        let ticks = (seconds * TICKS_PER_SECOND as f64).round();
        // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
        if ticks >= i64::MAX as f64 {
            return Err(RangeError::SecondsOverflow { seconds });
        }

        Ok(Self {
            time: TickSpan::from_ticks(ticks as i64),
            seconds,
        })
    }

    /// The elapsed time as a tick span.
    #[inline]
    pub fn time(&self) -> TickSpan {
        self.time
    }

    #[inline]
    pub fn ticks(&self) -> i64 {
        self.time.ticks()
    }

    /// The elapsed time in seconds.
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl TryFrom<TickSpan> for ElapsedTime {
    type Error = RangeError;

    fn try_from(time: TickSpan) -> Result<Self, Self::Error> {
        Self::new(time)
    }
}

impl TryFrom<Duration> for ElapsedTime {
    type Error = RangeError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::new(TickSpan::try_from(duration)?)
    }
}

// ── ElapsedSteps ─────────────────────────────────────────────────────────

/// Whole fixed steps elapsed since the previous advance, plus the fraction
/// of the next step already accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElapsedSteps {
    full_steps: i32,
    alpha: f64,
}

impl ElapsedSteps {
    /// No steps have elapsed.
    pub const ZERO: ElapsedSteps = ElapsedSteps {
        full_steps: 0,
        alpha: 0.0,
    };

    /// Fails unless `full_steps >= 0` and `alpha` is finite and in `[0, 1)`.
    pub fn new(full_steps: i32, alpha: f64) -> Result<Self, RangeError> {
        if full_steps < 0 {
            return Err(RangeError::NegativeStepCount { full_steps });
        }
        if !alpha.is_finite() || !(0.0..1.0).contains(&alpha) {
            return Err(RangeError::InvalidAlpha { alpha });
        }
        Ok(Self { full_steps, alpha })
    }

    /// For results the accumulator has already bounded.
    #[inline]
    pub(crate) fn from_valid(full_steps: i32, alpha: f64) -> Self {
        debug_assert!(full_steps >= 0 && (0.0..1.0).contains(&alpha));
        Self { full_steps, alpha }
    }

    /// Number of whole steps to simulate.
    #[inline]
    pub fn full_steps(&self) -> i32 {
        self.full_steps
    }

    /// Progress toward the next step, in `[0, 1)`.
    /// The closer it is to 1, the closer the next step is.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Alpha narrowed for single precision render code, still in `[0, 1)`.
    #[inline]
    pub fn alpha_f32(&self) -> f32 {
        // Values just below one would otherwise round up to 1.0.
        (self.alpha as f32).min(MAX_ALPHA_F32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_span_units() {
        assert_eq!(TickSpan::from_secs(1).ticks(), TICKS_PER_SECOND);
        assert_eq!(TickSpan::from_millis(500).ticks(), TICKS_PER_SECOND / 2);
        assert_eq!(TickSpan::from_millis(500).as_secs_f64(), 0.5);
        assert_eq!(
            TickSpan::from_secs(3) - TickSpan::from_millis(500),
            TickSpan::from_millis(2500)
        );
    }

    #[test]
    fn tick_span_from_std_duration() {
        let span = TickSpan::try_from(Duration::from_nanos(1_234)).unwrap();
        assert_eq!(span.ticks(), 12);

        let too_big = TickSpan::try_from(Duration::MAX);
        assert!(matches!(too_big, Err(RangeError::DurationOverflow { .. })));
    }

    #[test]
    fn elapsed_time_mirrors_input() {
        let half = TICKS_PER_SECOND / 2;

        let dt = ElapsedTime::new(TickSpan::from_ticks(half)).unwrap();
        assert_eq!(dt.ticks(), half);
        assert_eq!(dt.seconds(), 0.5);

        let dt = ElapsedTime::from_ticks(half).unwrap();
        assert_eq!(dt.ticks(), half);
        assert_eq!(dt.seconds(), 0.5);

        let dt = ElapsedTime::from_secs_f64(0.5).unwrap();
        assert_eq!(dt.ticks(), half);
        assert_eq!(dt.seconds(), 0.5);
    }

    #[test]
    fn elapsed_time_zero_is_valid() {
        assert_eq!(ElapsedTime::default(), ElapsedTime::ZERO);
        for dt in [
            ElapsedTime::new(TickSpan::ZERO).unwrap(),
            ElapsedTime::from_ticks(0).unwrap(),
            ElapsedTime::from_secs_f64(0.0).unwrap(),
        ] {
            assert_eq!(dt.ticks(), 0);
            assert_eq!(dt.seconds(), 0.0);
        }
    }

    #[test]
    fn elapsed_time_rejects_invalid_input() {
        assert!(ElapsedTime::new(TickSpan::from_secs(-1)).is_err());
        assert!(ElapsedTime::from_ticks(-TICKS_PER_SECOND).is_err());
        assert!(ElapsedTime::from_secs_f64(-1.0).is_err());
        assert!(ElapsedTime::from_secs_f64(f64::NAN).is_err());
        assert!(ElapsedTime::from_secs_f64(f64::INFINITY).is_err());
        assert!(ElapsedTime::from_secs_f64(f64::NEG_INFINITY).is_err());
        assert!(matches!(
            ElapsedTime::from_secs_f64(1e12),
            Err(RangeError::SecondsOverflow { .. })
        ));
    }

    #[test]
    fn seconds_round_to_nearest_tick() {
        assert_eq!(ElapsedTime::from_secs_f64(0.2).unwrap().ticks(), 2_000_000);
        assert_eq!(ElapsedTime::from_secs_f64(3.3).unwrap().ticks(), 33_000_000);
        assert_eq!(ElapsedTime::from_secs_f64(1.0 / 60.0).unwrap().ticks(), 166_667);
        assert_eq!(ElapsedTime::from_secs_f64(0.000_000_04).unwrap().ticks(), 0);
    }

    #[test]
    fn ticks_survive_a_trip_through_seconds() {
        for ticks in [0, 1, 7, 166_667, 33_000_000, 123_456_789_012] {
            let seconds = ElapsedTime::from_ticks(ticks).unwrap().seconds();
            assert_eq!(ElapsedTime::from_secs_f64(seconds).unwrap().ticks(), ticks);
        }
    }

    #[test]
    fn elapsed_steps_mirror_input() {
        let steps = ElapsedSteps::new(1, 0.1).unwrap();
        assert_eq!(steps.full_steps(), 1);
        assert_eq!(steps.alpha(), 0.1);

        assert_eq!(ElapsedSteps::default(), ElapsedSteps::ZERO);
        let zero = ElapsedSteps::new(0, 0.0).unwrap();
        assert_eq!(zero.full_steps(), 0);
        assert_eq!(zero.alpha(), 0.0);
    }

    #[test]
    fn elapsed_steps_rejects_invalid_input() {
        assert!(ElapsedSteps::new(-1, 0.0).is_err());
        assert!(ElapsedSteps::new(0, -1.0).is_err());
        assert!(ElapsedSteps::new(0, 1.0).is_err());
        assert!(ElapsedSteps::new(0, f64::NAN).is_err());
        assert!(ElapsedSteps::new(0, f64::INFINITY).is_err());
        assert!(ElapsedSteps::new(0, f64::NEG_INFINITY).is_err());
        assert!(ElapsedSteps::new(i32::MAX, 0.999).is_ok());
    }

    #[test]
    fn alpha_f32_stays_below_one() {
        let steps = ElapsedSteps::new(0, 0.999_999_999).unwrap();
        assert!(steps.alpha_f32() < 1.0);
        assert_eq!(steps.alpha_f32(), 0.999_999_94);

        assert_eq!(ElapsedSteps::new(2, 0.5).unwrap().alpha_f32(), 0.5);
        assert_eq!(ElapsedSteps::ZERO.alpha_f32(), 0.0);
    }

    #[test]
    fn tick_span_constructors_saturate() {
        assert_eq!(TickSpan::from_secs(i64::MAX), TickSpan::MAX);
        assert_eq!(TickSpan::from_millis(i64::MIN).ticks(), i64::MIN);
        assert_eq!(TickSpan::MAX.saturating_add(TickSpan::from_ticks(1)), TickSpan::MAX);
        assert_eq!(
            TickSpan::from_ticks(i64::MIN).saturating_sub(TickSpan::from_ticks(1)).ticks(),
            i64::MIN
        );
        assert_eq!(
            TickSpan::from_secs(2).saturating_sub(TickSpan::from_millis(500)),
            TickSpan::from_millis(1500)
        );
    }
}
