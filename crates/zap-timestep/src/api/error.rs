use std::time::Duration;

use thiserror::Error;

/// An argument was outside the range the timestep types accept.
///
/// These are caller bugs (bad configuration, or a broken clock feeding
/// negative time). Nothing in this crate retries or recovers from them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("elapsed time must not be negative (got {ticks} ticks)")]
    NegativeElapsed { ticks: i64 },

    #[error("elapsed seconds must be finite and non-negative (got {seconds})")]
    InvalidSeconds { seconds: f64 },

    #[error("{seconds} seconds does not fit in a 64-bit tick count")]
    SecondsOverflow { seconds: f64 },

    #[error("{duration:?} does not fit in a 64-bit tick count")]
    DurationOverflow { duration: Duration },

    #[error("step count must not be negative (got {full_steps})")]
    NegativeStepCount { full_steps: i32 },

    #[error("alpha must be finite and in [0, 1) (got {alpha})")]
    InvalidAlpha { alpha: f64 },

    #[error("step length must be in 1..={max} ticks (got {ticks})")]
    StepLength { ticks: i64, max: i64 },

    #[error("steps per second must be finite and positive (got {rate})")]
    StepRate { rate: f64 },
}

/// Failure to load a [`TimestepConfig`](crate::TimestepConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timestep config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Range(#[from] RangeError),
}
