//! Real-time bridge for `zap-timestep`.
//!
//! Measures frame time with a monotonic clock and feeds it to a
//! [`FixedTimestep`](zap_timestep::FixedTimestep). Swap in [`ManualClock`]
//! for deterministic tests and replays.

pub mod clock;
pub mod stopwatch;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use stopwatch::{StopwatchFrame, StopwatchTimestep};
