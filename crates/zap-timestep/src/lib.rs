//! Fixed timestep accumulation.
//!
//! Decouples a simulation's fixed update rate from the variable rate at which
//! frames arrive. Feed [`FixedTimestep::advance`] the time since the previous
//! frame; it reports how many whole steps to simulate and the alpha to
//! interpolate rendered state with.

pub mod api;
pub mod core;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use crate::api::types::{ElapsedSteps, ElapsedTime, TickSpan, TICKS_PER_MILLISECOND, TICKS_PER_SECOND};
pub use crate::api::error::{ConfigError, RangeError};
pub use crate::api::config::TimestepConfig;
pub use crate::core::time::{FixedTimestep, MAX_STEP_TICKS};

pub use crate::extensions::{integrate, integrate_dvec2, integrated, integrated_dvec2, lerp, lerp_dvec2};
