// extensions/mod.rs
//
// Math helpers that consume the accumulator's output.
// Decoupled from FixedTimestep: they only need an ElapsedTime or an alpha.

pub mod integrate;

pub use integrate::{integrate, integrate_dvec2, integrated, integrated_dvec2, lerp, lerp_dvec2};
