// extensions/integrate.rs
//
// Semi-implicit Euler integration and render-time interpolation.
// Pure math on top of ElapsedTime; no accumulator state.

use glam::DVec2;

use crate::api::types::ElapsedTime;

// ── Semi-implicit Euler ──────────────────────────────────────────────────
// Velocity is updated first, then position moves with the *new* velocity.
// Swapping the order gives explicit Euler and a different result.

/// Advance `position` and `velocity` in place under constant `acceleration`.
#[inline]
pub fn integrate(position: &mut f64, velocity: &mut f64, acceleration: f64, dt: ElapsedTime) {
    *velocity += acceleration * dt.seconds();
    *position += *velocity * dt.seconds();
}

/// By-value form of [`integrate`]. Returns `(position, velocity)`.
#[inline]
pub fn integrated(position: f64, velocity: f64, acceleration: f64, dt: ElapsedTime) -> (f64, f64) {
    let velocity = velocity + acceleration * dt.seconds();
    let position = position + velocity * dt.seconds();
    (position, velocity)
}

/// [`integrate`] for 2D vectors.
#[inline]
pub fn integrate_dvec2(position: &mut DVec2, velocity: &mut DVec2, acceleration: DVec2, dt: ElapsedTime) {
    *velocity += acceleration * dt.seconds();
    *position += *velocity * dt.seconds();
}

/// [`integrated`] for 2D vectors.
#[inline]
pub fn integrated_dvec2(
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    dt: ElapsedTime,
) -> (DVec2, DVec2) {
    let velocity = velocity + acceleration * dt.seconds();
    let position = position + velocity * dt.seconds();
    (position, velocity)
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Blend the previous and current simulated values by `alpha` in `[0, 1]`.
/// Meant for rendering only; never feed the result back into the simulation.
#[inline]
pub fn lerp(old: f64, new: f64, alpha: f64) -> f64 {
    old * (1.0 - alpha) + new * alpha
}

/// Linearly interpolate between two DVec2 values.
#[inline]
pub fn lerp_dvec2(old: DVec2, new: DVec2, alpha: f64) -> DVec2 {
    old * (1.0 - alpha) + new * alpha
}
