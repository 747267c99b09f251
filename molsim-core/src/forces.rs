//! Force laws: Lennard-Jones between every pair, uniform gravity, and
//! Hooke's-law springs for bonded pairs.
//!
//! Pair functions return the force acting on the first particle; the caller
//! applies the negation to the second.

use glam::Vec2;

/// Strength multiplier applied to the Lennard-Jones magnitude.
pub const LJ_STRENGTH: f32 = 1000.0;
/// Ceiling on a single Lennard-Jones contribution. Near-coincident pairs
/// would otherwise overflow to infinity; the per-particle force cap bounds
/// the total anyway.
pub const LJ_MAGNITUDE_LIMIT: f32 = 1.0e12;

/// Lennard-Jones force on a particle at `a` due to one at `b`.
///
/// Distances are divided by `scale` before the potential is evaluated.
/// Returns zero when the points coincide.
pub fn lennard_jones(a: Vec2, b: Vec2, epsilon: f32, sigma: f32, scale: f32) -> Vec2 {
    let offset = a - b;
    let distance = offset.length();
    if distance == 0.0 || scale == 0.0 || epsilon == 0.0 {
        return Vec2::ZERO;
    }
    let r = f64::from(distance) / f64::from(scale);

    let sr6 = (f64::from(sigma) / r).powi(6);
    let sr12 = sr6 * sr6;
    let magnitude = f64::from(LJ_STRENGTH) * f64::from(epsilon) * (2.0 * sr12 - sr6) / (r * r);
    let limit = f64::from(LJ_MAGNITUDE_LIMIT);
    // both powers overflowed: deep inside the repulsive core
    let magnitude = if magnitude.is_nan() {
        LJ_MAGNITUDE_LIMIT
    } else {
        magnitude.clamp(-limit, limit) as f32
    };

    offset / distance * magnitude
}

/// Constant downward pull applied to every particle once per step.
pub fn gravity(g: f32) -> Vec2 {
    Vec2::new(0.0, -g)
}

/// Spring force on the particle at `a` from its bond partner at `b`.
///
/// `None` when the two coincide, since there is no line to act along.
pub fn spring(a: Vec2, b: Vec2, rest_length: f32, k: f32) -> Option<Vec2> {
    let r_ab = b - a;
    let distance = r_ab.length();
    if distance == 0.0 {
        return None;
    }
    let magnitude = -k * (distance - rest_length);
    // magnitude acts on `b` along a->b; `a` takes the opposite
    Some(-(r_ab / distance) * magnitude)
}
