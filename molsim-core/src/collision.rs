//! Overlap test and elastic collision response between two particles.
//!
//! Radius stands in for mass: a particle twice as wide counts as twice as heavy.

use crate::math::direction;
use crate::particle::Particle;
use glam::Vec2;

/// True when the two circles touch or overlap.
pub fn overlaps(a: &Particle, b: &Particle) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Apply an elastic impulse to `a` and `b` along the line joining their centers.
///
/// Tangential components pass through unchanged. Returns `false` without
/// touching either particle when the centers coincide.
pub fn resolve(a: &mut Particle, b: &mut Particle) -> bool {
    let Some(normal) = direction(b.pos, a.pos) else {
        return false;
    };
    let tangent = Vec2::new(-normal.y, normal.x);

    let v1n = normal.dot(a.vel);
    let v1t = tangent.dot(a.vel);
    let v2n = normal.dot(b.vel);
    let v2t = tangent.dot(b.vel);

    let m1 = a.radius;
    let m2 = b.radius;
    let total = m1 + m2;
    if total <= 0.0 {
        return false;
    }

    let v1n_new = (v1n * (m1 - m2) + 2.0 * m2 * v2n) / total;
    let v2n_new = (v2n * (m2 - m1) + 2.0 * m1 * v1n) / total;

    a.vel = normal * v1n_new + tangent * v1t;
    b.vel = normal * v2n_new + tangent * v2t;

    a.clamp_speed();
    b.clamp_speed();
    true
}
