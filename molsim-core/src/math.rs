//! Small vector helpers layered over `glam::Vec2`.

use glam::Vec2;

/// Scale `v` down so its length does not exceed `cap`, preserving direction.
///
/// Vectors already within the cap are returned unchanged.
pub fn cap_length(v: Vec2, cap: f32) -> Vec2 {
    let len = v.length();
    if len.is_infinite() && v.is_finite() {
        // squared length overflowed; shrink first so the direction survives
        let scaled = v / v.abs().max_element();
        return scaled.normalize_or_zero() * cap;
    }
    if len > cap && len > 0.0 {
        v * (cap / len)
    } else {
        v
    }
}

/// Unit vector pointing from `from` to `to`, or `None` when the points coincide.
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Linear interpolation between two RGB triples, channel-wise.
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
