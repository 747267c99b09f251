use crate::integrator::{self, IntegrationMode};
use crate::math::{cap_length, lerp_rgb};
use glam::Vec2;

/// Hard ceiling on particle speed, enforced after every velocity update.
pub const SPEED_CAP: f32 = 500.0;
/// Hard ceiling on the accumulated force, enforced before integration.
pub const FORCE_CAP: f32 = 30_000.0;

/// Color of a particle at rest.
pub const COLOR_SLOW: [f32; 3] = [5.0 / 255.0, 0.0, 102.0 / 255.0];
/// Color of a particle moving at the speed cap.
pub const COLOR_FAST: [f32; 3] = [1.0, 81.0 / 255.0, 220.0 / 255.0];

/// Longest force arrow drawn, in world units.
const ARROW_MAX_LENGTH: f32 = 30.0;

/// Stable identity of a particle within one [`World`](crate::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Derived force-arrow visual state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceArrow {
    pub tip: Vec2,
    pub length: f32,
    pub color: [f32; 3],
}

impl ForceArrow {
    /// Arrow for a particle centered at `center` carrying `force`.
    ///
    /// Length and color follow the log10 of the force magnitude, saturating
    /// at 30 units and pure red.
    pub fn for_force(center: Vec2, force: Vec2) -> Self {
        let magnitude = force.length();
        let level = if magnitude > 0.0 {
            magnitude.log10() + 5.0
        } else {
            0.0
        };
        let t = (level / 5.0).clamp(0.0, 1.0);
        let length = ARROW_MAX_LENGTH * t;
        let tip = center + force.try_normalize().unwrap_or(Vec2::ZERO) * length;

        Self {
            tip,
            length,
            color: [t, 0.0, 1.0 - t],
        }
    }
}

/// A molecule: a 2-D point mass with a radius.
///
/// `pos` is the center. Color and force arrow are derived state and are
/// only ever recomputed, never set directly.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub force: Vec2,
    pub radius: f32,
    color: [f32; 3],
    arrow: Option<ForceArrow>,
}

impl Particle {
    pub fn new(id: ParticleId, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        let mut particle = Self {
            id,
            pos,
            vel: cap_length(vel, SPEED_CAP),
            force: Vec2::ZERO,
            radius,
            color: COLOR_SLOW,
            arrow: None,
        };
        particle.update_color();
        particle
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn arrow(&self) -> Option<ForceArrow> {
        self.arrow
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kinetic energy with unit mass.
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }

    pub fn reset_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    pub fn add_force(&mut self, f: Vec2) {
        self.force += f;
    }

    pub fn clamp_force(&mut self) {
        self.force = cap_length(self.force, FORCE_CAP);
    }

    pub fn clamp_speed(&mut self) {
        self.vel = cap_length(self.vel, SPEED_CAP);
    }

    /// Advance one step with the position-first scheme the UI calls "Verlet".
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_with(dt, IntegrationMode::Verlet);
    }

    pub fn integrate_with(&mut self, dt: f32, mode: IntegrationMode) {
        self.clamp_force();
        integrator::advance(self, dt, mode);
        self.clamp_speed();
        self.update_color();
    }

    /// Interpolated color between [`COLOR_SLOW`] and [`COLOR_FAST`] for the current speed.
    pub fn color_from_speed(&self) -> [f32; 3] {
        let t = self.speed().min(SPEED_CAP) / SPEED_CAP;
        lerp_rgb(COLOR_SLOW, COLOR_FAST, t)
    }

    pub fn update_color(&mut self) {
        self.color = self.color_from_speed();
    }

    /// Recompute the force arrow, or drop it when forces are hidden.
    pub fn update_arrow(&mut self, visible: bool) {
        self.arrow = visible.then(|| ForceArrow::for_force(self.pos, self.force));
    }

    /// Change the radius only; position and velocity are the World's concern.
    pub fn rescale(&mut self, new_radius: f32) {
        if new_radius > 0.0 {
            self.radius = new_radius;
        }
    }
}
