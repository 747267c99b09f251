//! Tunable simulation parameters.
//!
//! Every setter clamps into its documented range instead of rejecting the
//! value, so the simulation is always in a valid state. NaN is ignored.

use crate::integrator::IntegrationMode;
use std::ops::RangeInclusive;

/// Rest length of every spring bond, in world units.
pub const SPRING_REST_LENGTH: f32 = 2.0;
/// Hooke's-law constant shared by every spring bond.
pub const SPRING_CONSTANT: f32 = 100.0;
/// Molecule radius as a fraction of world width, before the size factor.
pub const RADIUS_RATIO: f32 = 0.03;
/// World units per Lennard-Jones distance unit.
pub const LENGTH_SCALE: f32 = 100.0;
/// Ticks per second at speed factor 1.
pub const BASE_TICK_RATE: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    gravity: f32,
    epsilon: f32,
    sigma: f32,
    delta: f32,
    speed_factor: f32,
    size_factor: f32,
    pub intermolecular_forces: bool,
    pub forces_visible: bool,
    pub integration_mode: IntegrationMode,
}

impl Params {
    pub const GRAVITY_RANGE: RangeInclusive<f32> = 0.0..=10.0;
    pub const EPSILON_RANGE: RangeInclusive<f32> = 0.0..=10.0;
    pub const SIGMA_RANGE: RangeInclusive<f32> = 0.1..=3.0;
    pub const DELTA_RANGE: RangeInclusive<f32> = (1.0 / 600.0)..=1.0;
    pub const SPEED_RANGE: RangeInclusive<f32> = 0.1..=3.0;
    pub const SIZE_RANGE: RangeInclusive<f32> = 0.2..=1.0;

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn size_factor(&self) -> f32 {
        self.size_factor
    }

    pub fn set_gravity(&mut self, value: f32) {
        clamp_into(&mut self.gravity, value, &Self::GRAVITY_RANGE);
    }

    pub fn set_epsilon(&mut self, value: f32) {
        clamp_into(&mut self.epsilon, value, &Self::EPSILON_RANGE);
    }

    pub fn set_sigma(&mut self, value: f32) {
        clamp_into(&mut self.sigma, value, &Self::SIGMA_RANGE);
    }

    pub fn set_delta(&mut self, value: f32) {
        clamp_into(&mut self.delta, value, &Self::DELTA_RANGE);
    }

    pub fn set_speed_factor(&mut self, value: f32) {
        clamp_into(&mut self.speed_factor, value, &Self::SPEED_RANGE);
    }

    pub fn set_size_factor(&mut self, value: f32) {
        clamp_into(&mut self.size_factor, value, &Self::SIZE_RANGE);
    }

    /// Seconds between ticks at the current speed factor.
    pub fn tick_interval(&self) -> f32 {
        (1.0 / BASE_TICK_RATE) / self.speed_factor
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            epsilon: 1.0,
            sigma: 1.0,
            delta: 1.0 / 60.0,
            speed_factor: 1.0,
            size_factor: 0.6,
            intermolecular_forces: true,
            forces_visible: true,
            integration_mode: IntegrationMode::Verlet,
        }
    }
}

fn clamp_into(slot: &mut f32, value: f32, range: &RangeInclusive<f32>) {
    if value.is_nan() {
        return;
    }
    *slot = value.clamp(*range.start(), *range.end());
}
