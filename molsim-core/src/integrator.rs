use crate::particle::Particle;
use serde::{Deserialize, Serialize};

/// Single-particle update scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMode {
    /// Position first with a constant-force term, then velocity:
    /// `x += v*dt + 0.5*f*dt^2`, `v += f*dt`.
    ///
    /// Shown as "Verlet" in the UI, although the force is not re-evaluated
    /// at the new position, so this is not textbook velocity Verlet.
    #[default]
    Verlet,
    /// Semi-implicit Euler: `v += f*dt`, then `x += v*dt`.
    #[serde(rename = "euler")]
    SemiImplicitEuler,
}

impl IntegrationMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Verlet => Self::SemiImplicitEuler,
            Self::SemiImplicitEuler => Self::Verlet,
        }
    }
}

/// Advance position and velocity of one particle by `dt` using its current force.
///
/// Mass is taken as one. Force and speed clamping happen in the caller.
pub fn advance(particle: &mut Particle, dt: f32, mode: IntegrationMode) {
    match mode {
        IntegrationMode::Verlet => {
            particle.pos += particle.vel * dt + 0.5 * particle.force * dt * dt;
            particle.vel += particle.force * dt;
        }
        IntegrationMode::SemiImplicitEuler => {
            particle.vel += particle.force * dt;
            particle.pos += particle.vel * dt;
        }
    }
}
