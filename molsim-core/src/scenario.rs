//! Scenario files: a TOML description of the world, its parameters and the
//! initial molecules, loaded the way the front end would set things up by hand.
//!
//! ```toml
//! preset = "gas"            # optional, spawned before [[particles]]
//!
//! [world]
//! width = 500.0
//! height = 500.0
//!
//! [params]
//! gravity = 2.0
//! integration = "verlet"    # or "euler"
//!
//! [[particles]]
//! center = [100.0, 100.0]
//! velocity = [0.0, 5.0]
//!
//! [[bonds]]
//! a = 0
//! b = 1
//!
//! [run]
//! ticks = 600
//! ```

use crate::error::ScenarioError;
use crate::integrator::IntegrationMode;
use crate::params::Params;
use crate::particle::ParticleId;
use crate::presets::Preset;
use crate::world::{Bounds, World};
use glam::Vec2;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub params: ParamsConfig,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub bonds: Vec<BondConfig>,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 500.0,
            height: 500.0,
        }
    }
}

impl WorldConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// Parameter overrides; anything omitted keeps its default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsConfig {
    pub gravity: Option<f32>,
    pub epsilon: Option<f32>,
    pub sigma: Option<f32>,
    pub delta: Option<f32>,
    pub speed: Option<f32>,
    pub size: Option<f32>,
    pub intermolecular_forces: Option<bool>,
    pub forces_visible: Option<bool>,
    pub integration: Option<IntegrationMode>,
}

impl ParamsConfig {
    /// Defaults with every present override applied through the clamping setters.
    pub fn to_params(&self) -> Params {
        let mut params = Params::default();
        if let Some(v) = self.gravity {
            params.set_gravity(v);
        }
        if let Some(v) = self.epsilon {
            params.set_epsilon(v);
        }
        if let Some(v) = self.sigma {
            params.set_sigma(v);
        }
        if let Some(v) = self.delta {
            params.set_delta(v);
        }
        if let Some(v) = self.speed {
            params.set_speed_factor(v);
        }
        if let Some(v) = self.size {
            params.set_size_factor(v);
        }
        if let Some(v) = self.intermolecular_forces {
            params.intermolecular_forces = v;
        }
        if let Some(v) = self.forces_visible {
            params.forces_visible = v;
        }
        if let Some(v) = self.integration {
            params.integration_mode = v;
        }
        params
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParticleConfig {
    pub center: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
}

/// Bond between two entries of `[[particles]]`, by position in that list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BondConfig {
    pub a: usize,
    pub b: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub ticks: u64,
    pub report_every: u64,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            report_every: 60,
            seed: None,
        }
    }
}

impl Scenario {
    pub fn from_toml(source: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Check bounds and bond references without building anything.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let WorldConfig { width, height, .. } = self.world;
        let bounds = self.world.bounds();
        if !(bounds.pos.is_finite() && bounds.size.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(ScenarioError::InvalidBounds { width, height });
        }

        let count = self.particles.len();
        for (bond, cfg) in self.bonds.iter().enumerate() {
            for index in [cfg.a, cfg.b] {
                if index >= count {
                    return Err(ScenarioError::BondOutOfRange { bond, index, count });
                }
            }
            if cfg.a == cfg.b {
                return Err(ScenarioError::SelfBond { bond, index: cfg.a });
            }
        }
        Ok(())
    }

    /// Build the world: preset first, then explicit particles, then bonds.
    pub fn build_world<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<World, ScenarioError> {
        self.validate()?;

        let mut world = World::with_params(self.world.bounds(), self.params.to_params());
        if let Some(preset) = self.preset {
            preset.populate(&mut world, rng);
        }

        let ids: Vec<ParticleId> = self
            .particles
            .iter()
            .map(|p| world.spawn(p.center, p.velocity))
            .collect();
        for cfg in &self.bonds {
            world.bond(ids[cfg.a], ids[cfg.b]);
        }

        debug!(
            "built world with {} particles and {} bonds",
            world.particle_count(),
            world.bonds().len()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_document_uses_defaults() {
        let scenario = Scenario::from_toml("").unwrap();
        assert!(scenario.preset.is_none());
        assert_eq!(scenario.world.width, 500.0);
        assert_eq!(scenario.run.ticks, 600);
        assert_eq!(scenario.params.to_params(), Params::default());
    }

    #[test]
    fn overrides_are_clamped() {
        let scenario = Scenario::from_toml("[params]\ngravity = 99.0\nintegration = \"euler\"\n").unwrap();
        let params = scenario.params.to_params();
        assert_eq!(params.gravity(), 10.0);
        assert_eq!(params.integration_mode, IntegrationMode::SemiImplicitEuler);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Scenario::from_toml("[params]\ngravty = 1.0\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn bond_index_checked() {
        let src = "[[particles]]\ncenter = [1.0, 1.0]\n\n[[bonds]]\na = 0\nb = 3\n";
        let scenario = Scenario::from_toml(src).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = scenario.build_world(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::BondOutOfRange { bond: 0, index: 3, count: 1 }
        ));
    }

    #[test]
    fn negative_size_rejected() {
        let scenario = Scenario::from_toml("[world]\nwidth = -1.0\nheight = 5.0\n").unwrap();
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvalidBounds { .. })
        ));
    }
}
