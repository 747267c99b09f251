use crate::world::{World, SPAWN_SPEED};
use glam::Vec2;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Upper bound on the molecules a single preset spawns.
pub const MAX_PRESET_MOLECULES: usize = 2000;

/// Starting arrangements offered by the preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Solid,
    Liquid,
    Gas,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Solid, Preset::Liquid, Preset::Gas];

    /// Lattice spacing in radii, or `None` for random placement.
    fn spacing(self) -> Option<f32> {
        match self {
            Preset::Solid => Some(2.2),
            Preset::Liquid => Some(3.0),
            Preset::Gas => None,
        }
    }

    /// Clear `world` and fill it with this arrangement.
    ///
    /// Returns the number of molecules spawned.
    pub fn populate<R: Rng + ?Sized>(self, world: &mut World, rng: &mut R) -> usize {
        world.clear_all();
        let bounds = world.bounds();
        let radius = world.molecule_radius();

        let spawned = match self.spacing() {
            Some(spacing) => {
                let step = radius * spacing;
                // lattice occupies the lower half of the box
                let lo = bounds.min() + Vec2::splat(radius * 1.5);
                let hi = bounds.max() - Vec2::splat(radius * 1.5);
                let top = lo.y + (hi.y - lo.y) * 0.5;
                let cols = lattice_slots(hi.x - lo.x, step).min(MAX_PRESET_MOLECULES);
                let rows = match cols {
                    0 => 0,
                    _ => lattice_slots(top - lo.y, step).min(MAX_PRESET_MOLECULES / cols),
                };
                for row in 0..rows {
                    for col in 0..cols {
                        let velocity = match self {
                            Preset::Liquid => {
                                let speed = rng.gen_range(0.0..=60.0);
                                random_velocity(rng, speed)
                            }
                            _ => Vec2::ZERO,
                        };
                        let pos = lo + Vec2::new(col as f32, row as f32) * step;
                        world.spawn(pos, velocity);
                    }
                }
                rows * cols
            }
            None => {
                let cells = (bounds.size / (radius * 6.0)).floor();
                let target = ((cells.x * cells.y) as usize / 2).clamp(1, MAX_PRESET_MOLECULES);
                let lo = bounds.min() + Vec2::splat(radius);
                let hi = bounds.max() - Vec2::splat(radius);
                if lo.cmpgt(hi).any() {
                    0
                } else {
                    for _ in 0..target {
                        let pos = Vec2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y));
                        world.spawn(pos, random_velocity(rng, SPAWN_SPEED));
                    }
                    target
                }
            }
        };

        debug!("preset {} spawned {} molecules", self, spawned);
        spawned
    }
}

/// Lattice points along `span` at `step` apart, starting at zero.
fn lattice_slots(span: f32, step: f32) -> usize {
    if !(span >= 0.0 && step > 0.0) {
        return 0;
    }
    // saturating cast for huge spans
    (span / step).floor() as usize + 1
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    Vec2::from_angle(rng.gen_range(-PI..PI)) * speed
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Solid => "solid",
            Preset::Liquid => "liquid",
            Preset::Gas => "gas",
        };
        f.write_str(name)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(Preset::Solid),
            "liquid" => Ok(Preset::Liquid),
            "gas" => Ok(Preset::Gas),
            other => Err(format!("Unknown preset: {}", other)),
        }
    }
}
