pub mod bonds;
pub mod collision;
pub mod control;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod math;
pub mod params;
pub mod particle;
pub mod presets;
pub mod scenario;
pub mod stats;
pub mod world;

pub use bonds::{Bond, BondRegistry};
pub use control::{RunState, Simulation, TickClock};
pub use error::ScenarioError;
pub use integrator::IntegrationMode;
pub use params::Params;
pub use particle::{ForceArrow, Particle, ParticleId, FORCE_CAP, SPEED_CAP};
pub use presets::{Preset, MAX_PRESET_MOLECULES};
pub use scenario::Scenario;
pub use stats::Stats;
pub use world::{Bounds, SelectOutcome, World};
