use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or apply a scenario file.
///
/// The physics itself never fails; only reading configuration can.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("world bounds must be finite with non-negative size, got {width} x {height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("bond {bond} references particle {index}, but only {count} particles are declared")]
    BondOutOfRange {
        bond: usize,
        index: usize,
        count: usize,
    },
    #[error("bond {bond} joins particle {index} to itself")]
    SelfBond { bond: usize, index: usize },
}
