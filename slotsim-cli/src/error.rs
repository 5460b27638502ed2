use thiserror::Error;

use slotsim_config::ConfigError;
use slotsim_core::SimulationError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// The run was not reproducible against a recorded digest.
    #[error("timeline digest mismatch\nExpected: {expected}\nGot: {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("export failed: {0}")]
    Export(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
