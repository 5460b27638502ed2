use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid sweep plan: {0}")]
    InvalidSweep(String),
}
