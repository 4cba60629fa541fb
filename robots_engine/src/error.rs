use crate::config::ConfigErrors;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("ERROR: Storage for the {resource} could not be allocated ({requested} entries)")]
    Allocation {
        resource: &'static str,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error("ERROR: Robot {index} starts outside the board at ({x}, {y})")]
    RobotOutOfBounds { index: usize, x: usize, y: usize },
    #[error("ERROR: The snapshot interval must be at least 1 turn")]
    InvalidInterval,
    #[error("ERROR: Writing a snapshot or the replay file failed: {0}")]
    Io(#[from] std::io::Error),
}
