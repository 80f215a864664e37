use thiserror::Error;

/// Initialisation failures. The frame and touch paths never produce errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("required capability is not available: {0}")]
    MissingCapability(&'static str),

    #[error("invalid placement configuration: {0}")]
    InvalidConfig(String),
}
