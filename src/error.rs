//! Error types for the exercise tracking library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Required body landmarks absent or below the confidence threshold
    #[error("Missing keypoint: {0}")]
    MissingKeypoints(String),

    /// Degenerate geometry (zero-length vector) in an angle computation
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Exercise plan or tracking configuration rejected at session start
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Exercise type name not in the supported set
    #[error("Unknown exercise type: {0}")]
    UnknownExerciseType(String),

    /// Filter specification could not be parsed
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration parsing or validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
