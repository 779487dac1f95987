//! Error types for the pipeline and dashboard services.
//!
//! Configuration and data errors are fatal for the batch pipeline; the
//! interactive surface converts them into JSON error bodies (see
//! [`crate::http::error`]).

use std::path::{Path, PathBuf};

/// Result type for EcoAQI operations.
pub type EcoResult<T> = Result<T, EcoError>;

/// Error type for EcoAQI operations.
#[derive(Debug, thiserror::Error)]
pub enum EcoError {
    /// The inputs or config do not have the shape the pipeline needs
    /// (no AQI-like column, missing weather column, bad config file).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The data is structurally valid but unusable (e.g. empty training matrix).
    #[error("Data error: {0}")]
    Data(String),

    /// Filesystem access failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Artifact (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The least-squares solver rejected the data.
    #[error("Training error: {0}")]
    Training(String),
}

impl EcoError {
    /// Wrap an `std::io::Error` with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        EcoError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error should abort the pipeline as a configuration problem.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EcoError::Configuration(_))
    }
}

impl From<serde_json::Error> for EcoError {
    fn from(err: serde_json::Error) -> Self {
        EcoError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for EcoError {
    fn from(err: bincode::Error) -> Self {
        EcoError::Serialization(err.to_string())
    }
}
