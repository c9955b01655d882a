//! Error types for environment resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while loading or resolving an environment.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Not a valid environment: missing {0}")]
    NotFound(PathBuf),

    #[error("Invalid definition in file {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("Invalid environment name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpecError {
    /// Wrap a decode failure together with the file it came from.
    pub fn invalid_format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        SpecError::InvalidFormat {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
