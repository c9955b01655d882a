//! Error types for the IaC module.

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur while deriving infrastructure facts.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("No {flavor} jump host image '{image}' for region '{region}' and no override configured")]
    AmiLookup {
        flavor: String,
        image: String,
        region: String,
    },

    #[error("Invalid image table: {0}")]
    InvalidImageTable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
