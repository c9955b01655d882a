//! Error types for templates and definition creation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while rendering or creating definitions.
///
/// None of these leave a partially written definition behind.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template {template}: {message}")]
    TemplateParse { template: String, message: String },

    #[error("Variable not provided: {0}")]
    MissingVariable(String),

    #[error("Template rendering failed: {0}")]
    RenderingFailed(String),

    #[error("A {kind} named '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Invalid {kind} name '{name}': only letters, digits, '-' and '_' are allowed")]
    InvalidName { kind: &'static str, name: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spec error: {0}")]
    Spec(#[from] range_spec::SpecError),
}
