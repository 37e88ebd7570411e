//! # Error Types
//!
//! Top-level error for nbcheck. Library crates define narrower `thiserror`
//! enums for their own failures and convert into [`NbcheckError`] at the
//! boundary.

use thiserror::Error;

use crate::validation::ValidationError;

/// Top-level error type for nbcheck.
#[derive(Error, Debug)]
pub enum NbcheckError {
    /// The document does not conform to the schema.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Backend selection or other configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The schema itself could not be compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The document is not shaped like a notebook.
    #[error("document error: {0}")]
    Document(String),

    /// JSON could not be parsed or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
