//! Errors raised while building validators or selecting a backend.
//!
//! Schema violations are not errors here: they are
//! [`nbcheck_core::ValidationError`] values returned by `validate` and
//! produced by `iter_errors`.

use nbcheck_core::{Backend, NbcheckError};
use thiserror::Error;

/// Backend selection failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested name is not a registered backend.
    #[error("invalid validator '{name}'; valid values are: {}", .valid.join(", "))]
    UnknownValidator {
        /// Name that was requested.
        name: String,
        /// Every registered backend name.
        valid: Vec<&'static str>,
    },
}

/// A validator could not be constructed.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Backend selection failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend refused the schema.
    #[error("{backend} backend rejected the schema: {reason}")]
    InvalidSchema {
        /// Backend that rejected it.
        backend: Backend,
        /// Backend-provided reason.
        reason: String,
    },
}

impl From<SchemaError> for NbcheckError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Config(e) => NbcheckError::Config(e.to_string()),
            e @ SchemaError::InvalidSchema { .. } => NbcheckError::InvalidSchema(e.to_string()),
        }
    }
}
