//! # Backend Selection
//!
//! Maps backend names to adapters and resolves which backend to use by
//! default.
//!
//! ## Configuration
//!
//! ```text
//! NBCHECK_VALIDATOR=compiled   # first violation only
//! NBCHECK_VALIDATOR=generic    # every violation, with union context
//! ```
//!
//! When the variable is unset or empty, the compiled backend is used if this
//! build includes it, otherwise the generic one. Any other value is a
//! configuration error naming every registered backend.
//!
//! ## Availability
//!
//! The compiled backend exists only with the `compiled` cargo feature
//! (default-on). Without it, `"compiled"` is not a registered name at all:
//! selecting it fails exactly like selecting an unknown name.

use nbcheck_core::Backend;
use serde_json::Value;

use crate::error::{ConfigError, SchemaError};
use crate::generic::GenericValidator;
use crate::validator::NotebookValidator;

/// Environment variable that selects the backend by name.
pub const VALIDATOR_ENV_VAR: &str = "NBCHECK_VALIDATOR";

/// Whether this build includes the compiled backend.
pub const fn compiled_available() -> bool {
    cfg!(feature = "compiled")
}

/// Whether `backend` can be constructed in this build.
pub const fn is_available(backend: Backend) -> bool {
    match backend {
        Backend::Compiled => compiled_available(),
        Backend::Generic => true,
    }
}

/// Backends registered in this build, in order of preference.
pub fn registered_backends() -> Vec<Backend> {
    Backend::ALL
        .into_iter()
        .filter(|b| is_available(*b))
        .collect()
}

/// Names of the registered backends.
pub fn registered_names() -> Vec<&'static str> {
    registered_backends().into_iter().map(Backend::as_str).collect()
}

/// Backend used when nothing is configured.
pub const fn default_backend() -> Backend {
    if compiled_available() {
        Backend::Compiled
    } else {
        Backend::Generic
    }
}

/// Look up a registered backend by name.
///
/// # Errors
///
/// Returns `ConfigError::UnknownValidator` listing every registered name if
/// `name` is not one of them.
pub fn backend_for_name(name: &str) -> Result<Backend, ConfigError> {
    Backend::from_name(name)
        .filter(|b| is_available(*b))
        .ok_or_else(|| ConfigError::UnknownValidator {
            name: name.to_string(),
            valid: registered_names(),
        })
}

/// Resolve a configured value: `None` or empty selects the default.
pub fn resolve_backend(configured: Option<&str>) -> Result<Backend, ConfigError> {
    match configured.map(str::trim) {
        None | Some("") => Ok(default_backend()),
        Some(name) => backend_for_name(name),
    }
}

/// Backend selected by [`VALIDATOR_ENV_VAR`].
pub fn current_backend() -> Result<Backend, ConfigError> {
    let configured = std::env::var(VALIDATOR_ENV_VAR).ok();
    let backend = resolve_backend(configured.as_deref())?;
    tracing::debug!(
        backend = %backend,
        configured = configured.is_some(),
        "resolved schema validator backend"
    );
    Ok(backend)
}

/// Construct the adapter for `backend` bound to `schema`.
///
/// # Errors
///
/// Returns `SchemaError::Config` if the backend is not in this build, or
/// `SchemaError::InvalidSchema` if the backend rejects the schema.
pub fn validator_for(backend: Backend, schema: Value) -> Result<Box<dyn NotebookValidator>, SchemaError> {
    match backend {
        Backend::Generic => Ok(Box::new(GenericValidator::new(schema)?)),
        #[cfg(feature = "compiled")]
        Backend::Compiled => Ok(Box::new(crate::compiled::CompiledValidator::new(schema)?)),
        #[cfg(not(feature = "compiled"))]
        Backend::Compiled => Err(ConfigError::UnknownValidator {
            name: backend.as_str().to_string(),
            valid: registered_names(),
        }
        .into()),
    }
}

/// Construct the adapter registered under `name`.
pub fn validator_for_name(name: &str, schema: Value) -> Result<Box<dyn NotebookValidator>, SchemaError> {
    validator_for(backend_for_name(name)?, schema)
}

/// Construct the adapter selected by [`VALIDATOR_ENV_VAR`].
pub fn current_validator(schema: Value) -> Result<Box<dyn NotebookValidator>, SchemaError> {
    validator_for(current_backend()?, schema)
}
