//! # nbcheck-cli — Command-Line Interface for nbcheck
//!
//! Provides the `nbcheck` binary.
//!
//! ## Subcommands
//!
//! - `nbcheck validate` — Validate a notebook and print its violations.
//! - `nbcheck strip` — Remove invalid metadata keys until the notebook
//!   validates or nothing more can be removed.
//! - `nbcheck validators` — List the registered validation backends.
//!
//! ```bash
//! nbcheck validate analysis.ipynb --all
//! NBCHECK_VALIDATOR=generic nbcheck strip analysis.ipynb --in-place
//! nbcheck --json validate analysis.ipynb --validator compiled
//! ```
//!
//! Every command validates against the bundled nbformat v4 schema unless
//! `--schema` names another file, and uses the backend selected by
//! `NBCHECK_VALIDATOR` unless `--validator` overrides it.

pub mod strip;
pub mod validate;
pub mod validators;

use std::path::Path;

use anyhow::{Context, Result};
use nbcheck_schema::NotebookValidator;
use serde_json::Value;

/// The nbformat v4 schema shipped with nbcheck.
pub const BUNDLED_SCHEMA: &str = include_str!("../../../schemas/nbformat.v4.schema.json");

/// Load the schema at `path`, or the bundled schema when `path` is `None`.
pub fn load_schema(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read schema: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse schema: {}", path.display()))
        }
        None => serde_json::from_str(BUNDLED_SCHEMA).context("bundled schema is not valid JSON"),
    }
}

/// Build the validator for a command: `name` if given, otherwise the
/// backend selected by the environment.
pub fn build_validator(schema: Option<&Path>, name: Option<&str>) -> Result<Box<dyn NotebookValidator>> {
    let schema = load_schema(schema)?;
    let validator = match name {
        Some(name) => nbcheck_schema::validator_for_name(name, schema)?,
        None => nbcheck_schema::current_validator(schema)?,
    };
    tracing::info!(backend = %validator.backend(), "validator ready");
    Ok(validator)
}


#[cfg(test)]
mod tests {
    use super::*;
    use nbcheck_core::Backend;

    #[test]
    fn bundled_schema_parses() {
        let schema = load_schema(None).unwrap();
        assert!(schema["definitions"]["code_cell"].is_object());
    }

    #[test]
    fn load_schema_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::write(dir.path(), "schema.json", &serde_json::json!({"type": "object"}));
        assert_eq!(load_schema(Some(&path)).unwrap(), serde_json::json!({"type": "object"}));
    }

    #[test]
    fn load_schema_reports_missing_file() {
        let err = load_schema(Some(Path::new("/nonexistent/schema.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read schema"));
    }

    #[test]
    fn build_validator_by_name() {
        let validator = build_validator(None, Some("generic")).unwrap();
        assert_eq!(validator.backend(), Backend::Generic);
        assert!(validator.validate(&fixtures::notebook()).is_ok());
    }

    #[test]
    fn build_validator_rejects_unknown_name() {
        let err = build_validator(None, Some("turbo")).err().unwrap();
        assert!(err.to_string().contains("invalid validator 'turbo'"));
    }
}
