//! # Validate Subcommand
//!
//! Checks one notebook and prints its violations. Exit code 0 when the
//! notebook is valid, 1 when it is not.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use nbcheck_core::{notebook, ValidationError};
use nbcheck_schema::NotebookValidator;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Notebook file to validate.
    pub notebook: PathBuf,

    /// JSON Schema to validate against instead of the bundled one.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Backend to use (overrides NBCHECK_VALIDATOR).
    #[arg(long)]
    pub validator: Option<String>,

    /// Report every violation instead of stopping at the first. The
    /// compiled backend still reports at most one.
    #[arg(long)]
    pub all: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, json: bool) -> Result<u8> {
    let validator = crate::build_validator(args.schema.as_deref(), args.validator.as_deref())?;
    let document = notebook::read_notebook(&args.notebook)
        .with_context(|| format!("failed to load notebook: {}", args.notebook.display()))?;

    let errors = collect_errors(validator.as_ref(), &document, args.all);
    print_report(&args.notebook, validator.as_ref(), &errors, json)?;
    Ok(if errors.is_empty() { 0 } else { 1 })
}

fn collect_errors(
    validator: &dyn NotebookValidator,
    document: &serde_json::Value,
    all: bool,
) -> Vec<ValidationError> {
    if all {
        validator.iter_errors(document, None).collect()
    } else {
        validator.validate(document).err().into_iter().collect()
    }
}

fn print_report(
    path: &Path,
    validator: &dyn NotebookValidator,
    errors: &[ValidationError],
    json: bool,
) -> Result<()> {
    if json {
        let report = serde_json::json!({
            "notebook": path.display().to_string(),
            "backend": validator.backend(),
            "valid": errors.is_empty(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if errors.is_empty() {
        println!("{}: valid ({})", path.display(), validator.backend());
        return Ok(());
    }
    println!(
        "{}: {} violation(s) ({})",
        path.display(),
        errors.len(),
        validator.backend()
    );
    for error in errors {
        println!("  {error}");
        for alternative in &error.context {
            tracing::debug!(
                keyword = %alternative.keyword,
                at = %alternative.location(),
                "{}",
                alternative.message
            );
        }
    }
    Ok(())
}
