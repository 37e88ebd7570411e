//! # Strip Subcommand
//!
//! Runs the repair loop on one notebook and writes the result.
//!
//! ```bash
//! nbcheck strip analysis.ipynb                    # repaired notebook on stdout
//! nbcheck strip analysis.ipynb -o clean.ipynb
//! nbcheck strip analysis.ipynb --in-place --max-passes 8
//! ```
//!
//! When the notebook goes to stdout the report goes to stderr. Exit code 0
//! when the notebook validates afterwards, 1 when violations remain.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use nbcheck_core::notebook;
use nbcheck_schema::{repair, RepairReport, DEFAULT_MAX_PASSES};

/// Arguments for the strip subcommand.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Notebook file to repair.
    pub notebook: PathBuf,

    /// JSON Schema to validate against instead of the bundled one.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Backend to use (overrides NBCHECK_VALIDATOR).
    #[arg(long)]
    pub validator: Option<String>,

    /// Write the repaired notebook here instead of stdout.
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input notebook.
    #[arg(long)]
    pub in_place: bool,

    /// Give up after this many validate-and-strip passes.
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    pub max_passes: usize,
}

impl StripArgs {
    fn destination(&self) -> Option<&Path> {
        if self.in_place {
            Some(&self.notebook)
        } else {
            self.output.as_deref()
        }
    }
}

/// Execute the strip subcommand.
pub fn run_strip(args: &StripArgs, json: bool) -> Result<u8> {
    let validator = crate::build_validator(args.schema.as_deref(), args.validator.as_deref())?;
    let mut document = notebook::read_notebook(&args.notebook)
        .with_context(|| format!("failed to load notebook: {}", args.notebook.display()))?;

    let report = repair(validator.as_ref(), &mut document, args.max_passes);

    match args.destination() {
        Some(path) => {
            notebook::write_notebook(path, &document)
                .with_context(|| format!("failed to write notebook: {}", path.display()))?;
            print_report(&mut std::io::stdout().lock(), &args.notebook, &report, json)?;
        }
        None => {
            let text = notebook::to_notebook_string(&document)?;
            std::io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .context("failed to write notebook to stdout")?;
            print_report(&mut std::io::stderr().lock(), &args.notebook, &report, json)?;
        }
    }

    Ok(if report.is_valid() { 0 } else { 1 })
}

fn print_report(out: &mut dyn Write, path: &Path, report: &RepairReport, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "notebook": path.display().to_string(),
            "valid": report.is_valid(),
            "report": report,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    if report.stripped() {
        writeln!(
            out,
            "{}: removed {} metadata key(s) in {} pass(es)",
            path.display(),
            report.removed.len(),
            report.passes
        )?;
        for pointer in &report.removed {
            writeln!(out, "  - {pointer}")?;
        }
    } else {
        writeln!(out, "{}: no metadata removed", path.display())?;
    }
    for error in &report.remaining {
        writeln!(out, "  remaining: {error}")?;
    }
    Ok(())
}
