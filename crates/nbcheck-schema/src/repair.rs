//! # Repair Loop
//!
//! Repeats validate-then-strip until the document validates or stops
//! changing. A single pass is enough for the generic backend on top-level
//! metadata, but the compiled backend reports one error per pass, so it
//! needs as many passes as there are invalid keys to reach the same
//! document.

use std::collections::BTreeSet;

use nbcheck_core::notebook::{self, METADATA_KEY};
use nbcheck_core::ValidationError;
use serde::Serialize;
use serde_json::Value;

use crate::validator::NotebookValidator;

/// Pass limit used when the caller has no opinion.
pub const DEFAULT_MAX_PASSES: usize = 64;

/// Outcome of [`repair`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepairReport {
    /// Strip passes performed.
    pub passes: usize,
    /// JSON pointers of every metadata key that was removed.
    pub removed: Vec<String>,
    /// Violations left after the last pass.
    pub remaining: Vec<ValidationError>,
}

impl RepairReport {
    /// True if the document validated after repair.
    pub fn is_valid(&self) -> bool {
        self.remaining.is_empty()
    }

    /// True if anything was removed.
    pub fn stripped(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Strip invalid metadata from `document` until it validates, a pass
/// removes nothing, or `max_passes` passes have run.
pub fn repair(
    validator: &dyn NotebookValidator,
    document: &mut Value,
    max_passes: usize,
) -> RepairReport {
    let before = metadata_keys(document);
    let mut report = RepairReport::default();

    loop {
        let errors: Vec<ValidationError> = validator.iter_errors(document, None).collect();
        if errors.is_empty() || report.passes >= max_passes {
            report.remaining = errors;
            break;
        }
        report.passes += 1;
        if !validator.strip_invalid_metadata(document, &errors) {
            report.remaining = errors;
            break;
        }
    }

    let after = metadata_keys(document);
    report.removed = before.difference(&after).cloned().collect();
    tracing::debug!(
        backend = %validator.backend(),
        passes = report.passes,
        removed = report.removed.len(),
        remaining = report.remaining.len(),
        "metadata repair finished"
    );
    report
}

/// Pointers of every notebook-level and cell-level metadata key.
fn metadata_keys(document: &Value) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    if let Some(metadata) = document.get(METADATA_KEY).and_then(Value::as_object) {
        for key in metadata.keys() {
            keys.insert(nbcheck_core::to_pointer(&[METADATA_KEY.into(), key.as_str().into()]));
        }
    }
    for (index, cell) in notebook::cells(document).iter().enumerate() {
        if let Some(metadata) = cell.get(METADATA_KEY).and_then(Value::as_object) {
            for key in metadata.keys() {
                keys.insert(nbcheck_core::to_pointer(&[
                    notebook::CELLS_KEY.into(),
                    index.into(),
                    METADATA_KEY.into(),
                    key.as_str().into(),
                ]));
            }
        }
    }
    keys
}
