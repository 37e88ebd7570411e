//! # Invalid Metadata Stripping
//!
//! Two ways of mapping errors back to metadata keys, one per error shape.
//!
//! **Error-tree walk** (generic backend). Errors are grouped by path.
//! Every key with errors beneath the top-level `metadata` node is removed.
//! Cells are harder: a cell schema dispatched through `oneOf` reports
//! "no alternative matched" at the cell rather than a per-key error. For
//! each such cell the walk reads the cell's `cell_type`, finds the
//! alternative that references `#/definitions/<cell_type>_cell`, and keeps
//! only that alternative's context errors whose relative path is exactly
//! `metadata/<key>`. Deeper or non-metadata errors (a bad `cell_type`,
//! a missing `source`) never remove anything.
//!
//! Only `oneOf` dispatch is inspected. Schemas that dispatch cell types
//! through `anyOf` or `allOf` are not repaired at cell level.
//!
//! **Queue walk** (compiled backend). The error's `schema_path` is the
//! instance location rooted one level above the document. Skip the root,
//! descend until the `metadata` segment, and remove the key named by the
//! segment after it.

use nbcheck_core::notebook::{self, METADATA_KEY};
use nbcheck_core::path::{resolve_mut, PathSegment};
use nbcheck_core::ValidationError;
use serde_json::Value;

use crate::tree::ErrorTree;

/// Strip using the generic backend's error tree.
pub(crate) fn strip_by_error_tree(document: &mut Value, errors: &[ValidationError]) -> bool {
    let tree = ErrorTree::new(errors);
    if tree.is_empty() {
        return false;
    }
    let mut stripped = false;
    let metadata_segment = PathSegment::from(METADATA_KEY);

    if let Some(metadata_errors) = tree.child(&metadata_segment) {
        let keys: Vec<String> = metadata_errors.children().map(PathSegment::member_name).collect();
        if let Some(metadata) = notebook::metadata_mut(document) {
            for key in keys {
                if metadata.shift_remove(&key).is_some() {
                    tracing::debug!(key = %key, "stripped invalid notebook metadata");
                    stripped = true;
                }
            }
        }
    }

    if let Some(cell_errors) = tree.child(&PathSegment::from(notebook::CELLS_KEY)) {
        let indices: Vec<usize> = cell_errors.children().filter_map(PathSegment::as_index).collect();
        for index in indices {
            let keys = cell_metadata_keys(document, cell_errors, index);
            if keys.is_empty() {
                continue;
            }
            if let Some(metadata) = notebook::cell_metadata_mut(document, index) {
                for key in keys {
                    if metadata.shift_remove(&key).is_some() {
                        tracing::debug!(cell = index, key = %key, "stripped invalid cell metadata");
                        stripped = true;
                    }
                }
            }
        }
    }

    stripped
}

/// Metadata keys of cell `index` that failed only under the alternative
/// matching the cell's declared type.
fn cell_metadata_keys(document: &Value, cell_errors: &ErrorTree, index: usize) -> Vec<String> {
    let Some(union) = cell_errors
        .child(&PathSegment::Index(index))
        .and_then(|cell| cell.error("oneOf"))
    else {
        return Vec::new();
    };
    let Some(cell_type) = notebook::cell_type(document, index) else {
        return Vec::new();
    };
    let definition = format!("#/definitions/{cell_type}_cell");

    let Some(alternative) = union
        .schema
        .get("oneOf")
        .and_then(Value::as_array)
        .and_then(|alternatives| {
            alternatives.iter().position(|alt| {
                alt.get("$ref").and_then(Value::as_str) == Some(definition.as_str())
            })
        })
    else {
        return Vec::new();
    };

    union
        .context
        .iter()
        .filter(|error| error.schema_path.first() == Some(&PathSegment::Index(alternative)))
        .filter(|error| error.path.len() == 2 && error.path[0].is_key(METADATA_KEY))
        .map(|error| error.path[1].member_name())
        .collect()
}

/// Strip using the compiled backend's rooted path queues.
pub(crate) fn strip_by_path_queue(document: &mut Value, errors: &[ValidationError]) -> bool {
    let mut stripped = false;
    for error in errors {
        let queue = error.schema_path.get(1..).unwrap_or_default();
        let Some(position) = queue.iter().position(|s| s.is_key(METADATA_KEY)) else {
            continue;
        };
        let Some(key) = queue.get(position + 1) else {
            continue;
        };
        let Some(metadata) = resolve_mut(document, &queue[..=position]).and_then(Value::as_object_mut)
        else {
            continue;
        };
        let key = key.member_name();
        if metadata.shift_remove(&key).is_some() {
            tracing::debug!(
                path = %nbcheck_core::to_pointer(&queue[..=position]),
                key = %key,
                "stripped invalid metadata"
            );
            stripped = true;
        }
    }
    stripped
}
