//! # Notebook Documents
//!
//! Notebooks are handled as untyped [`serde_json::Value`] trees: schemas
//! decide what is valid, and the repair step must be able to touch
//! documents that no Rust struct would deserialize. These helpers give the
//! few typed views the validators need.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::NbcheckError;

/// Top-level key holding notebook metadata.
pub const METADATA_KEY: &str = "metadata";

/// Top-level key holding the cell list.
pub const CELLS_KEY: &str = "cells";

/// Cell key naming the cell's kind (`code`, `markdown`, `raw`).
pub const CELL_TYPE_KEY: &str = "cell_type";

/// The cells of a notebook, or an empty slice if there are none.
pub fn cells(document: &Value) -> &[Value] {
    document
        .get(CELLS_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Declared `cell_type` of the cell at `index`.
pub fn cell_type(document: &Value, index: usize) -> Option<&str> {
    cells(document)
        .get(index)
        .and_then(|cell| cell.get(CELL_TYPE_KEY))
        .and_then(Value::as_str)
}

/// Mutable `metadata` mapping of a notebook or cell, if it is an object.
pub fn metadata_mut(value: &mut Value) -> Option<&mut Map<String, Value>> {
    value.get_mut(METADATA_KEY).and_then(Value::as_object_mut)
}

/// Mutable `metadata` mapping of the cell at `index`.
pub fn cell_metadata_mut(document: &mut Value, index: usize) -> Option<&mut Map<String, Value>> {
    document
        .get_mut(CELLS_KEY)
        .and_then(Value::as_array_mut)
        .and_then(|cells| cells.get_mut(index))
        .and_then(metadata_mut)
}

/// Read and parse a notebook file.
///
/// # Errors
///
/// Returns `NbcheckError::Io` if the file cannot be read,
/// `NbcheckError::Json` if it is not JSON, and `NbcheckError::Document` if
/// the top level is not an object.
pub fn read_notebook(path: &Path) -> Result<Value, NbcheckError> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(NbcheckError::Document(format!(
            "{}: top level is not a JSON object",
            path.display()
        )));
    }
    Ok(value)
}

/// Serialize a notebook the way notebook files are conventionally written:
/// one-space indentation and a trailing newline.
pub fn to_notebook_string(document: &Value) -> Result<String, NbcheckError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(document, &mut ser)?;
    let mut out = String::from_utf8(buf)
        .map_err(|e| NbcheckError::Document(format!("serialized notebook is not UTF-8: {e}")))?;
    out.push('\n');
    Ok(out)
}

/// Write a notebook to `path`.
pub fn write_notebook(path: &Path, document: &Value) -> Result<(), NbcheckError> {
    std::fs::write(path, to_notebook_string(document)?)?;
    Ok(())
}
