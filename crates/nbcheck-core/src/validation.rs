//! # Validation Errors
//!
//! The one error shape both backends report through. The fields a backend
//! fills in differ, and the stripping algorithms depend on exactly which:
//!
//! | Field | Generic backend | Compiled backend |
//! |-------|-----------------|------------------|
//! | `path` | instance location; relative to the parent for `context` errors | instance location |
//! | `schema_path` | keyword location; starts with the alternative index for `context` errors | instance location rooted one level above the document |
//! | `schema` | subschema whose keyword failed | `Null` |
//! | `context` | per-alternative errors of failed unions | empty |
//! | `instance_pointer` / `schema_pointer` | absolute raw pointers, also for `context` errors | the backend's raw pointers |

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::Backend;
use crate::path::{to_pointer, PathSegment};

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Human-readable description of the violation.
    pub message: String,
    /// Schema keyword that failed (`type`, `required`, `oneOf`, ...).
    pub keyword: String,
    /// Location of the offending value in the document.
    pub path: Vec<PathSegment>,
    /// Backend-specific path; see the module table.
    pub schema_path: Vec<PathSegment>,
    /// The subschema whose keyword failed.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub schema: Value,
    /// Errors from each alternative of a failed `oneOf`/`anyOf`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ValidationError>,
    /// Backend that produced this error.
    pub origin: Backend,
    /// Instance location exactly as the backend reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_pointer: Option<String>,
    /// Keyword location exactly as the backend reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_pointer: Option<String>,
}

impl ValidationError {
    /// Create an error with empty paths.
    pub fn new(origin: Backend, keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            keyword: keyword.into(),
            path: Vec::new(),
            schema_path: Vec::new(),
            schema: Value::Null,
            context: Vec::new(),
            origin,
            instance_pointer: None,
            schema_pointer: None,
        }
    }

    /// Set the instance location.
    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    /// Set the backend-specific schema path.
    pub fn with_schema_path(mut self, schema_path: Vec<PathSegment>) -> Self {
        self.schema_path = schema_path;
        self
    }

    /// Attach the failing subschema.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    /// Attach per-alternative sub-errors.
    pub fn with_context(mut self, context: Vec<ValidationError>) -> Self {
        self.context = context;
        self
    }

    /// JSON pointer of `path`, or `(root)` for the document itself.
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            to_pointer(&self.path)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.message)
    }
}

impl std::error::Error for ValidationError {}
