//! # Compiled Backend
//!
//! Adapter over a precompiled [`jsonschema::Validator`] (Draft 4). The
//! schema is compiled once at construction and every `validate` call runs
//! the compiled form.
//!
//! ## First error only
//!
//! Without an override schema, `iter_errors` yields at most one error: the
//! first violation the compiled validator meets. Call sites that need every
//! violation should use the generic backend. With an override schema the
//! compiled validator does not apply, so evaluation falls back to the
//! generic backend and its error shape.
//!
//! ## Error translation
//!
//! The crate's error is translated into [`ValidationError`] with the raw
//! instance and keyword pointers preserved verbatim. `schema_path` carries
//! the instance location as a queue rooted one level above the document
//! (first segment [`DOCUMENT_ROOT`]), which is the shape the queue-walk
//! stripping consumes.
//!
//! ## Schema resolution
//!
//! Only references inside the schema resolve. Remote `$ref`s are refused
//! so compilation never touches the network.

use std::fmt;

use jsonschema::Validator;
use nbcheck_core::{parse_pointer, Backend, PathSegment, ValidationError};
use serde_json::Value;

use crate::draft4;
use crate::error::SchemaError;
use crate::generic::GenericValidator;
use crate::strip;
use crate::validator::{ErrorIter, NotebookValidator};

/// Root segment of a compiled error's path queue, standing for the
/// document itself.
pub const DOCUMENT_ROOT: &str = "data";

/// Precompiled validator bound to one schema.
pub struct CompiledValidator {
    compiled: Validator,
    fallback: GenericValidator,
}

impl fmt::Debug for CompiledValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledValidator")
            .field("schema", self.fallback.schema())
            .finish_non_exhaustive()
    }
}

impl CompiledValidator {
    /// Compile `schema` as Draft 4.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidSchema` if the schema does not compile.
    pub fn new(schema: Value) -> Result<Self, SchemaError> {
        let compiled = draft4::compile(&schema, Backend::Compiled)?;
        let fallback = GenericValidator::new(schema)?;
        Ok(Self { compiled, fallback })
    }
}

/// Translate the crate's error into the shared shape without losing either
/// pointer.
fn translate(error: &jsonschema::ValidationError<'_>) -> ValidationError {
    let instance_pointer = error.instance_path.to_string();
    let schema_pointer = error.schema_path.to_string();
    let path = parse_pointer(&instance_pointer);
    let keyword = parse_pointer(&schema_pointer)
        .last()
        .map(PathSegment::member_name)
        .unwrap_or_default();

    let mut queue = Vec::with_capacity(path.len() + 1);
    queue.push(PathSegment::from(DOCUMENT_ROOT));
    queue.extend(path.iter().cloned());

    let mut translated = ValidationError::new(Backend::Compiled, keyword, error.to_string())
        .with_path(path)
        .with_schema_path(queue);
    translated.instance_pointer = Some(instance_pointer);
    translated.schema_pointer = Some(schema_pointer);
    translated
}

impl NotebookValidator for CompiledValidator {
    fn backend(&self) -> Backend {
        Backend::Compiled
    }

    fn schema(&self) -> &Value {
        self.fallback.schema()
    }

    fn validate(&self, document: &Value) -> Result<(), ValidationError> {
        self.compiled.validate(document).map_err(|e| translate(&e))
    }

    fn iter_errors<'a>(&'a self, document: &'a Value, schema: Option<&'a Value>) -> ErrorIter<'a> {
        match schema {
            Some(schema) => {
                tracing::debug!("override schema given, evaluating with the generic backend");
                self.fallback.iter_errors(document, Some(schema))
            }
            None => ErrorIter::collected(self.validate(document).err().into_iter().collect()),
        }
    }

    /// Errors from the compiled validator are stripped along their path
    /// queue; errors from an override-schema fallback carry the generic
    /// shape and are stripped by error tree.
    fn strip_invalid_metadata(&self, document: &mut Value, errors: &[ValidationError]) -> bool {
        let (generic, compiled): (Vec<ValidationError>, Vec<ValidationError>) = errors
            .iter()
            .cloned()
            .partition(|e| e.origin == Backend::Generic);
        let from_tree = strip::strip_by_error_tree(document, &generic);
        let from_queue = strip::strip_by_path_queue(document, &compiled);
        from_tree || from_queue
    }
}
