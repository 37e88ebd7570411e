//! # Generic Backend
//!
//! Adapter over a Draft 4 [`jsonschema::Validator`] that enumerates every
//! violation. Union failures (`oneOf`, `anyOf`) carry the errors of each
//! alternative as `context`, which is what lets this backend repair cell
//! metadata inside `oneOf`-dispatched cells.
//!
//! ## Error translation
//!
//! Top-level errors keep their absolute instance and keyword locations.
//! Context errors are made relative to the union that reported them: `path`
//! drops the union's instance location, and `schema_path` starts at the
//! alternative index. `schema` is the subschema holding the failed keyword,
//! found by walking the keyword location through local `$ref`s.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use nbcheck_core::{parse_pointer, Backend, PathSegment, ValidationError};
use serde_json::Value;

use crate::draft4;
use crate::error::SchemaError;
use crate::strip;
use crate::validator::{ErrorIter, NotebookValidator};

/// Full-report validator bound to one schema.
pub struct GenericValidator {
    schema: Value,
    compiled: Validator,
}

impl fmt::Debug for GenericValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl GenericValidator {
    /// Bind `schema`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidSchema` if the schema is not a JSON
    /// object or does not compile, including patterns the regex engine
    /// rejects.
    pub fn new(schema: Value) -> Result<Self, SchemaError> {
        let compiled = draft4::compile(&schema, Backend::Generic)?;
        Ok(Self { schema, compiled })
    }

    /// Every violation of `document` against a schema other than the bound
    /// one. The schema is compiled for this call only.
    fn errors_against(document: &Value, schema: &Value) -> ErrorIter<'static> {
        match draft4::compile(schema, Backend::Generic) {
            Ok(validator) => {
                let errors: Vec<ValidationError> = validator
                    .iter_errors(document)
                    .map(|e| translate(&e, schema, None))
                    .collect();
                ErrorIter::collected(errors)
            }
            Err(err) => {
                tracing::warn!(error = %err, "override schema does not compile");
                ErrorIter::collected(vec![ValidationError::new(
                    Backend::Generic,
                    "schema",
                    err.to_string(),
                )])
            }
        }
    }
}

/// Where a context error sits relative to the union that reported it.
struct Union<'p> {
    path: &'p [PathSegment],
    schema_path: &'p [PathSegment],
    alternative: usize,
}

/// Translate the crate's error into the shared shape, resolving failed
/// subschemas against `root`.
fn translate(
    error: &jsonschema::ValidationError<'_>,
    root: &Value,
    union: Option<Union<'_>>,
) -> ValidationError {
    let instance_pointer = error.instance_path.to_string();
    let schema_pointer = error.schema_path.to_string();
    let path = parse_pointer(&instance_pointer);
    let schema_path = parse_pointer(&schema_pointer);

    let keyword = schema_path
        .last()
        .map(PathSegment::member_name)
        .unwrap_or_default();
    let schema = schema_path
        .split_last()
        .and_then(|(_, parent)| draft4::subschema_at(root, parent))
        .cloned()
        .unwrap_or(Value::Null);

    let (union_path, union_schema_path) = (path.as_slice(), schema_path.as_slice());
    let context = match &error.kind {
        ValidationErrorKind::AnyOf { context }
        | ValidationErrorKind::OneOfNotValid { context }
        | ValidationErrorKind::OneOfMultipleValid { context } => context
            .iter()
            .enumerate()
            .flat_map(move |(alternative, errors)| {
                errors.iter().map(move |e| {
                    let union = Union {
                        path: union_path,
                        schema_path: union_schema_path,
                        alternative,
                    };
                    translate(e, root, Some(union))
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    let (path, schema_path) = match union {
        Some(union) => (
            relative_path(path, union.path),
            relative_keyword_path(schema_path, &union),
        ),
        None => (path, schema_path),
    };

    let mut translated = ValidationError::new(Backend::Generic, keyword, error.to_string())
        .with_path(path)
        .with_schema_path(schema_path)
        .with_schema(schema)
        .with_context(context);
    translated.instance_pointer = Some(instance_pointer);
    translated.schema_pointer = Some(schema_pointer);
    translated
}

fn relative_path(path: Vec<PathSegment>, base: &[PathSegment]) -> Vec<PathSegment> {
    if let Some(rest) = path.strip_prefix(base) {
        return rest.to_vec();
    }
    path
}

/// Keyword location below the union, always starting with the alternative
/// index.
fn relative_keyword_path(schema_path: Vec<PathSegment>, union: &Union<'_>) -> Vec<PathSegment> {
    let alternative = PathSegment::Index(union.alternative);
    if let Some(rest) = schema_path.strip_prefix(union.schema_path) {
        if rest.first() == Some(&alternative) {
            return rest.to_vec();
        }
    }
    std::iter::once(alternative).chain(schema_path).collect()
}

impl NotebookValidator for GenericValidator {
    fn backend(&self) -> Backend {
        Backend::Generic
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    fn validate(&self, document: &Value) -> Result<(), ValidationError> {
        match self.iter_errors(document, None).next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn iter_errors<'a>(&'a self, document: &'a Value, schema: Option<&'a Value>) -> ErrorIter<'a> {
        match schema {
            Some(schema) if *schema != self.schema => Self::errors_against(document, schema),
            _ => ErrorIter::lazy(
                self.compiled
                    .iter_errors(document)
                    .map(move |e| translate(&e, &self.schema, None)),
            ),
        }
    }

    fn strip_invalid_metadata(&self, document: &mut Value, errors: &[ValidationError]) -> bool {
        strip::strip_by_error_tree(document, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["metadata", "cells"],
            "properties": {
                "metadata": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "authors": {"type": "array"}
                    }
                },
                "cells": {"type": "array"}
            }
        })
    }

    fn cell_schema() -> Value {
        json!({
            "properties": {
                "cells": {"type": "array", "items": {"$ref": "#/definitions/cell"}}
            },
            "definitions": {
                "cell": {
                    "type": "object",
                    "oneOf": [
                        {"$ref": "#/definitions/raw_cell"},
                        {"$ref": "#/definitions/code_cell"}
                    ]
                },
                "raw_cell": {
                    "required": ["cell_type"],
                    "properties": {"cell_type": {"enum": ["raw"]}}
                },
                "code_cell": {
                    "required": ["cell_type"],
                    "properties": {
                        "cell_type": {"enum": ["code"]},
                        "metadata": {
                            "type": "object",
                            "properties": {"collapsed": {"type": "boolean"}}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn rejects_non_object_schema() {
        let err = GenericValidator::new(json!(true)).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { backend: Backend::Generic, .. }));
    }

    #[test]
    fn rejects_uncompilable_pattern() {
        let err = GenericValidator::new(json!({"pattern": "[a-"})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { backend: Backend::Generic, .. }));
    }

    #[test]
    fn validate_returns_first_violation() {
        let validator = GenericValidator::new(schema()).unwrap();
        let err = validator.validate(&json!({"metadata": {"title": "t"}})).unwrap_err();
        assert_eq!(err.keyword, "required");
        assert_eq!(err.message, "\"cells\" is a required property");
        assert!(validator
            .validate(&json!({"metadata": {}, "cells": []}))
            .is_ok());
    }

    #[test]
    fn iter_errors_enumerates_all() {
        let validator = GenericValidator::new(schema()).unwrap();
        let doc = json!({"metadata": {"title": 1, "authors": "me"}});
        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert_eq!(errors.len(), 3);
        let title = errors.iter().find(|e| e.keyword == "type" && e.path.len() == 2).unwrap();
        assert_eq!(title.origin, Backend::Generic);
        assert_eq!(title.instance_pointer.as_deref(), Some(title.location().as_str()));
        assert!(title.schema.get("type").is_some());
    }

    #[test]
    fn iter_errors_with_override_schema() {
        let validator = GenericValidator::new(schema()).unwrap();
        let doc = json!({"metadata": {}, "cells": []});
        let strict = json!({"required": ["nbformat"]});
        assert_eq!(validator.iter_errors(&doc, None).count(), 0);
        let errors: Vec<_> = validator.iter_errors(&doc, Some(&strict)).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "\"nbformat\" is a required property");
    }

    #[test]
    fn uncompilable_override_schema_is_reported_as_a_violation() {
        let validator = GenericValidator::new(schema()).unwrap();
        let doc = json!({"metadata": {}, "cells": []});
        let errors: Vec<_> = validator.iter_errors(&doc, Some(&json!({"type": 12}))).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].keyword, "schema");
        assert!(errors[0].path.is_empty());
    }

    #[test]
    fn iter_errors_restarts_each_call() {
        let validator = GenericValidator::new(schema()).unwrap();
        let doc = json!({});
        let first = validator.iter_errors(&doc, None).count();
        let second = validator.iter_errors(&doc, None).count();
        assert_eq!(first, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn union_context_is_relative_to_the_cell() {
        let validator = GenericValidator::new(cell_schema()).unwrap();
        let doc = json!({"cells": [{"cell_type": "code", "metadata": {"collapsed": "no"}}]});
        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert_eq!(errors.len(), 1);

        let union = &errors[0];
        assert_eq!(union.keyword, "oneOf");
        assert_eq!(union.path, vec![PathSegment::from("cells"), PathSegment::Index(0)]);
        assert_eq!(union.schema, cell_schema()["definitions"]["cell"]);

        let collapsed = union
            .context
            .iter()
            .find(|e| e.schema_path.first() == Some(&PathSegment::Index(1)))
            .unwrap();
        assert_eq!(collapsed.keyword, "type");
        assert_eq!(collapsed.path, vec![PathSegment::from("metadata"), PathSegment::from("collapsed")]);
        assert_eq!(collapsed.instance_pointer.as_deref(), Some("/cells/0/metadata/collapsed"));

        let raw = union
            .context
            .iter()
            .find(|e| e.schema_path.first() == Some(&PathSegment::Index(0)))
            .unwrap();
        assert_eq!(raw.keyword, "enum");
        assert_eq!(raw.path, vec![PathSegment::from("cell_type")]);
    }

    #[test]
    fn look_ahead_pattern_accepts_matching_metadata() {
        let schema = json!({
            "properties": {
                "metadata": {"properties": {"name": {"type": "string", "pattern": "^(?!_)\\w+$"}}}
            }
        });
        let validator = GenericValidator::new(schema).unwrap();

        let mut doc = json!({"metadata": {"name": "abc"}, "cells": []});
        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert!(errors.is_empty());
        assert!(!validator.strip_invalid_metadata(&mut doc, &errors));
        assert_eq!(doc["metadata"], json!({"name": "abc"}));

        let mut doc = json!({"metadata": {"name": "_abc"}, "cells": []});
        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].keyword, "pattern");
        assert!(validator.strip_invalid_metadata(&mut doc, &errors));
        assert_eq!(doc["metadata"], json!({}));
    }

    #[test]
    fn strip_then_revalidate() {
        let validator = GenericValidator::new(schema()).unwrap();
        let mut doc = json!({"metadata": {"title": 1, "authors": "me", "keep": true}, "cells": []});
        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert!(validator.strip_invalid_metadata(&mut doc, &errors));
        assert_eq!(doc["metadata"], json!({"keep": true}));

        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert!(errors.is_empty());
        assert!(!validator.strip_invalid_metadata(&mut doc, &errors));
    }
}
