//! Draft 4 compilation shared by both backends, and the lookup that maps a
//! reported keyword location back to the subschema it was evaluated in.

use jsonschema::{Retrieve, Uri, Validator};
use nbcheck_core::path::{parse_pointer, resolve, PathSegment};
use nbcheck_core::Backend;
use serde_json::Value;

use crate::error::SchemaError;

const REF_KEYWORD: &str = "$ref";

/// Retriever that refuses every external reference.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<String>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference {} is not retrieved", uri.as_str()).into())
    }
}

/// Compile `schema` as Draft 4 without network access.
///
/// Draft 4 has no boolean schemas, so anything but an object is rejected
/// before compilation. Patterns that do not compile (under the crate's
/// ECMA-flavoured regex engine) fail here rather than at validation time.
pub(crate) fn compile(schema: &Value, backend: Backend) -> Result<Validator, SchemaError> {
    if !schema.is_object() {
        return Err(SchemaError::InvalidSchema {
            backend,
            reason: "schema must be a JSON object".to_string(),
        });
    }
    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft4)
        .with_retriever(OfflineRetriever)
        .build(schema)
        .map_err(|e| SchemaError::InvalidSchema {
            backend,
            reason: e.to_string(),
        })
}

/// The subschema reached by walking `location` from `root`.
///
/// `location` is an evaluation path: a `$ref` segment means "continue in
/// the referenced schema". Only same-document fragment references are
/// followed.
pub(crate) fn subschema_at<'s>(root: &'s Value, location: &[PathSegment]) -> Option<&'s Value> {
    location.iter().try_fold(root, |node, segment| {
        match node.get(REF_KEYWORD).and_then(Value::as_str) {
            Some(reference) if segment.is_key(REF_KEYWORD) => {
                let fragment = reference.strip_prefix('#')?;
                resolve(root, &parse_pointer(fragment))
            }
            _ => segment.get(node),
        }
    })
}
