//! # Document Paths
//!
//! A location inside a JSON document is a sequence of [`PathSegment`]s:
//! object keys and array indices. Both backends report locations in this
//! shape, although they root them differently (see
//! [`crate::validation::ValidationError`]).
//!
//! Paths are parsed from and rendered as RFC 6901 JSON pointers. Pointer
//! tokens carry no type, so an all-digit token is parsed as an index;
//! [`PathSegment::get`] and [`PathSegment::get_mut`] accept an index against
//! an object by looking up its decimal form.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array position.
    Index(usize),
    /// Object member name.
    Key(String),
}

impl PathSegment {
    /// Returns the key if this segment names an object member.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }

    /// Returns the index if this segment is an array position.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(_) => None,
        }
    }

    /// True if this segment is the object key `name`.
    pub fn is_key(&self, name: &str) -> bool {
        self.as_key() == Some(name)
    }

    /// Name used when this segment addresses an object member.
    pub fn member_name(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        }
    }

    /// Step into `value` by this segment.
    pub fn get<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match (self, value) {
            (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
            (PathSegment::Key(k), Value::Object(map)) => map.get(k),
            (PathSegment::Index(i), Value::Object(map)) => map.get(&i.to_string()),
            (PathSegment::Key(k), Value::Array(items)) => {
                k.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        }
    }

    /// Step mutably into `value` by this segment.
    pub fn get_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        match (self, value) {
            (PathSegment::Index(i), Value::Array(items)) => items.get_mut(*i),
            (PathSegment::Key(k), Value::Object(map)) => map.get_mut(k),
            (PathSegment::Index(i), Value::Object(map)) => map.get_mut(&i.to_string()),
            (PathSegment::Key(k), Value::Array(items)) => match k.parse::<usize>() {
                Ok(i) => items.get_mut(i),
                Err(_) => None,
            },
            _ => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

/// Parse an RFC 6901 JSON pointer into segments.
///
/// The empty pointer is the document root and yields no segments. A leading
/// `#` (URI fragment form) is tolerated. Tokens are unescaped (`~1` → `/`,
/// `~0` → `~`) and all-digit tokens without a leading zero become
/// [`PathSegment::Index`].
pub fn parse_pointer(pointer: &str) -> Vec<PathSegment> {
    let pointer = pointer.strip_prefix('#').unwrap_or(pointer);
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .map(|token| {
            let token = token.replace("~1", "/").replace("~0", "~");
            match token.parse::<usize>() {
                Ok(i) if token == i.to_string() => PathSegment::Index(i),
                _ => PathSegment::Key(token),
            }
        })
        .collect()
}

/// Render segments as an RFC 6901 JSON pointer.
pub fn to_pointer(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&segment.member_name().replace('~', "~0").replace('/', "~1"));
    }
    out
}

/// Follow `segments` from `root`.
pub fn resolve<'v>(root: &'v Value, segments: &[PathSegment]) -> Option<&'v Value> {
    segments.iter().try_fold(root, |node, segment| segment.get(node))
}

/// Follow `segments` mutably from `root`.
pub fn resolve_mut<'v>(root: &'v mut Value, segments: &[PathSegment]) -> Option<&'v mut Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| segment.get_mut(node))
}
