//! # Error Tree
//!
//! Groups validation errors by the document location they point at, so the
//! stripping step can ask "which keys under `metadata` failed?" or "did
//! cell 3 fail a `oneOf`?" without scanning the whole error list.

use std::collections::BTreeMap;

use nbcheck_core::{PathSegment, ValidationError};

/// Errors arranged by instance path.
///
/// Each node holds the errors whose `path` ends at it, keyed by keyword (a
/// later error with the same keyword replaces an earlier one), and one child
/// per next path segment.
#[derive(Debug, Clone, Default)]
pub struct ErrorTree {
    errors: BTreeMap<String, ValidationError>,
    children: BTreeMap<PathSegment, ErrorTree>,
}

impl ErrorTree {
    /// Build a tree from errors, placing each by its `path`.
    pub fn new<'e>(errors: impl IntoIterator<Item = &'e ValidationError>) -> Self {
        let mut tree = ErrorTree::default();
        for error in errors {
            let node = error.path.iter().fold(&mut tree, |node, segment| {
                node.children.entry(segment.clone()).or_default()
            });
            node.errors.insert(error.keyword.clone(), error.clone());
        }
        tree
    }

    /// Subtree for `segment`.
    pub fn child(&self, segment: &PathSegment) -> Option<&ErrorTree> {
        self.children.get(segment)
    }

    /// Segments that have errors beneath them.
    pub fn children(&self) -> impl Iterator<Item = &PathSegment> {
        self.children.keys()
    }

    /// Errors ending exactly at this node, by keyword.
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    /// The error for `keyword` at this node.
    pub fn error(&self, keyword: &str) -> Option<&ValidationError> {
        self.errors.get(keyword)
    }

    /// Number of errors at this node and all of its descendants.
    pub fn total_errors(&self) -> usize {
        self.errors.len()
            + self
                .children
                .values()
                .map(ErrorTree::total_errors)
                .sum::<usize>()
    }

    /// True if the tree holds no errors.
    pub fn is_empty(&self) -> bool {
        self.total_errors() == 0
    }
}
