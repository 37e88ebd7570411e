//! # Validator Contract
//!
//! The interface every backend adapter implements. Callers pick an adapter
//! through [`crate::registry`] and then only talk to this trait.

use std::fmt;

use nbcheck_core::{Backend, ValidationError};
use serde_json::Value;

/// A schema-validation backend bound to one schema.
///
/// Adapters cache their compiled or bound validator at construction and are
/// `Send + Sync`, but one instance is meant to serve one logical validation
/// pass: construct, validate, discard.
pub trait NotebookValidator: fmt::Debug + Send + Sync {
    /// Which backend this adapter drives.
    fn backend(&self) -> Backend;

    /// The schema bound at construction.
    fn schema(&self) -> &Value;

    /// Check `document`, returning the first violation found.
    fn validate(&self, document: &Value) -> Result<(), ValidationError>;

    /// Violations of `document` against the bound schema, or against
    /// `schema` when one is given. Never fails: violations are data.
    fn iter_errors<'a>(&'a self, document: &'a Value, schema: Option<&'a Value>) -> ErrorIter<'a>;

    /// Remove the metadata keys that `errors` flag as invalid. Keys whose
    /// location cannot be recovered from an error are left in place.
    /// Returns whether anything was removed.
    fn strip_invalid_metadata(&self, document: &mut Value, errors: &[ValidationError]) -> bool;
}

/// Errors produced by [`NotebookValidator::iter_errors`].
///
/// Finite. Errors against the bound schema are produced as the iterator is
/// advanced; calling `iter_errors` again starts a fresh pass.
pub struct ErrorIter<'a> {
    inner: Box<dyn Iterator<Item = ValidationError> + Send + Sync + 'a>,
}

impl<'a> ErrorIter<'a> {
    pub(crate) fn lazy(errors: impl Iterator<Item = ValidationError> + Send + Sync + 'a) -> Self {
        Self {
            inner: Box::new(errors),
        }
    }

    /// Errors already computed.
    pub(crate) fn collected(errors: Vec<ValidationError>) -> Self {
        Self::lazy(errors.into_iter())
    }
}

impl fmt::Debug for ErrorIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorIter").finish_non_exhaustive()
    }
}

impl Iterator for ErrorIter<'_> {
    type Item = ValidationError;

    fn next(&mut self) -> Option<ValidationError> {
        self.inner.next()
    }
}
