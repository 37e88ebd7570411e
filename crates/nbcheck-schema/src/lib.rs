//! # nbcheck-schema — Notebook Schema Validation
//!
//! Validates notebook documents against a JSON Schema through one adapter
//! contract, [`NotebookValidator`], with two interchangeable backends:
//!
//! - **compiled** ([`compiled::CompiledValidator`]): reports only the first
//!   violation, located by a path queue. Present only with the `compiled`
//!   feature.
//! - **generic** ([`GenericValidator`]): enumerates every violation,
//!   including per-alternative context for `oneOf`/`anyOf` failures.
//!
//! Both compile the schema as Draft 4 with the `jsonschema` crate; they
//! differ in how much they report and in the shape of their errors.
//!
//! ## Backend Selection (`registry`)
//!
//! [`registry::current_validator`] reads `NBCHECK_VALIDATOR` and builds the
//! matching adapter. Unknown names fail with the list of registered ones.
//!
//! ## Metadata Repair
//!
//! Each adapter knows how to map its own errors back to metadata keys and
//! remove them ([`NotebookValidator::strip_invalid_metadata`]). [`repair`]
//! repeats validate-then-strip until the document validates or stops
//! changing, which makes the two backends converge on the same document.
//!
//! ## Crate Policy
//!
//! - Depends only on `nbcheck-core` internally.
//! - Only metadata keys are ever removed; every other violation is left for
//!   the caller to report.
//! - Schema compilation never fetches remote references.

#[cfg(feature = "compiled")]
pub mod compiled;
mod draft4;
pub mod error;
pub mod generic;
pub mod registry;
pub mod repair;
mod strip;
pub mod tree;
pub mod validator;

pub use error::{ConfigError, SchemaError};
pub use generic::GenericValidator;
pub use registry::{current_validator, validator_for, validator_for_name, VALIDATOR_ENV_VAR};
pub use repair::{repair, RepairReport, DEFAULT_MAX_PASSES};
pub use tree::ErrorTree;
pub use validator::{ErrorIter, NotebookValidator};
