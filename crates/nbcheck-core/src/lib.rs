#![deny(missing_docs)]
//! # nbcheck-core — Foundational Types for nbcheck
//!
//! Types shared by every nbcheck crate. Depends on nothing internal.
//!
//! - [`PathSegment`] and JSON-pointer helpers locate values inside a
//!   document.
//! - [`ValidationError`] is the single error shape both validation backends
//!   report through.
//! - [`Backend`] names the validation engines.
//! - [`notebook`] gives typed access to the parts of a notebook document the
//!   repair step touches.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod backend;
pub mod error;
pub mod notebook;
pub mod path;
pub mod validation;

pub use backend::Backend;
pub use error::NbcheckError;
pub use path::{parse_pointer, to_pointer, PathSegment};
pub use validation::ValidationError;
