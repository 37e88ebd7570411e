//! # Backend Identifiers
//!
//! Names of the schema-validation engines nbcheck can drive. Whether a
//! backend is actually available in a given build is decided by
//! `nbcheck-schema`; this enum only fixes the vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A schema-validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Precompiled validator built once per schema. Reports only the first
    /// violation it meets.
    Compiled,
    /// Full-report validator. Enumerates every violation, with
    /// per-alternative context for failed unions.
    Generic,
}

impl Backend {
    /// Every backend, in order of preference.
    pub const ALL: [Backend; 2] = [Backend::Compiled, Backend::Generic];

    /// Registered name of the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            Backend::Compiled => "compiled",
            Backend::Generic => "generic",
        }
    }

    /// Look up a backend by its registered name.
    pub fn from_name(name: &str) -> Option<Backend> {
        Backend::ALL.into_iter().find(|b| b.as_str() == name)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
