//! Loader error type.

use std::path::PathBuf;

use poseidon_core::PoseidonError;
use poseidon_schema::SchemaValidationError;
use thiserror::Error;

/// Failure while discovering or loading modules.
///
/// Schema and business-rule errors are passed through unchanged so callers
/// can match on the inner value.
#[derive(Error, Debug)]
pub enum ModuleError {
    /// A manifest is unreadable, unparseable, or does not match the schema.
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),

    /// A corpus-level rule was violated (e.g. duplicate module names).
    #[error(transparent)]
    Poseidon(#[from] PoseidonError),

    /// The module root could not be walked.
    #[error("failed to search {} for module manifests: {source}", root.display())]
    Discovery {
        /// Root directory of the search.
        root: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl ModuleError {
    /// True for structural (schema) failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for business-rule failures.
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::Poseidon(_))
    }
}
