//! # poseidon-core: Foundational Types for Poseidon Modules
//!
//! Leaf crate of the workspace. Every other `poseidon-*` crate depends on it;
//! it depends on nothing internal.
//!
//! ## Contents
//!
//! - [`PoseidonError`]: the business-rule error class. Corpus-level
//!   invariant violations (duplicate module names) and genotype decoding
//!   failures (row width, invalid codes, malformed variant lines) all land
//!   here, separate from structural schema errors in `poseidon-schema`.
//!
//! - [`check_duplicates`] / [`find_duplicates`]: generic uniqueness checks
//!   over any `Eq + Hash` items.
//!
//! - [`GenotypeFormat`]: the closed set of linked-file genotype formats, and
//!   [`GenotypeData`], the file triple a manifest declares for one format.
//!
//! - [`GenotypeRecord`]: one decoded variant row.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `poseidon-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod duplicates;
pub mod error;
pub mod format;
pub mod record;

pub use duplicates::{check_duplicates, find_duplicates};
pub use error::{PoseidonError, PoseidonResult};
pub use format::{GenotypeData, GenotypeFileRole, GenotypeFormat};
pub use record::{GenotypeRecord, Individual, MISSING_GENOTYPE, VALID_GENOTYPE_CODES};
