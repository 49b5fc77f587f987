//! # poseidon-geno
//!
//! Streaming decoders for the genotype data linked from a module manifest.
//!
//! A decoder turns a [`GenotypeData`](poseidon_core::GenotypeData) file
//! triple into a forward-only [`GenotypeStream`] of
//! [`GenotypeRecord`](poseidon_core::GenotypeRecord)s. Only one row of each
//! file is held in memory at a time, so files with millions of variants
//! stream in constant space.
//!
//! [`FormatRegistry`] maps each [`GenotypeFormat`](poseidon_core::GenotypeFormat)
//! tag to a [`GenotypeDecoderFactory`]. New formats plug in through
//! [`FormatRegistry::register`] without touching existing decoders.
//!
//! ```no_run
//! use poseidon_geno::FormatRegistry;
//! # fn demo(files: &poseidon_core::GenotypeData) -> Result<(), poseidon_core::PoseidonError> {
//! let registry = FormatRegistry::with_builtin();
//! for record in registry.open(files)? {
//!     let record = record?;
//!     println!("{} {}", record.snp_id, record.missing_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod eigenstrat;
pub mod registry;
pub mod traits;

pub use eigenstrat::{EigenstratDecoder, EigenstratReader};
pub use registry::FormatRegistry;
pub use traits::{GenotypeDecoderFactory, GenotypeStream};
