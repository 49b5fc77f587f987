//! Decoder seams.
//!
//! Callers that know the format statically use the concrete reader type;
//! front ends that dispatch on a manifest's format tag go through
//! `Box<dyn GenotypeStream>` from the [`FormatRegistry`](crate::FormatRegistry).

use poseidon_core::{GenotypeData, GenotypeFormat, GenotypeRecord, Individual, PoseidonError};

/// A forward-only stream of decoded genotype rows.
///
/// Yields records in file order. After the first `Err` or `None` the stream
/// is finished and keeps returning `None`.
pub trait GenotypeStream: Iterator<Item = Result<GenotypeRecord, PoseidonError>> + Send {
    /// Number of individuals, i.e. the length of every record's `genotypes`.
    fn individual_count(&self) -> usize;

    /// Individuals in column order.
    fn individuals(&self) -> &[Individual];

    /// Records successfully yielded so far.
    fn rows_read(&self) -> usize;
}

/// Opens streams for one genotype format.
pub trait GenotypeDecoderFactory: Send + Sync {
    /// The format this factory decodes.
    fn format(&self) -> GenotypeFormat;

    /// Open a stream over `files`. Paths are used exactly as given.
    fn open(&self, files: &GenotypeData) -> Result<Box<dyn GenotypeStream>, PoseidonError>;
}
