//! # Format Registry
//!
//! Maps [`GenotypeFormat`] tags to decoder factories. Front ends open a
//! module's genotype data through [`FormatRegistry::open`] without naming a
//! concrete reader type.

use std::collections::HashMap;

use poseidon_core::{GenotypeData, GenotypeFormat, PoseidonError};

use crate::eigenstrat::EigenstratDecoder;
use crate::traits::{GenotypeDecoderFactory, GenotypeStream};

/// Decoder factories keyed by format.
#[derive(Default)]
pub struct FormatRegistry {
    factories: HashMap<GenotypeFormat, Box<dyn GenotypeDecoderFactory>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

impl FormatRegistry {
    /// A registry with no decoders.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every decoder this crate ships.
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(EigenstratDecoder));
        registry
    }

    /// Register `factory` for its format, returning the factory it replaces.
    pub fn register(
        &mut self,
        factory: Box<dyn GenotypeDecoderFactory>,
    ) -> Option<Box<dyn GenotypeDecoderFactory>> {
        self.factories.insert(factory.format(), factory)
    }

    pub fn is_registered(&self, format: GenotypeFormat) -> bool {
        self.factories.contains_key(&format)
    }

    /// Registered formats in canonical order.
    pub fn formats(&self) -> Vec<GenotypeFormat> {
        GenotypeFormat::all_formats()
            .iter()
            .copied()
            .filter(|f| self.factories.contains_key(f))
            .collect()
    }

    /// Open a stream over `files` with the decoder for `files.format`.
    ///
    /// # Errors
    ///
    /// - [`PoseidonError::UnsupportedFormat`] if no decoder is registered.
    /// - Whatever the decoder reports while opening the files.
    pub fn open(&self, files: &GenotypeData) -> Result<Box<dyn GenotypeStream>, PoseidonError> {
        let factory =
            self.factories
                .get(&files.format)
                .ok_or_else(|| PoseidonError::UnsupportedFormat {
                    format: files.format.to_string(),
                })?;
        factory.open(files)
    }
}
