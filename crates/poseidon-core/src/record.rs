//! Decoded genotype rows and the individuals that label their columns.

use serde::{Deserialize, Serialize};

/// Genotype code for a missing call.
pub const MISSING_GENOTYPE: u8 = 9;

/// Every code a genotype row may contain: allele dosages 0-2 plus missing.
pub const VALID_GENOTYPE_CODES: [u8; 4] = [0, 1, 2, MISSING_GENOTYPE];

/// One variant with its per-individual genotype calls.
///
/// Produced one at a time by a genotype stream and owned by the caller from
/// then on; `genotypes` has exactly one entry per individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenotypeRecord {
    /// Chromosome number.
    pub chrom: u32,
    /// Base-pair position.
    pub pos: u64,
    /// Genetic-map position.
    pub genetic_pos: f64,
    /// Variant identifier.
    pub snp_id: String,
    /// Reference allele.
    pub ref_allele: char,
    /// Alternative allele.
    pub alt_allele: char,
    /// Calls in individual order, each one of [`VALID_GENOTYPE_CODES`].
    pub genotypes: Vec<u8>,
}

impl GenotypeRecord {
    /// Number of missing calls in this row.
    pub fn missing_count(&self) -> usize {
        self.genotypes
            .iter()
            .filter(|&&g| g == MISSING_GENOTYPE)
            .count()
    }
}

/// One line of an individual annotation file: `id [sex [population]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Individual identifier.
    pub id: String,
    /// Sex code as written (usually `M`, `F` or `U`).
    pub sex: Option<String>,
    /// Population or group label.
    pub population: Option<String>,
}

impl Individual {
    /// Parse one line. Returns `None` for a blank line.
    pub fn parse_line(line: &str) -> Option<Individual> {
        let mut fields = line.split_whitespace();
        let id = fields.next()?.to_string();
        Some(Individual {
            id,
            sex: fields.next().map(str::to_string),
            population: fields.next().map(str::to_string),
        })
    }
}
