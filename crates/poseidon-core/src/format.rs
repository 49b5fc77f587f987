//! # Genotype Formats
//!
//! [`GenotypeFormat`] is the single definition of the linked-file genotype
//! formats a manifest may declare. Every `match` on it must be exhaustive, so
//! adding a format forces every consumer to handle it. Unknown tags are
//! rejected by schema validation before a manifest is ever deserialized; the
//! [`FromStr`] impl exists for front ends that take a tag from the user.
//!
//! [`GenotypeData`] is the `genotypeData` section of a manifest: the format
//! tag plus the three files whose roles are fixed by [`GenotypeFileRole`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PoseidonError;

/// Linked-file genotype formats.
///
/// | Tag | Files |
/// |-----|-------|
/// | `EIGENSTRAT` | text genotype matrix, `.snp` variant annotations, `.ind` individual annotations |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenotypeFormat {
    /// EIGENSTRAT text format: one genotype row per variant, one code per
    /// individual, no separators.
    #[serde(rename = "EIGENSTRAT")]
    Eigenstrat,
}

impl GenotypeFormat {
    /// All formats in canonical order.
    pub fn all_formats() -> &'static [GenotypeFormat] {
        &[Self::Eigenstrat]
    }

    /// The tag used in manifests. Must match the serde representation and
    /// the enum in `genotype-data.schema.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eigenstrat => "EIGENSTRAT",
        }
    }

    /// The roles of the three declared files, in manifest order.
    pub fn file_roles(&self) -> &'static [GenotypeFileRole] {
        match self {
            Self::Eigenstrat => &[
                GenotypeFileRole::Matrix,
                GenotypeFileRole::VariantAnnotation,
                GenotypeFileRole::IndividualAnnotation,
            ],
        }
    }
}

impl std::fmt::Display for GenotypeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenotypeFormat {
    type Err = PoseidonError;

    /// Parse a format from its manifest tag. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EIGENSTRAT" => Ok(Self::Eigenstrat),
            other => Err(PoseidonError::UnknownFormat {
                tag: other.to_string(),
            }),
        }
    }
}

/// What one of the three linked files holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenotypeFileRole {
    /// Genotype calls, one row per variant (`genoFile`).
    Matrix,
    /// Variant annotations, one row per variant (`snpFile`).
    VariantAnnotation,
    /// Individual annotations, one row per individual (`indFile`).
    IndividualAnnotation,
}

impl GenotypeFileRole {
    /// The manifest key that declares the file for this role.
    pub fn manifest_key(&self) -> &'static str {
        match self {
            Self::Matrix => "genoFile",
            Self::VariantAnnotation => "snpFile",
            Self::IndividualAnnotation => "indFile",
        }
    }
}

/// The `genotypeData` section of a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenotypeData {
    /// Which decoder applies.
    pub format: GenotypeFormat,
    /// Genotype matrix file.
    pub geno_file: PathBuf,
    /// Variant annotation file.
    pub snp_file: PathBuf,
    /// Individual annotation file.
    pub ind_file: PathBuf,
}

impl GenotypeData {
    /// The declared path for `role`.
    pub fn path_for(&self, role: GenotypeFileRole) -> &Path {
        match role {
            GenotypeFileRole::Matrix => &self.geno_file,
            GenotypeFileRole::VariantAnnotation => &self.snp_file,
            GenotypeFileRole::IndividualAnnotation => &self.ind_file,
        }
    }

    /// A copy with every relative path joined onto `base`. Absolute paths are
    /// kept as declared.
    pub fn resolved_against(&self, base: &Path) -> GenotypeData {
        GenotypeData {
            format: self.format,
            geno_file: base.join(&self.geno_file),
            snp_file: base.join(&self.snp_file),
            ind_file: base.join(&self.ind_file),
        }
    }
}
