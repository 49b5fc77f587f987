//! # Business-Rule Errors
//!
//! [`PoseidonError`] covers every failure that is about the *relationships*
//! in the data rather than the shape of a manifest: repeated values,
//! colliding module names, and genotype files that disagree with each other.
//! Structural schema failures live in `poseidon_schema::SchemaValidationError`
//! so callers can tell the two apart.
//!
//! Decoder variants carry the file path and the 0-based row index (and
//! column offset where one applies) of the offending input.

use std::path::PathBuf;

use thiserror::Error;

/// Business-rule error for Poseidon modules and genotype data.
#[derive(Error, Debug)]
pub enum PoseidonError {
    /// A value passed to [`check_duplicates`](crate::check_duplicates)
    /// occurred more than once.
    #[error("duplicate value at index {duplicate_index} (first seen at index {first_index})")]
    DuplicateValue {
        /// Position of the first occurrence.
        first_index: usize,
        /// Position of the repeated occurrence.
        duplicate_index: usize,
    },

    /// Two or more loaded manifests share a module name.
    #[error("duplicate module name(s): {}", names.join(", "))]
    DuplicateModuleNames {
        /// Each colliding name once, in order of first repetition.
        names: Vec<String>,
    },

    /// A format tag that is not part of [`GenotypeFormat`](crate::GenotypeFormat).
    #[error("unknown genotype format: {tag:?}")]
    UnknownFormat {
        /// The unrecognized tag.
        tag: String,
    },

    /// A known format with no decoder registered for it.
    #[error("no decoder registered for genotype format {format}")]
    UnsupportedFormat {
        /// The format tag.
        format: String,
    },

    /// A variant-annotation line has the wrong field count or a field that
    /// does not parse.
    #[error("{}: row {row}: malformed field '{field}': {reason}", path.display())]
    MalformedSnpLine {
        /// The snp file.
        path: PathBuf,
        /// 0-based row index.
        row: usize,
        /// Name of the offending field (or `"line"` for a field-count error).
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A genotype row does not have one code per individual.
    #[error(
        "{}: row {row}: expected {expected} genotype codes, found {actual}",
        path.display()
    )]
    GenotypeRowLength {
        /// The geno file.
        path: PathBuf,
        /// 0-based row index.
        row: usize,
        /// Individual count.
        expected: usize,
        /// Codes actually present on the row.
        actual: usize,
    },

    /// A genotype row contains a character outside `{0, 1, 2, 9}`.
    #[error("{}: row {row}, column {column}: invalid genotype code {code:?}", path.display())]
    InvalidGenotypeCode {
        /// The geno file.
        path: PathBuf,
        /// 0-based row index.
        row: usize,
        /// 0-based column (individual) offset.
        column: usize,
        /// The offending character.
        code: char,
    },

    /// The snp and geno files have different numbers of rows.
    #[error(
        "row {row}: {} ended while {} still has rows",
        exhausted.display(),
        remaining.display()
    )]
    RowCountMismatch {
        /// 0-based index of the first row missing from the shorter file.
        row: usize,
        /// The file that ended first.
        exhausted: PathBuf,
        /// The file that still had data.
        remaining: PathBuf,
    },

    /// I/O failure on a genotype file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Result alias for business-rule operations.
pub type PoseidonResult<T> = Result<T, PoseidonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_module_names_lists_every_name() {
        let err = PoseidonError::DuplicateModuleNames {
            names: vec!["modA".to_string(), "modB".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("modA, modB"), "got: {msg}");
    }

    #[test]
    fn row_length_names_row_and_counts() {
        let err = PoseidonError::GenotypeRowLength {
            path: PathBuf::from("geno.txt"),
            row: 4,
            expected: 10,
            actual: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("geno.txt"));
        assert!(msg.contains("row 4"));
        assert!(msg.contains("expected 10"));
        assert!(msg.contains("found 9"));
    }

    #[test]
    fn invalid_code_names_row_and_column() {
        let err = PoseidonError::InvalidGenotypeCode {
            path: PathBuf::from("geno.txt"),
            row: 2,
            column: 7,
            code: '3',
        };
        let msg = err.to_string();
        assert!(msg.contains("row 2, column 7"));
        assert!(msg.contains("'3'"));
    }

    #[test]
    fn malformed_snp_line_names_field() {
        let err = PoseidonError::MalformedSnpLine {
            path: PathBuf::from("snp.txt"),
            row: 0,
            field: "pos",
            reason: "invalid digit found in string".to_string(),
        };
        assert!(err.to_string().contains("'pos'"));
    }

    #[test]
    fn row_count_mismatch_names_both_files() {
        let err = PoseidonError::RowCountMismatch {
            row: 10,
            exhausted: PathBuf::from("geno.txt"),
            remaining: PathBuf::from("snp.txt"),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 10"));
        assert!(msg.contains("geno.txt ended"));
        assert!(msg.contains("snp.txt"));
    }
}
