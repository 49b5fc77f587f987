//! # EIGENSTRAT Decoder
//!
//! Streams the three linked EIGENSTRAT text files:
//!
//! - **ind**: one individual per non-blank line, `id [sex [population]]`.
//!   Read in full when the reader opens; its length fixes the row width.
//! - **snp**: one variant per line, six whitespace-separated fields
//!   `snpId chrom geneticPos pos ref alt`.
//! - **geno**: one line per variant, one code per individual with no
//!   separators. Codes are `0`, `1`, `2`, or `9` for missing.
//!
//! Row `i` of the snp file annotates row `i` of the geno file. The two are
//! read in lockstep, one line each per record, and must end on the same row.
//!
//! Lines may end in `\n` or `\r\n`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use poseidon_core::{
    GenotypeData, GenotypeFormat, GenotypeRecord, Individual, PoseidonError, MISSING_GENOTYPE,
};

use crate::traits::{GenotypeDecoderFactory, GenotypeStream};

const SNP_FIELD_COUNT: usize = 6;

/// Open handles plus reusable line buffers. Dropped as soon as the stream
/// finishes so the files close without waiting for the reader to drop.
struct Cursors {
    geno: BufReader<File>,
    snp: BufReader<File>,
    geno_line: String,
    snp_line: String,
}

/// Forward-only reader over an EIGENSTRAT file triple.
///
/// Yields one [`GenotypeRecord`] per variant. The first error ends the
/// stream; records yielded before it stay valid.
pub struct EigenstratReader {
    geno_path: PathBuf,
    snp_path: PathBuf,
    ind_path: PathBuf,
    individuals: Vec<Individual>,
    cursors: Option<Cursors>,
    rows_read: usize,
}

impl std::fmt::Debug for EigenstratReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EigenstratReader")
            .field("geno_path", &self.geno_path)
            .field("snp_path", &self.snp_path)
            .field("ind_path", &self.ind_path)
            .field("individual_count", &self.individuals.len())
            .field("rows_read", &self.rows_read)
            .field("finished", &self.cursors.is_none())
            .finish()
    }
}

impl EigenstratReader {
    /// Open a triple. Paths are used exactly as given.
    ///
    /// Reads the individual file completely and opens the other two; no
    /// genotype or variant rows are read until iteration starts.
    ///
    /// # Errors
    ///
    /// [`PoseidonError::Io`] naming the first file that cannot be opened or
    /// (for the individual file) read.
    pub fn open(
        geno: impl AsRef<Path>,
        snp: impl AsRef<Path>,
        ind: impl AsRef<Path>,
    ) -> Result<Self, PoseidonError> {
        let geno_path = geno.as_ref().to_path_buf();
        let snp_path = snp.as_ref().to_path_buf();
        let ind_path = ind.as_ref().to_path_buf();

        let individuals = read_individuals(&ind_path)?;
        let cursors = Cursors {
            geno: open_buffered(&geno_path)?,
            snp: open_buffered(&snp_path)?,
            geno_line: String::new(),
            snp_line: String::new(),
        };

        tracing::debug!(
            geno = %geno_path.display(),
            individuals = individuals.len(),
            "opened EIGENSTRAT stream"
        );

        Ok(Self {
            geno_path,
            snp_path,
            ind_path,
            individuals,
            cursors: Some(cursors),
            rows_read: 0,
        })
    }

    /// Open the triple described by a manifest's `genotypeData` section.
    pub fn from_genotype_data(files: &GenotypeData) -> Result<Self, PoseidonError> {
        match files.format {
            GenotypeFormat::Eigenstrat => {
                Self::open(&files.geno_file, &files.snp_file, &files.ind_file)
            }
        }
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    /// Individuals in genotype column order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Records successfully yielded so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn geno_path(&self) -> &Path {
        &self.geno_path
    }

    pub fn snp_path(&self) -> &Path {
        &self.snp_path
    }

    pub fn ind_path(&self) -> &Path {
        &self.ind_path
    }
}

impl Iterator for EigenstratReader {
    type Item = Result<GenotypeRecord, PoseidonError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursors = self.cursors.as_mut()?;
        let row = self.rows_read;
        match cursors.read_record(&self.geno_path, &self.snp_path, self.individuals.len(), row) {
            Ok(Some(record)) => {
                self.rows_read += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.cursors = None;
                tracing::debug!(
                    geno = %self.geno_path.display(),
                    rows = self.rows_read,
                    "EIGENSTRAT stream finished"
                );
                None
            }
            Err(err) => {
                self.cursors = None;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for EigenstratReader {}

impl GenotypeStream for EigenstratReader {
    fn individual_count(&self) -> usize {
        EigenstratReader::individual_count(self)
    }

    fn individuals(&self) -> &[Individual] {
        EigenstratReader::individuals(self)
    }

    fn rows_read(&self) -> usize {
        EigenstratReader::rows_read(self)
    }
}

/// Factory registered for [`GenotypeFormat::Eigenstrat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EigenstratDecoder;

impl GenotypeDecoderFactory for EigenstratDecoder {
    fn format(&self) -> GenotypeFormat {
        GenotypeFormat::Eigenstrat
    }

    fn open(&self, files: &GenotypeData) -> Result<Box<dyn GenotypeStream>, PoseidonError> {
        Ok(Box::new(EigenstratReader::from_genotype_data(files)?))
    }
}

impl Cursors {
    /// Read row `row` from both files. `Ok(None)` when both end together.
    fn read_record(
        &mut self,
        geno_path: &Path,
        snp_path: &Path,
        individual_count: usize,
        row: usize,
    ) -> Result<Option<GenotypeRecord>, PoseidonError> {
        let has_snp = next_line(&mut self.snp, &mut self.snp_line, snp_path)?;
        let has_geno = next_line(&mut self.geno, &mut self.geno_line, geno_path)?;
        match (has_snp, has_geno) {
            (false, false) => return Ok(None),
            (false, true) => {
                return Err(PoseidonError::RowCountMismatch {
                    row,
                    exhausted: snp_path.to_path_buf(),
                    remaining: geno_path.to_path_buf(),
                })
            }
            (true, false) => {
                return Err(PoseidonError::RowCountMismatch {
                    row,
                    exhausted: geno_path.to_path_buf(),
                    remaining: snp_path.to_path_buf(),
                })
            }
            (true, true) => {}
        }

        let mut record = parse_snp_line(&self.snp_line, snp_path, row)?;
        record.genotypes = parse_genotypes(&self.geno_line, geno_path, row, individual_count)?;
        Ok(Some(record))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PoseidonError {
    PoseidonError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn open_buffered(path: &Path) -> Result<BufReader<File>, PoseidonError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| io_error(path, source))
}

fn read_individuals(path: &Path) -> Result<Vec<Individual>, PoseidonError> {
    let mut individuals = Vec::new();
    for line in open_buffered(path)?.lines() {
        let line = line.map_err(|source| io_error(path, source))?;
        if let Some(individual) = Individual::parse_line(&line) {
            individuals.push(individual);
        }
    }
    Ok(individuals)
}

/// Read the next line into `buf` without its terminator. `Ok(false)` at end
/// of file.
fn next_line(
    reader: &mut BufReader<File>,
    buf: &mut String,
    path: &Path,
) -> Result<bool, PoseidonError> {
    buf.clear();
    let read = reader
        .read_line(buf)
        .map_err(|source| io_error(path, source))?;
    if read == 0 {
        return Ok(false);
    }
    let content_len = buf.trim_end_matches(&['\n', '\r'][..]).len();
    buf.truncate(content_len);
    Ok(true)
}

fn malformed(path: &Path, row: usize, field: &'static str, reason: String) -> PoseidonError {
    PoseidonError::MalformedSnpLine {
        path: path.to_path_buf(),
        row,
        field,
        reason,
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}

/// Parse `snpId chrom geneticPos pos ref alt` into a record with no
/// genotypes yet.
fn parse_snp_line(line: &str, path: &Path, row: usize) -> Result<GenotypeRecord, PoseidonError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[snp_id, chrom, genetic_pos, pos, ref_allele, alt_allele] = fields.as_slice() else {
        return Err(malformed(
            path,
            row,
            "line",
            format!(
                "expected {SNP_FIELD_COUNT} whitespace-separated fields, found {}",
                fields.len()
            ),
        ));
    };

    let chrom = chrom
        .parse::<u32>()
        .map_err(|e| malformed(path, row, "chrom", format!("{chrom:?}: {e}")))?;
    let genetic_pos = genetic_pos
        .parse::<f64>()
        .map_err(|e| malformed(path, row, "geneticPos", format!("{genetic_pos:?}: {e}")))?;
    let pos = pos
        .parse::<u64>()
        .map_err(|e| malformed(path, row, "pos", format!("{pos:?}: {e}")))?;
    let ref_allele = single_char(ref_allele).ok_or_else(|| {
        malformed(
            path,
            row,
            "ref",
            format!("expected one allele character, found {ref_allele:?}"),
        )
    })?;
    let alt_allele = single_char(alt_allele).ok_or_else(|| {
        malformed(
            path,
            row,
            "alt",
            format!("expected one allele character, found {alt_allele:?}"),
        )
    })?;

    Ok(GenotypeRecord {
        chrom,
        pos,
        genetic_pos,
        snp_id: snp_id.to_string(),
        ref_allele,
        alt_allele,
        genotypes: Vec::new(),
    })
}

/// Decode one geno line. The width is checked before any code.
fn parse_genotypes(
    line: &str,
    path: &Path,
    row: usize,
    expected: usize,
) -> Result<Vec<u8>, PoseidonError> {
    let actual = line.chars().count();
    if actual != expected {
        return Err(PoseidonError::GenotypeRowLength {
            path: path.to_path_buf(),
            row,
            expected,
            actual,
        });
    }
    line.chars()
        .enumerate()
        .map(|(column, code)| match code {
            '0' => Ok(0),
            '1' => Ok(1),
            '2' => Ok(2),
            '9' => Ok(MISSING_GENOTYPE),
            _ => Err(PoseidonError::InvalidGenotypeCode {
                path: path.to_path_buf(),
                row,
                column,
                code,
            }),
        })
        .collect()
}
