//! Loading the list of candidates a selection run evaluates.
//!
//! Two inputs are supported:
//!
//! * A CSV samplesheet with one row per genome. The `sample` and `fasta`
//!   columns are required; `stats`, `metadata` and `accession` are optional.
//!   Any other column (for example `breed` or `population` from the genome
//!   catalog) is ignored. Relative paths are resolved against the directory
//!   holding the samplesheet.
//! * A JSON array of pre-extracted [`Candidate`] records. Relative genome
//!   paths are resolved against the directory holding the file, and every
//!   percentage must lie in `[0, 100]`.
//!
//! In both cases sample identifiers (and accessions, when present) must be
//! unique.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::select::candidate::Candidate;

/// Columns a samplesheet must have.
pub const REQUIRED_COLUMNS: [&str; 2] = ["sample", "fasta"];

/// Errors raised while loading a list of candidates.
#[derive(Debug, Error)]
pub enum SamplesheetError {
    /// The samplesheet could not be opened or is not valid CSV.
    #[error("could not read samplesheet: {0}")]
    Csv(#[from] csv::Error),

    /// A candidates file could not be read.
    #[error("could not read candidates file: {0}")]
    Io(#[from] io::Error),

    /// A candidates file is not a JSON array of candidate records.
    #[error("invalid candidates file: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the header.
    #[error("samplesheet is missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A required value is empty.
    #[error("samplesheet row {row} has an empty `{column}` value")]
    EmptyValue {
        /// One-based data row number.
        row: usize,

        /// The offending column.
        column: &'static str,
    },

    /// A sample identifier occurs more than once.
    #[error("duplicate sample ID: {0}")]
    DuplicateSample(String),

    /// An accession occurs more than once.
    #[error("duplicate accession: {0}")]
    DuplicateAccession(String),

    /// A pre-extracted candidate carries a value outside its valid range.
    #[error("candidate {sample} has an invalid `{field}` value: {value}")]
    InvalidValue {
        /// Sample identifier of the offending candidate.
        sample: String,

        /// The offending field.
        field: &'static str,

        /// The rejected value.
        value: f64,
    },
}

/// Where the artifacts of one candidate live on disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateSource {
    /// Sample identifier.
    pub sample_id: String,

    /// Standardized FASTA file.
    pub genome_file: PathBuf,

    /// Statistics JSON document.
    pub statistics: Option<PathBuf>,

    /// NCBI style metadata JSON document.
    pub metadata: Option<PathBuf>,

    /// Database accession.
    pub accession: Option<String>,
}

impl CandidateSource {
    /// Creates a new [`CandidateSource`] with no documents attached.
    pub fn new(sample_id: impl Into<String>, genome_file: impl Into<PathBuf>) -> Self {
        CandidateSource {
            sample_id: sample_id.into(),
            genome_file: genome_file.into(),
            statistics: None,
            metadata: None,
            accession: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SamplesheetRow {
    sample: String,
    fasta: String,
    #[serde(default)]
    stats: Option<String>,
    #[serde(default)]
    metadata: Option<String>,
    #[serde(default)]
    accession: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);

    match path.is_absolute() {
        true => path,
        false => base.join(path),
    }
}

/// Ensures sample identifiers and accessions are unique.
fn ensure_unique<'a, I>(entries: I) -> Result<(), SamplesheetError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut samples = HashSet::new();
    let mut accessions = HashSet::new();

    for (sample_id, accession) in entries {
        if !samples.insert(sample_id) {
            return Err(SamplesheetError::DuplicateSample(sample_id.to_string()));
        }

        if let Some(accession) = accession {
            if !accessions.insert(accession) {
                return Err(SamplesheetError::DuplicateAccession(accession.to_string()));
            }
        }
    }

    Ok(())
}

/// Parses a CSV samplesheet from a reader. Relative paths are resolved against
/// `base`.
pub fn parse_samplesheet<R: Read>(
    reader: R,
    base: &Path,
) -> Result<Vec<CandidateSource>, SamplesheetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SamplesheetError::MissingColumn(column));
        }
    }

    let mut sources = Vec::new();

    for (i, result) in reader.deserialize::<SamplesheetRow>().enumerate() {
        let row = result?;
        let line = i + 1;

        if row.sample.is_empty() {
            return Err(SamplesheetError::EmptyValue {
                row: line,
                column: "sample",
            });
        }

        if row.fasta.is_empty() {
            return Err(SamplesheetError::EmptyValue {
                row: line,
                column: "fasta",
            });
        }

        let source = CandidateSource {
            genome_file: resolve(base, &row.fasta),
            statistics: non_empty(row.stats).map(|p| resolve(base, &p)),
            metadata: non_empty(row.metadata).map(|p| resolve(base, &p)),
            accession: non_empty(row.accession),
            sample_id: row.sample,
        };

        debug!(
            "  [*] Sample {}: {}",
            source.sample_id,
            source.genome_file.display()
        );
        sources.push(source);
    }

    ensure_unique(
        sources
            .iter()
            .map(|s| (s.sample_id.as_str(), s.accession.as_deref())),
    )?;

    Ok(sources)
}

/// Reads a CSV samplesheet from disk.
pub fn read_samplesheet(path: impl AsRef<Path>) -> Result<Vec<CandidateSource>, SamplesheetError> {
    let path = path.as_ref();
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let file = fs::File::open(path).map_err(csv::Error::from)?;

    parse_samplesheet(file, base)
}

fn is_percentage(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Ensures the percentages of a pre-extracted candidate lie in `[0, 100]`.
fn validate(candidate: &Candidate) -> Result<(), SamplesheetError> {
    let percentages = [
        ("n_percentage", Some(candidate.n_percentage)),
        ("busco_completeness", Some(candidate.busco_completeness)),
        ("gc_percentage", candidate.gc_percentage),
    ];

    for (field, value) in percentages {
        match value {
            Some(value) if !is_percentage(value) => {
                return Err(SamplesheetError::InvalidValue {
                    sample: candidate.sample_id.clone(),
                    field,
                    value,
                })
            }
            _ => {}
        }
    }

    Ok(())
}

/// Parses a JSON array of pre-extracted [`Candidate`] records from a reader.
/// Relative genome paths are resolved against `base`.
pub fn parse_candidates<R: Read>(
    reader: R,
    base: &Path,
) -> Result<Vec<Candidate>, SamplesheetError> {
    let mut candidates: Vec<Candidate> = serde_json::from_reader(reader)?;

    for candidate in &mut candidates {
        validate(candidate)?;

        if candidate.genome_file.is_relative() {
            candidate.genome_file = base.join(&candidate.genome_file);
        }

        debug!(
            "  [*] Sample {}: {}",
            candidate.sample_id,
            candidate.genome_file.display()
        );
    }

    ensure_unique(
        candidates
            .iter()
            .map(|c| (c.sample_id.as_str(), c.accession.as_deref())),
    )?;

    Ok(candidates)
}

/// Reads a JSON array of pre-extracted [`Candidate`] records from disk.
pub fn read_candidates(path: impl AsRef<Path>) -> Result<Vec<Candidate>, SamplesheetError> {
    let path = path.as_ref();
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let file = fs::File::open(path)?;

    parse_candidates(io::BufReader::new(file), base)
}
