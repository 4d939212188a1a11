//! Normalizes upstream statistics and metadata documents into [`Candidate`]
//! records.
//!
//! This is the only place where loosely-typed JSON is inspected. Every field
//! that is absent, has the wrong type or holds an impossible value falls back
//! to its default, so extraction never fails and the scorers always see a
//! fully populated record.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::select::candidate::AssemblyLevel;
use crate::select::candidate::Candidate;
use crate::select::candidate::DocumentStatus;
use crate::select::candidate::Provenance;
use crate::select::samplesheet::CandidateSource;

/// Multiplier applied to chromosome completeness when no BUSCO result is
/// available. This is an unvalidated approximation, not a BUSCO equivalent.
pub const BUSCO_ESTIMATE_MULTIPLIER: f64 = 1.1;

//===================//
// Document loading  //
//===================//

/// Loads a JSON document from disk. Missing, unreadable and unparseable files
/// are reported through the returned [`DocumentStatus`] rather than as errors.
pub fn load_document(
    path: Option<&Path>,
    sample_id: &str,
    kind: &str,
) -> (Option<Value>, DocumentStatus) {
    let path = match path {
        Some(path) => path,
        None => {
            debug!("[{}] no {} document configured.", sample_id, kind);
            return (None, DocumentStatus::Missing);
        }
    };

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "[{}] {} document not found: {}. Using defaults.",
                sample_id,
                kind,
                path.display()
            );
            return (None, DocumentStatus::Missing);
        }
        Err(err) => {
            warn!(
                "[{}] could not read {} document {}: {}. Using defaults.",
                sample_id,
                kind,
                path.display(),
                err
            );
            return (None, DocumentStatus::Malformed);
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => (Some(value), DocumentStatus::Parsed),
        Err(err) => {
            warn!(
                "[{}] {} document {} is not valid JSON: {}. Using defaults.",
                sample_id,
                kind,
                path.display(),
                err
            );
            (None, DocumentStatus::Malformed)
        }
    }
}

//================//
// Field access   //
//================//

/// A view over one optional document that performs typed, defaulted lookups
/// by dotted path and logs any value it has to discard.
struct Fields<'a> {
    sample_id: &'a str,
    document: Option<&'a Value>,
}

impl<'a> Fields<'a> {
    fn new(sample_id: &'a str, document: Option<&'a Value>) -> Self {
        Fields {
            sample_id,
            document,
        }
    }

    fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut current = self.document?;

        for key in path.split('.') {
            current = current.get(key)?;
        }

        match current {
            Value::Null => None,
            value => Some(value),
        }
    }

    fn discard(&self, path: &str, value: &Value, expected: &str) {
        warn!(
            "[{}] field `{}` holds {} where {} was expected. Treating it as missing.",
            self.sample_id, path, value, expected
        );
    }

    fn number(&self, path: &str) -> Option<f64> {
        let value = self.lookup(path)?;

        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match number {
            Some(n) if n.is_finite() => Some(n),
            _ => {
                self.discard(path, value, "a number");
                None
            }
        }
    }

    fn non_negative(&self, path: &str) -> Option<f64> {
        let n = self.number(path)?;

        if n < 0.0 {
            warn!(
                "[{}] field `{}` is negative ({}). Treating it as missing.",
                self.sample_id, path, n
            );
            return None;
        }

        Some(n)
    }

    fn count(&self, path: &str) -> Option<u64> {
        self.non_negative(path).map(|n| n as u64)
    }

    fn percentage(&self, path: &str) -> Option<f64> {
        let n = self.non_negative(path)?;

        if n > 100.0 {
            warn!(
                "[{}] field `{}` is not a percentage ({}). Treating it as missing.",
                self.sample_id, path, n
            );
            return None;
        }

        Some(n)
    }

    fn string(&self, path: &str) -> Option<String> {
        let value = self.lookup(path)?;

        match value {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                self.discard(path, value, "a string");
                None
            }
        }
    }

    fn present(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }
}

/// Extracts the leading four digit year from an ISO-like date string such as
/// `2021/01/27` or `2021-01-27T00:00:00`.
pub fn parse_release_year(date: &str) -> Option<i32> {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    let re = YEAR.get_or_init(|| Regex::new(r"^\s*(\d{4})").expect("year regex compiles"));

    re.captures(date)
        .and_then(|captures| captures.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

//============//
// Extraction //
//============//

/// Builds a [`Candidate`] from already-loaded documents. Either document may be
/// absent.
pub fn extract_from_documents(
    source: &CandidateSource,
    statistics: Option<&Value>,
    metadata: Option<&Value>,
    provenance: Provenance,
) -> Candidate {
    let sample_id = source.sample_id.as_str();
    let stats = Fields::new(sample_id, statistics);
    let meta = Fields::new(sample_id, metadata);

    let mut candidate = Candidate::new(source.sample_id.clone(), source.genome_file.clone());
    candidate.accession = source.accession.clone();
    candidate.provenance = provenance;

    //==================//
    // Statistics facet //
    //==================//

    if let Some(n50) = stats.count("assembly_metrics.scaffold_n50") {
        candidate.scaffold_n50 = n50;
    }

    if let Some(length) = stats.count("sample_info.total_length") {
        candidate.total_length = length;
    }

    if let Some(n) = stats.percentage("nucleotide_composition.n_percentage") {
        candidate.n_percentage = n;
    }

    candidate.gc_percentage = stats.percentage("nucleotide_composition.gc_percentage");

    if let Some(count) = stats.count("sequence_size_distribution.very_large") {
        candidate.chromosome_level_scaffold_count = count;
    }

    match stats.percentage("busco.completeness") {
        Some(completeness) => candidate.busco_completeness = completeness,
        None => {
            if let Some(chromosome_completeness) =
                stats.non_negative("quality_assessment.chromosome_completeness")
            {
                candidate.busco_completeness =
                    (chromosome_completeness * BUSCO_ESTIMATE_MULTIPLIER).min(100.0);
                candidate.busco_estimated = true;
                debug!(
                    "[{}] BUSCO completeness estimated as {:.2}% from chromosome completeness \
                    {:.2}% (approximation).",
                    sample_id, candidate.busco_completeness, chromosome_completeness
                );
            }
        }
    }

    //================//
    // Metadata facet //
    //================//

    if let Some(level) = meta.string("assemblyInfo.assemblyLevel") {
        candidate.assembly_level = AssemblyLevel::from_ncbi(&level);
        if candidate.assembly_level == AssemblyLevel::Unknown {
            debug!("[{}] unrecognized assembly level: {}", sample_id, level);
        }
    }

    candidate.assembly_method = meta.string("assemblyInfo.assemblyMethod");

    if let Some(date) = meta.string("assemblyInfo.releaseDate") {
        candidate.release_year = parse_release_year(&date);
        if candidate.release_year.is_none() {
            warn!(
                "[{}] release date `{}` has no leading year. Treating it as missing.",
                sample_id, date
            );
        }
    }

    candidate.has_annotation = meta.present("annotationInfo");

    if let Some(database) = meta.string("sourceDatabase") {
        candidate.source_database = database;
    }

    candidate.breed = meta.string("organism.infraspecificNames.breed");

    candidate
}

/// Loads the documents referenced by a [`CandidateSource`] and extracts its
/// [`Candidate`].
pub fn extract(source: &CandidateSource) -> Candidate {
    let (statistics, statistics_status) =
        load_document(source.statistics.as_deref(), &source.sample_id, "statistics");
    let (metadata, metadata_status) =
        load_document(source.metadata.as_deref(), &source.sample_id, "metadata");

    let provenance = Provenance {
        statistics: statistics_status,
        metadata: metadata_status,
    };

    extract_from_documents(source, statistics.as_ref(), metadata.as_ref(), provenance)
}

/// Extracts every candidate in parallel. The output keeps the input order.
pub fn extract_all(sources: &[CandidateSource]) -> Vec<Candidate> {
    sources.par_iter().map(extract).collect()
}
