//! Module holding the documents written by the `panref select` subcommand and
//! the logic that materializes them.
//!
//! Three artifacts are produced in the output directory:
//!
//! * `selected_reference.fa`, a byte-identical copy of the winning genome;
//! * `reference_metadata.json`, a compact description of the winner;
//! * `reference_selection_report.json`, the winner, every alternative and the
//!   criterion weights.
//!
//! Either all three are written or none are.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::select::advisory::Advisory;
use crate::select::candidate::AssemblyLevel;
use crate::select::candidate::Candidate;
use crate::select::criteria::Criterion;
use crate::select::criteria::ScoreBreakdown;
use crate::select::rank::ScoredCandidate;
use crate::select::rank::SelectionResult;
use crate::select::SelectionError;

/// File name of the copied reference genome.
pub const SELECTED_REFERENCE_FILENAME: &str = "selected_reference.fa";

/// File name of the reference metadata document.
pub const REFERENCE_METADATA_FILENAME: &str = "reference_metadata.json";

/// File name of the selection report document.
pub const SELECTION_REPORT_FILENAME: &str = "reference_selection_report.json";

//=============//
// Suitability //
//=============//

/// A qualitative label for how well the selected reference suits pangenome
/// construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Suitability {
    /// Score of 85 or more.
    Excellent,

    /// Score of 70 or more.
    Good,

    /// Anything lower.
    Adequate,
}

impl Suitability {
    /// Derives the label from a total score.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 85 => Suitability::Excellent,
            s if s >= 70 => Suitability::Good,
            _ => Suitability::Adequate,
        }
    }
}

//======================//
// Document components  //
//======================//

/// The weight of every criterion.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CriteriaWeights(IndexMap<Criterion, u32>);

impl Default for CriteriaWeights {
    fn default() -> Self {
        CriteriaWeights(
            Criterion::ALL
                .into_iter()
                .map(|criterion| (criterion, criterion.weight()))
                .collect(),
        )
    }
}

/// The metrics a candidate was scored on.
#[derive(Debug, Serialize)]
pub struct KeyMetrics {
    /// Assembly level.
    pub assembly_level: AssemblyLevel,

    /// Scaffold N50 in base pairs.
    pub scaffold_n50: u64,

    /// Total length in base pairs.
    pub total_length: u64,

    /// Percentage of `N` bases.
    pub n_percentage: f64,

    /// Percentage of `G`/`C` bases, when reported.
    pub gc_percentage: Option<f64>,

    /// BUSCO completeness in percent.
    pub busco_completeness: f64,

    /// Whether the BUSCO completeness is an estimate.
    pub busco_estimated: bool,

    /// Number of chromosome-level scaffolds.
    pub chromosome_level_scaffolds: u64,

    /// Whether an annotation is available.
    pub has_annotation: bool,

    /// Source database.
    pub source_database: String,

    /// Breed.
    pub breed: Option<String>,

    /// Assembly method.
    pub assembly_method: Option<String>,

    /// Release year.
    pub release_year: Option<i32>,
}

impl From<&Candidate> for KeyMetrics {
    fn from(candidate: &Candidate) -> Self {
        KeyMetrics {
            assembly_level: candidate.assembly_level,
            scaffold_n50: candidate.scaffold_n50,
            total_length: candidate.total_length,
            n_percentage: candidate.n_percentage,
            gc_percentage: candidate.gc_percentage,
            busco_completeness: candidate.busco_completeness,
            busco_estimated: candidate.busco_estimated,
            chromosome_level_scaffolds: candidate.chromosome_level_scaffold_count,
            has_annotation: candidate.has_annotation,
            source_database: candidate.source_database.clone(),
            breed: candidate.breed.clone(),
            assembly_method: candidate.assembly_method.clone(),
            release_year: candidate.release_year,
        }
    }
}

/// The full account of one ranked candidate.
#[derive(Debug, Serialize)]
pub struct CandidateReport {
    /// One-based rank; the selected reference is rank 1.
    pub rank: usize,

    /// Sample identifier.
    pub sample_id: String,

    /// Database accession, if known.
    pub accession: Option<String>,

    /// Path to the genome file that was evaluated.
    pub genome_file: PathBuf,

    /// Position of the candidate in the input.
    pub input_position: usize,

    /// Total score.
    pub selection_score: u32,

    /// Points per breakdown key.
    pub score_breakdown: ScoreBreakdown,

    /// Points per criterion.
    pub criterion_scores: IndexMap<Criterion, u32>,

    /// The metrics that were scored.
    pub key_metrics: KeyMetrics,

    /// Quality gates the candidate failed.
    pub advisories: Vec<Advisory>,
}

impl CandidateReport {
    /// Creates a new [`CandidateReport`].
    pub fn new(rank: usize, scored: &ScoredCandidate) -> Self {
        CandidateReport {
            rank,
            sample_id: scored.candidate.sample_id.clone(),
            accession: scored.candidate.accession.clone(),
            genome_file: scored.candidate.genome_file.clone(),
            input_position: scored.original_index,
            selection_score: scored.total_score(),
            score_breakdown: scored.breakdown.clone(),
            criterion_scores: scored.breakdown.criterion_totals(),
            key_metrics: KeyMetrics::from(&scored.candidate),
            advisories: scored.advisories.clone(),
        }
    }
}

//===================//
// Metadata document //
//===================//

/// The `selected_reference` section of [`ReferenceMetadata`].
#[derive(Debug, Serialize)]
pub struct SelectedReference {
    /// Sample identifier.
    pub sample_id: String,

    /// Total score.
    pub selection_score: u32,

    /// Points per breakdown key.
    pub score_breakdown: ScoreBreakdown,

    /// The metrics that were scored.
    pub key_metrics: KeyMetrics,

    /// When the selection was made (RFC 3339, UTC).
    pub selection_timestamp: String,
}

/// The `reference_metadata.json` document.
#[derive(Debug, Serialize)]
pub struct ReferenceMetadata {
    /// The selected reference.
    pub selected_reference: SelectedReference,

    /// The weight of every criterion.
    pub selection_criteria: CriteriaWeights,

    /// Qualitative suitability label.
    pub pangenome_suitability: Suitability,
}

impl ReferenceMetadata {
    /// Creates a new [`ReferenceMetadata`].
    pub fn new(result: &SelectionResult, timestamp: DateTime<Utc>) -> Self {
        let selected = &result.selected;

        ReferenceMetadata {
            selected_reference: SelectedReference {
                sample_id: selected.candidate.sample_id.clone(),
                selection_score: selected.total_score(),
                score_breakdown: selected.breakdown.clone(),
                key_metrics: KeyMetrics::from(&selected.candidate),
                selection_timestamp: format_timestamp(timestamp),
            },
            selection_criteria: CriteriaWeights::default(),
            pangenome_suitability: Suitability::from_score(selected.total_score()),
        }
    }
}

//===================//
// Selection report  //
//===================//

/// The `selection_summary` section of [`SelectionReport`].
#[derive(Debug, Serialize)]
pub struct SelectionSummary {
    /// Sample identifier of the selected reference.
    pub selected_reference: String,

    /// Total score of the selected reference.
    pub selection_score: u32,

    /// Qualitative suitability label.
    pub pangenome_suitability: Suitability,

    /// How many candidates were ranked.
    pub total_candidates_evaluated: usize,

    /// How many alternatives are listed.
    pub alternatives_reported: usize,

    /// When the selection was made (RFC 3339, UTC).
    pub selection_timestamp: String,

    /// Version of the tool that made the selection.
    pub tool_version: String,
}

/// The `reference_selection_report.json` document.
#[derive(Debug, Serialize)]
pub struct SelectionReport {
    /// Headline figures.
    pub selection_summary: SelectionSummary,

    /// The selected reference.
    pub selected_reference: CandidateReport,

    /// The runners-up, best first.
    pub alternative_candidates: Vec<CandidateReport>,

    /// The weight of every criterion.
    pub selection_criteria_weights: CriteriaWeights,
}

impl SelectionReport {
    /// Creates a new [`SelectionReport`].
    pub fn new(result: &SelectionResult, timestamp: DateTime<Utc>) -> Self {
        let selected = &result.selected;

        SelectionReport {
            selection_summary: SelectionSummary {
                selected_reference: selected.candidate.sample_id.clone(),
                selection_score: selected.total_score(),
                pangenome_suitability: Suitability::from_score(selected.total_score()),
                total_candidates_evaluated: result.total_candidates_evaluated,
                alternatives_reported: result.alternatives.len(),
                selection_timestamp: format_timestamp(timestamp),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            selected_reference: CandidateReport::new(1, selected),
            alternative_candidates: result
                .alternatives
                .iter()
                .enumerate()
                .map(|(i, alternative)| CandidateReport::new(i + 2, alternative))
                .collect(),
            selection_criteria_weights: CriteriaWeights::default(),
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

//=========================//
// Writing the artifacts   //
//=========================//

/// Paths of the artifacts written by [`write_artifacts`].
#[derive(Debug)]
pub struct Artifacts {
    /// The copied reference genome.
    pub reference: PathBuf,

    /// The reference metadata document.
    pub metadata: PathBuf,

    /// The selection report document.
    pub report: PathBuf,
}

/// A file written under a temporary name, waiting to be renamed into place.
/// An artifact from a previous run is set aside under `backup` until every
/// file of this run is in place.
struct Staged {
    staged: PathBuf,
    backup: PathBuf,
    destination: PathBuf,
}

impl Staged {
    fn new(directory: &Path, filename: &str) -> Self {
        Staged {
            staged: directory.join(format!(".{}.partial", filename)),
            backup: directory.join(format!(".{}.previous", filename)),
            destination: directory.join(filename),
        }
    }
}

fn output_error(path: &Path) -> impl FnOnce(io::Error) -> SelectionError + '_ {
    move |source| SelectionError::Output {
        path: path.to_path_buf(),
        source,
    }
}

fn write_json<T: Serialize>(document: &T, target: &Staged) -> Result<(), SelectionError> {
    let file = File::create(&target.staged).map_err(output_error(&target.destination))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(io::Error::from)
        .and_then(|_| writer.write_all(b"\n"))
        .and_then(|_| writer.flush())
        .map_err(output_error(&target.destination))
}

fn stage(
    result: &SelectionResult,
    timestamp: DateTime<Utc>,
    reference: &Staged,
    metadata: &Staged,
    report: &Staged,
) -> Result<(), SelectionError> {
    let genome = &result.selected.candidate.genome_file;

    debug!(
        "Copying {} to {}.",
        genome.display(),
        reference.destination.display()
    );
    fs::copy(genome, &reference.staged).map_err(|source| SelectionError::CopyGenome {
        from: genome.clone(),
        to: reference.destination.clone(),
        source,
    })?;

    write_json(&ReferenceMetadata::new(result, timestamp), metadata)?;
    write_json(&SelectionReport::new(result, timestamp), report)?;

    Ok(())
}

/// Moves one staged file into place. Returns whether a previous artifact was
/// set aside.
fn install(file: &Staged) -> io::Result<bool> {
    let backed_up = match fs::symlink_metadata(&file.destination) {
        Ok(metadata) if metadata.is_dir() => {
            return Err(io::Error::new(io::ErrorKind::Other, "is a directory"))
        }
        Ok(_) => {
            fs::rename(&file.destination, &file.backup)?;
            true
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => false,
        Err(err) => return Err(err),
    };

    if let Err(err) = fs::rename(&file.staged, &file.destination) {
        if backed_up {
            let _ = fs::rename(&file.backup, &file.destination);
        }
        return Err(err);
    }

    Ok(backed_up)
}

/// Restores the directory to its state before [`commit`] started.
fn roll_back(installed: &[(&Staged, bool)]) {
    for (file, backed_up) in installed.iter().rev() {
        let _ = fs::remove_file(&file.destination);
        if *backed_up {
            let _ = fs::rename(&file.backup, &file.destination);
        }
    }
}

fn commit(staged: &[&Staged]) -> Result<(), SelectionError> {
    let mut installed = Vec::with_capacity(staged.len());

    for file in staged {
        match install(file) {
            Ok(backed_up) => installed.push((*file, backed_up)),
            Err(source) => {
                roll_back(&installed);
                return Err(output_error(&file.destination)(source));
            }
        }
    }

    for (file, backed_up) in installed {
        if backed_up {
            let _ = fs::remove_file(&file.backup);
        }
    }

    Ok(())
}

/// Writes the three selection artifacts into `directory`, replacing any from a
/// previous run. On failure the directory is left as it was found.
pub fn write_artifacts(
    result: &SelectionResult,
    directory: &Path,
    timestamp: DateTime<Utc>,
) -> Result<Artifacts, SelectionError> {
    let reference = Staged::new(directory, SELECTED_REFERENCE_FILENAME);
    let metadata = Staged::new(directory, REFERENCE_METADATA_FILENAME);
    let report = Staged::new(directory, SELECTION_REPORT_FILENAME);
    let all = [&reference, &metadata, &report];

    let outcome =
        stage(result, timestamp, &reference, &metadata, &report).and_then(|_| commit(&all));

    if outcome.is_err() {
        for file in all {
            let _ = fs::remove_file(&file.staged);
        }
    }
    outcome?;

    info!(
        "Wrote {}, {} and {} to {}.",
        SELECTED_REFERENCE_FILENAME,
        REFERENCE_METADATA_FILENAME,
        SELECTION_REPORT_FILENAME,
        directory.display()
    );

    Ok(Artifacts {
        reference: reference.destination,
        metadata: metadata.destination,
        report: report.destination,
    })
}
