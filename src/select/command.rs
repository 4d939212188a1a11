//! Functionality relating to the `panref select` and `panref score`
//! subcommands themselves.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::select::candidate::Candidate;
use crate::select::criteria::MAX_SCORE;
use crate::select::extract;
use crate::select::rank;
use crate::select::rank::ScoredCandidate;
use crate::select::report;
use crate::select::report::CandidateReport;
use crate::select::report::Suitability;
use crate::select::samplesheet;
use crate::select::SelectionError;
use crate::utils::display::BasePairs;
use crate::utils::display::ScoreFormat;

//========================//
// Command line arguments //
//========================//

/// Arguments describing where the candidates come from.
#[derive(Args)]
pub struct CandidateInputArgs {
    /// Samplesheet (CSV with `sample`, `fasta`, `stats`, `metadata` and
    /// `accession` columns) or, with `--candidates`, a JSON array of
    /// pre-extracted candidate records.
    #[arg(value_name = "PATH")]
    src: PathBuf,

    /// Treat the input as a JSON array of candidate records.
    #[arg(long)]
    candidates: bool,

    /// Number of threads used to extract and score candidates. Defaults to
    /// the number of logical CPUs.
    #[arg(short = 't', long, value_name = "USIZE")]
    threads: Option<usize>,
}

/// Clap arguments for the `panref select` subcommand.
#[derive(Args)]
pub struct SelectArgs {
    #[command(flatten)]
    input: CandidateInputArgs,

    /// Directory to output files to. Defaults to current working directory.
    #[arg(short = 'o', long, value_name = "PATH")]
    output_directory: Option<PathBuf>,
}

/// Clap arguments for the `panref score` subcommand.
#[derive(Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    input: CandidateInputArgs,
}

//=================//
// Shared plumbing //
//=================//

fn thread_pool(threads: Option<usize>) -> anyhow::Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if let Some(n) = threads {
        debug!("  [*] Threads: {}", n);
        builder = builder.num_threads(n);
    }

    builder
        .build()
        .context("could not configure the thread pool")
}

/// Loads, extracts and scores every candidate named by the input arguments.
fn load_and_score(args: &CandidateInputArgs) -> anyhow::Result<Vec<ScoredCandidate>> {
    debug!("  [*] Source: {}", args.src.display());

    let pool = thread_pool(args.threads)?;
    let scored = pool.install(|| -> anyhow::Result<Vec<ScoredCandidate>> {
        let candidates: Vec<Candidate> = if args.candidates {
            samplesheet::read_candidates(&args.src)
                .with_context(|| format!("loading candidates from {}", args.src.display()))?
        } else {
            let sources = samplesheet::read_samplesheet(&args.src)
                .with_context(|| format!("loading samplesheet {}", args.src.display()))?;
            info!("Extracting metrics for {} candidate(s).", sources.len());
            extract::extract_all(&sources)
        };

        info!("Scoring {} candidate(s).", candidates.len());
        Ok(rank::score_all(candidates))
    })?;

    for s in &scored {
        for advisory in &s.advisories {
            warn!("[{}] {}", s.candidate.sample_id, advisory);
        }
    }

    Ok(scored)
}

//==================//
// `panref select`  //
//==================//

/// Main function for the `panref select` subcommand.
pub fn select(args: SelectArgs) -> anyhow::Result<()> {
    info!("Starting select command...");

    let output_directory = args.output_directory.unwrap_or_else(|| PathBuf::from("."));
    debug!("  [*] Output directory: {}", output_directory.display());

    let scored = load_and_score(&args.input)?;
    let result = rank::rank(scored)?;

    let selected = &result.selected;
    info!(
        "Selected {} as reference with a score of {} ({:?}).",
        selected.candidate.sample_id,
        ScoreFormat(selected.total_score(), MAX_SCORE),
        Suitability::from_score(selected.total_score())
    );
    info!(
        "  [*] {} assembly, N50 {}, total length {}.",
        selected.candidate.assembly_level,
        BasePairs(selected.candidate.scaffold_n50),
        BasePairs(selected.candidate.total_length)
    );
    for (i, alternative) in result.alternatives.iter().enumerate() {
        info!(
            "  [*] Alternative {}: {} ({}).",
            i + 1,
            alternative.candidate.sample_id,
            ScoreFormat(alternative.total_score(), MAX_SCORE)
        );
    }

    fs::create_dir_all(&output_directory).map_err(|source| SelectionError::Output {
        path: output_directory.clone(),
        source,
    })?;

    report::write_artifacts(&result, &output_directory, chrono::Utc::now())?;

    Ok(())
}

//=================//
// `panref score`  //
//=================//

/// Every candidate in rank order, as printed by `panref score`.
#[derive(Debug, Serialize)]
pub struct Ranking {
    /// How many candidates were ranked.
    pub total_candidates_evaluated: usize,

    /// Every candidate, best first.
    pub candidates: Vec<CandidateReport>,
}

impl Ranking {
    /// Creates a new [`Ranking`] from scored candidates in any order.
    pub fn new(scored: Vec<ScoredCandidate>) -> Self {
        let ranked = rank::rank_all(scored);

        Ranking {
            total_candidates_evaluated: ranked.len(),
            candidates: ranked
                .iter()
                .enumerate()
                .map(|(i, s)| CandidateReport::new(i + 1, s))
                .collect(),
        }
    }
}

/// Main function for the `panref score` subcommand.
pub fn score(args: ScoreArgs) -> anyhow::Result<()> {
    info!("Starting score command...");

    let scored = load_and_score(&args.input)?;
    if scored.is_empty() {
        return Err(SelectionError::NoCandidates.into());
    }

    let ranking = Ranking::new(scored);
    let output = serde_json::to_string_pretty(&ranking)?;
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_lists_every_candidate() {
        let mut suffolk = Candidate::new("suffolk", "suffolk.fa");
        suffolk.breed = Some(String::from("Suffolk"));

        let candidates: Vec<Candidate> = (0..6)
            .map(|i| Candidate::new(format!("s{}", i), format!("s{}.fa", i)))
            .chain(std::iter::once(suffolk))
            .collect();

        let ranking = Ranking::new(rank::score_all(candidates));
        assert_eq!(ranking.total_candidates_evaluated, 7);
        assert_eq!(ranking.candidates.len(), 7);
        assert_eq!(ranking.candidates[0].sample_id, "suffolk");
        assert_eq!(ranking.candidates[0].rank, 1);
        assert_eq!(ranking.candidates[1].sample_id, "s0");
        assert_eq!(ranking.candidates[6].sample_id, "s5");
        assert_eq!(ranking.candidates[6].rank, 7);
    }

    #[test]
    fn test_select_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("texel.fa"), ">1\nACGT\n").unwrap();
        fs::write(dir.path().join("hu.fa"), ">1\nTTTT\n").unwrap();
        fs::write(
            dir.path().join("texel.stats.json"),
            r#"{"assembly_metrics": {"scaffold_n50": 100000000},
                "sample_info": {"total_length": 2800000000},
                "nucleotide_composition": {"n_percentage": 0.1}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("texel.meta.json"),
            r#"{"assemblyInfo": {"assemblyLevel": "Chromosome"},
                "organism": {"infraspecificNames": {"breed": "Texel"}}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("samplesheet.csv"),
            "sample,fasta,stats,metadata\n\
             hu,hu.fa,,\n\
             texel,texel.fa,texel.stats.json,texel.meta.json\n",
        )
        .unwrap();

        let output = dir.path().join("results");
        let args = SelectArgs {
            input: CandidateInputArgs {
                src: dir.path().join("samplesheet.csv"),
                candidates: false,
                threads: None,
            },
            output_directory: Some(output.clone()),
        };

        select(args).unwrap();

        assert_eq!(
            fs::read_to_string(output.join(report::SELECTED_REFERENCE_FILENAME)).unwrap(),
            ">1\nACGT\n"
        );
        let metadata: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(output.join(report::REFERENCE_METADATA_FILENAME)).unwrap(),
        )
        .unwrap();
        // chromosome (15) + N50 (10) + gaps (10) + size (10) + Texel (8)
        assert_eq!(metadata["selected_reference"]["sample_id"], "texel");
        assert_eq!(metadata["selected_reference"]["selection_score"], 53);
        assert_eq!(metadata["pangenome_suitability"], "Adequate");
        assert!(output.join(report::SELECTION_REPORT_FILENAME).exists());
    }

    #[test]
    fn test_select_with_empty_samplesheet_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("samplesheet.csv"), "sample,fasta\n").unwrap();

        let output = dir.path().join("results");
        let args = SelectArgs {
            input: CandidateInputArgs {
                src: dir.path().join("samplesheet.csv"),
                candidates: false,
                threads: None,
            },
            output_directory: Some(output.clone()),
        };

        let err = select(args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SelectionError>(),
            Some(SelectionError::NoCandidates)
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_select_from_candidates_file_twice() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("genomes")).unwrap();
        fs::write(dir.path().join("genomes").join("texel.fa"), ">1\nACGT\n").unwrap();
        fs::write(
            dir.path().join("candidates.json"),
            r#"[{"sample_id": "texel", "genome_file": "genomes/texel.fa",
                 "assembly_level": "chromosome", "n_percentage": 0.1}]"#,
        )
        .unwrap();

        let output = dir.path().join("results");
        for _ in 0..2 {
            let args = SelectArgs {
                input: CandidateInputArgs {
                    src: dir.path().join("candidates.json"),
                    candidates: true,
                    threads: Some(2),
                },
                output_directory: Some(output.clone()),
            };

            select(args).unwrap();
        }

        assert_eq!(
            fs::read_to_string(output.join(report::SELECTED_REFERENCE_FILENAME)).unwrap(),
            ">1\nACGT\n"
        );
    }

    #[test]
    fn test_candidates_file_with_invalid_percentage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("candidates.json"),
            r#"[{"sample_id": "hu", "genome_file": "hu.fa", "n_percentage": -40.0}]"#,
        )
        .unwrap();

        let args = ScoreArgs {
            input: CandidateInputArgs {
                src: dir.path().join("candidates.json"),
                candidates: true,
                threads: None,
            },
        };

        let err = score(args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<samplesheet::SamplesheetError>(),
            Some(samplesheet::SamplesheetError::InvalidValue { field: "n_percentage", .. })
        ));
    }
}
