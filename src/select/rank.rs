//! Ordering scored candidates and choosing the reference.

use std::cmp::Reverse;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::select::advisory;
use crate::select::advisory::Advisory;
use crate::select::candidate::Candidate;
use crate::select::criteria;
use crate::select::criteria::ScoreBreakdown;
use crate::select::SelectionError;

/// The most runners-up a [`SelectionResult`] carries.
pub const MAX_ALTERNATIVES: usize = 4;

/// A candidate together with its scores.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredCandidate {
    /// Position of the candidate in the input. Breaks ties between equal
    /// totals: the earlier candidate ranks higher.
    pub original_index: usize,

    /// The candidate itself.
    pub candidate: Candidate,

    /// Points per breakdown key.
    pub breakdown: ScoreBreakdown,

    /// Quality gates the candidate failed.
    pub advisories: Vec<Advisory>,
}

impl ScoredCandidate {
    /// Scores a candidate found at `original_index` in the input.
    pub fn new(original_index: usize, candidate: Candidate) -> Self {
        let breakdown = criteria::score(&candidate);
        let advisories = advisory::assess(&candidate);

        debug!(
            "[{}] scored {} ({:?}).",
            candidate.sample_id,
            breakdown.total(),
            breakdown.criterion_totals()
        );

        ScoredCandidate {
            original_index,
            candidate,
            breakdown,
            advisories,
        }
    }

    /// The total score.
    pub fn total_score(&self) -> u32 {
        self.breakdown.total()
    }
}

/// The outcome of a selection run.
#[derive(Clone, Debug)]
pub struct SelectionResult {
    /// The chosen reference.
    pub selected: ScoredCandidate,

    /// Up to [`MAX_ALTERNATIVES`] runners-up, best first.
    pub alternatives: Vec<ScoredCandidate>,

    /// How many candidates were ranked.
    pub total_candidates_evaluated: usize,
}

/// Scores every candidate in parallel. Each result carries the position of its
/// candidate in `candidates`.
pub fn score_all(candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
    candidates
        .into_par_iter()
        .enumerate()
        .map(|(i, candidate)| ScoredCandidate::new(i, candidate))
        .collect()
}

/// Orders candidates by descending total score, then by ascending input
/// position.
pub fn rank_all(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by_key(|s| (Reverse(s.total_score()), s.original_index));
    scored
}

/// Chooses the reference from a set of scored candidates.
pub fn rank(scored: Vec<ScoredCandidate>) -> Result<SelectionResult, SelectionError> {
    let total_candidates_evaluated = scored.len();
    let mut ranked = rank_all(scored).into_iter();

    let selected = ranked.next().ok_or(SelectionError::NoCandidates)?;
    let alternatives: Vec<ScoredCandidate> = ranked.take(MAX_ALTERNATIVES).collect();

    Ok(SelectionResult {
        selected,
        alternatives,
        total_candidates_evaluated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::candidate::AssemblyLevel;

    /// Builds a candidate scoring exactly 70: chromosome level (15), N50 of
    /// 60 Mb (10), BUSCO 96 (20), 27 chromosome scaffolds (5), no gaps (10) and
    /// the expected size (10).
    fn seventy(sample_id: &str) -> Candidate {
        let mut candidate = Candidate::new(sample_id, format!("{}.fa", sample_id));
        candidate.assembly_level = AssemblyLevel::Chromosome;
        candidate.scaffold_n50 = 60_000_000;
        candidate.busco_completeness = 96.0;
        candidate.chromosome_level_scaffold_count = 27;
        candidate.n_percentage = 0.0;
        candidate.total_length = 2_800_000_000;
        candidate
    }

    fn with_breed(sample_id: &str, breed: &str) -> Candidate {
        let mut candidate = Candidate::new(sample_id, format!("{}.fa", sample_id));
        candidate.breed = Some(breed.to_string());
        candidate
    }

    fn ids(candidates: &[ScoredCandidate]) -> Vec<&str> {
        candidates
            .iter()
            .map(|s| s.candidate.sample_id.as_str())
            .collect()
    }

    #[test]
    fn test_empty_candidate_set_fails() {
        let err = rank(score_all(Vec::new())).unwrap_err();
        assert!(matches!(err, SelectionError::NoCandidates));
    }

    #[test]
    fn test_single_candidate_has_no_alternatives() {
        let result = rank(score_all(vec![Candidate::new("only", "only.fa")])).unwrap();
        assert_eq!(result.selected.candidate.sample_id, "only");
        assert_eq!(result.selected.total_score(), 2);
        assert!(result.alternatives.is_empty());
        assert_eq!(result.total_candidates_evaluated, 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let scored = score_all(vec![seventy("first"), seventy("second")]);
        assert_eq!(scored[0].total_score(), 70);
        assert_eq!(scored[1].total_score(), 70);

        let result = rank(scored).unwrap();
        assert_eq!(result.selected.candidate.sample_id, "first");
        assert_eq!(ids(&result.alternatives), vec!["second"]);
    }

    #[test]
    fn test_ranking_orders_by_score() {
        let candidates = vec![
            with_breed("hu", "Hu"),
            seventy("texel"),
            with_breed("suffolk", "Suffolk"),
            Candidate::new("empty", "empty.fa"),
        ];

        let result = rank(score_all(candidates)).unwrap();
        assert_eq!(result.selected.candidate.sample_id, "texel");
        assert_eq!(ids(&result.alternatives), vec!["suffolk", "hu", "empty"]);
        assert_eq!(result.total_candidates_evaluated, 4);

        let mut last = result.selected.total_score();
        for alternative in &result.alternatives {
            assert!(alternative.total_score() <= last);
            last = alternative.total_score();
        }
    }

    #[test]
    fn test_alternatives_are_bounded() {
        for n in 1..=8 {
            let candidates: Vec<Candidate> = (0..n)
                .map(|i| Candidate::new(format!("s{}", i), format!("s{}.fa", i)))
                .collect();
            let result = rank(score_all(candidates)).unwrap();
            assert_eq!(result.alternatives.len(), (n - 1).min(MAX_ALTERNATIVES));
            assert_eq!(result.total_candidates_evaluated, n);
        }
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let candidates: Vec<Candidate> = (0..64)
            .map(|i| match i % 3 {
                0 => seventy(&format!("s{}", i)),
                1 => with_breed(&format!("s{}", i), "Merino"),
                _ => Candidate::new(format!("s{}", i), format!("s{}.fa", i)),
            })
            .collect();

        let first = rank(score_all(candidates.clone())).unwrap();
        for _ in 0..10 {
            let again = rank(score_all(candidates.clone())).unwrap();
            assert_eq!(
                again.selected.candidate.sample_id,
                first.selected.candidate.sample_id
            );
            assert_eq!(ids(&again.alternatives), ids(&first.alternatives));
        }

        assert_eq!(first.selected.candidate.sample_id, "s0");
        assert_eq!(ids(&first.alternatives), vec!["s3", "s6", "s9", "s12"]);
    }

    #[test]
    fn test_rank_all_keeps_every_candidate() {
        let ranked = rank_all(score_all(vec![
            Candidate::new("a", "a.fa"),
            seventy("b"),
            Candidate::new("c", "c.fa"),
        ]));
        assert_eq!(ids(&ranked), vec!["b", "a", "c"]);
        assert_eq!(ranked[1].original_index, 0);
        assert_eq!(ranked[2].original_index, 2);
    }
}
