//! The five weighted criteria a candidate is scored against.
//!
//! Every criterion is a step function over the fields of a [`Candidate`]: a
//! metric either crosses a threshold and earns its points or it does not.
//! Points are recorded under fixed [`ScoreKey`]s so that a [`ScoreBreakdown`]
//! always carries the same thirteen keys, in the same order, with explicit
//! zeros.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::select::candidate::AssemblyLevel;
use crate::select::candidate::BreedClass;
use crate::select::candidate::Candidate;
use crate::select::candidate::SequencingTechnology;

/// Expected size of a sheep genome in base pairs.
pub const EXPECTED_GENOME_SIZE: f64 = 2.8e9;

/// The highest total score a candidate can reach.
pub const MAX_SCORE: u32 = 100;

//===========//
// Criterion //
//===========//

/// A weighted selection criterion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Contiguity of the assembly.
    AssemblyQuality,

    /// Gene space and chromosome completeness.
    Completeness,

    /// Gap content and agreement with the expected genome size.
    SequenceQuality,

    /// Annotation availability and curation of the source database.
    AnnotationMetadata,

    /// Breed, sequencing technology and recency.
    ReferenceSuitability,
}

impl Criterion {
    /// All criteria in reporting order.
    pub const ALL: [Criterion; 5] = [
        Criterion::AssemblyQuality,
        Criterion::Completeness,
        Criterion::SequenceQuality,
        Criterion::AnnotationMetadata,
        Criterion::ReferenceSuitability,
    ];

    /// The maximum number of points the criterion contributes to a total.
    pub fn weight(&self) -> u32 {
        match self {
            Criterion::AssemblyQuality => 25,
            Criterion::Completeness => 25,
            Criterion::SequenceQuality => 20,
            Criterion::AnnotationMetadata => 15,
            Criterion::ReferenceSuitability => 15,
        }
    }

    /// The snake case name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::AssemblyQuality => "assembly_quality",
            Criterion::Completeness => "completeness",
            Criterion::SequenceQuality => "sequence_quality",
            Criterion::AnnotationMetadata => "annotation_metadata",
            Criterion::ReferenceSuitability => "reference_suitability",
        }
    }

    /// A one line description of what the criterion rewards.
    pub fn description(&self) -> &'static str {
        match self {
            Criterion::AssemblyQuality => "Assembly level and scaffold N50",
            Criterion::Completeness => "BUSCO completeness and chromosome-level scaffolds",
            Criterion::SequenceQuality => "Gap content and size relative to 2.8 Gb",
            Criterion::AnnotationMetadata => "Annotation present and RefSeq source",
            Criterion::ReferenceSuitability => "Breed, sequencing technology and release year",
        }
    }

    /// The breakdown keys owned by this criterion.
    pub fn keys(&self) -> Vec<ScoreKey> {
        ScoreKey::ALL
            .into_iter()
            .filter(|key| key.criterion() == *self)
            .collect()
    }

    /// Scores a candidate against this criterion.
    pub fn score(&self, candidate: &Candidate) -> CriterionScore {
        match self {
            Criterion::AssemblyQuality => assembly_quality(candidate),
            Criterion::Completeness => completeness(candidate),
            Criterion::SequenceQuality => sequence_quality(candidate),
            Criterion::AnnotationMetadata => annotation_metadata(candidate),
            Criterion::ReferenceSuitability => reference_suitability(candidate),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

//===========//
// Score key //
//===========//

/// One of the thirteen fixed keys of a [`ScoreBreakdown`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKey {
    /// Points for the assembly level.
    AssemblyLevel,

    /// Points for scaffold N50.
    ScaffoldN50,

    /// Points for BUSCO completeness.
    BuscoCompleteness,

    /// Points for the number of chromosome-level scaffolds.
    ChromosomeScaffolds,

    /// Points for low `N` content.
    GapContent,

    /// Points for agreement with the expected genome size.
    SizeAccuracy,

    /// Points for an available annotation.
    Annotation,

    /// Points for RefSeq curation.
    RefseqSource,

    /// Points for a preferred breed.
    PreferredBreed,

    /// Points for any other recorded breed.
    OtherBreed,

    /// Points for long-read sequencing.
    LongReadTechnology,

    /// Points for short-read sequencing.
    ShortReadTechnology,

    /// Points for a recent release.
    ReleaseRecency,
}

impl ScoreKey {
    /// All keys in breakdown order.
    pub const ALL: [ScoreKey; 13] = [
        ScoreKey::AssemblyLevel,
        ScoreKey::ScaffoldN50,
        ScoreKey::BuscoCompleteness,
        ScoreKey::ChromosomeScaffolds,
        ScoreKey::GapContent,
        ScoreKey::SizeAccuracy,
        ScoreKey::Annotation,
        ScoreKey::RefseqSource,
        ScoreKey::PreferredBreed,
        ScoreKey::OtherBreed,
        ScoreKey::LongReadTechnology,
        ScoreKey::ShortReadTechnology,
        ScoreKey::ReleaseRecency,
    ];

    /// The snake case name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ScoreKey::AssemblyLevel => "assembly_level",
            ScoreKey::ScaffoldN50 => "scaffold_n50",
            ScoreKey::BuscoCompleteness => "busco_completeness",
            ScoreKey::ChromosomeScaffolds => "chromosome_scaffolds",
            ScoreKey::GapContent => "gap_content",
            ScoreKey::SizeAccuracy => "size_accuracy",
            ScoreKey::Annotation => "annotation",
            ScoreKey::RefseqSource => "refseq_source",
            ScoreKey::PreferredBreed => "preferred_breed",
            ScoreKey::OtherBreed => "other_breed",
            ScoreKey::LongReadTechnology => "long_read_technology",
            ScoreKey::ShortReadTechnology => "short_read_technology",
            ScoreKey::ReleaseRecency => "release_recency",
        }
    }

    /// The criterion this key contributes to.
    pub fn criterion(&self) -> Criterion {
        match self {
            ScoreKey::AssemblyLevel | ScoreKey::ScaffoldN50 => Criterion::AssemblyQuality,
            ScoreKey::BuscoCompleteness | ScoreKey::ChromosomeScaffolds => Criterion::Completeness,
            ScoreKey::GapContent | ScoreKey::SizeAccuracy => Criterion::SequenceQuality,
            ScoreKey::Annotation | ScoreKey::RefseqSource => Criterion::AnnotationMetadata,
            ScoreKey::PreferredBreed
            | ScoreKey::OtherBreed
            | ScoreKey::LongReadTechnology
            | ScoreKey::ShortReadTechnology
            | ScoreKey::ReleaseRecency => Criterion::ReferenceSuitability,
        }
    }

    /// The most points this key can award on its own.
    pub fn max_points(&self) -> u32 {
        match self {
            ScoreKey::AssemblyLevel => 15,
            ScoreKey::ScaffoldN50 => 10,
            ScoreKey::BuscoCompleteness => 20,
            ScoreKey::ChromosomeScaffolds => 5,
            ScoreKey::GapContent => 10,
            ScoreKey::SizeAccuracy => 10,
            ScoreKey::Annotation => 10,
            ScoreKey::RefseqSource => 5,
            ScoreKey::PreferredBreed => 8,
            ScoreKey::OtherBreed => 5,
            ScoreKey::LongReadTechnology => 4,
            ScoreKey::ShortReadTechnology => 2,
            ScoreKey::ReleaseRecency => 3,
        }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

//=================//
// Criterion score //
//=================//

/// The points a candidate earned for one criterion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CriterionScore {
    /// The criterion that was scored.
    pub criterion: Criterion,

    /// Points per breakdown key owned by the criterion.
    pub points: Vec<(ScoreKey, u32)>,
}

impl CriterionScore {
    /// The sum of all points for this criterion.
    pub fn total(&self) -> u32 {
        self.points.iter().map(|(_, points)| points).sum()
    }
}

//=================//
// Score breakdown //
//=================//

/// Points per [`ScoreKey`] for one candidate. All thirteen keys are always
/// present.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(IndexMap<ScoreKey, u32>);

impl Default for ScoreBreakdown {
    fn default() -> Self {
        ScoreBreakdown(ScoreKey::ALL.into_iter().map(|key| (key, 0)).collect())
    }
}

impl ScoreBreakdown {
    /// Assembles a breakdown from individual criterion scores. Keys that no
    /// score mentions stay at zero.
    pub fn from_criteria<'a>(scores: impl IntoIterator<Item = &'a CriterionScore>) -> Self {
        let mut breakdown = ScoreBreakdown::default();

        for score in scores {
            for (key, points) in &score.points {
                breakdown.0.insert(*key, *points);
            }
        }

        breakdown
    }

    /// Points awarded for a key.
    pub fn get(&self, key: ScoreKey) -> u32 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    /// Points awarded for a criterion.
    pub fn criterion_total(&self, criterion: Criterion) -> u32 {
        self.0
            .iter()
            .filter(|(key, _)| key.criterion() == criterion)
            .map(|(_, points)| points)
            .sum()
    }

    /// Points per criterion, in reporting order.
    pub fn criterion_totals(&self) -> IndexMap<Criterion, u32> {
        Criterion::ALL
            .into_iter()
            .map(|criterion| (criterion, self.criterion_total(criterion)))
            .collect()
    }

    /// The total score.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterates over keys and points in breakdown order.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreKey, u32)> + '_ {
        self.0.iter().map(|(key, points)| (*key, *points))
    }
}

/// Scores a candidate against every criterion.
pub fn score(candidate: &Candidate) -> ScoreBreakdown {
    let scores: Vec<CriterionScore> = Criterion::ALL
        .iter()
        .map(|criterion| criterion.score(candidate))
        .collect();

    ScoreBreakdown::from_criteria(&scores)
}

//===============================//
// Step functions per dimension  //
//===============================//

/// Points for the assembly level.
pub fn assembly_level_points(level: AssemblyLevel) -> u32 {
    match level {
        AssemblyLevel::Chromosome => 15,
        AssemblyLevel::Scaffold => 10,
        AssemblyLevel::Contig => 5,
        AssemblyLevel::Unknown => 0,
    }
}

/// Points for the scaffold N50.
pub fn scaffold_n50_points(n50: u64) -> u32 {
    match n50 {
        n if n >= 50_000_000 => 10,
        n if n >= 20_000_000 => 7,
        n if n >= 10_000_000 => 5,
        n if n >= 1_000_000 => 2,
        _ => 0,
    }
}

/// Points for BUSCO completeness.
pub fn busco_points(completeness: f64) -> u32 {
    match completeness {
        c if c >= 95.0 => 20,
        c if c >= 90.0 => 15,
        c if c >= 80.0 => 10,
        c if c >= 70.0 => 5,
        _ => 0,
    }
}

/// Points for the number of chromosome-level scaffolds. Sheep have 26
/// autosomes plus X.
pub fn chromosome_scaffold_points(count: u64) -> u32 {
    match count {
        c if c >= 27 => 5,
        c if c >= 20 => 3,
        c if c >= 15 => 1,
        _ => 0,
    }
}

/// Points for gap content.
pub fn gap_content_points(n_percentage: f64) -> u32 {
    match n_percentage {
        n if n <= 0.5 => 10,
        n if n <= 1.0 => 8,
        n if n <= 2.0 => 6,
        n if n <= 3.0 => 4,
        n if n <= 5.0 => 2,
        _ => 0,
    }
}

/// How close a total length is to [`EXPECTED_GENOME_SIZE`], from 0.0 (off by
/// the whole expected size or more) to 1.0 (exact).
pub fn size_accuracy(total_length: u64) -> f64 {
    let deviation = (total_length as f64 - EXPECTED_GENOME_SIZE).abs() / EXPECTED_GENOME_SIZE;
    (1.0 - deviation).max(0.0)
}

/// Points for size accuracy.
pub fn size_accuracy_points(total_length: u64) -> u32 {
    match size_accuracy(total_length) {
        a if a >= 0.95 => 10,
        a if a >= 0.90 => 8,
        a if a >= 0.85 => 6,
        a if a >= 0.80 => 4,
        _ => 0,
    }
}

/// Points for the release year. A missing year earns nothing.
pub fn release_year_points(year: Option<i32>) -> u32 {
    match year {
        Some(y) if y >= 2020 => 3,
        Some(y) if y >= 2015 => 2,
        Some(y) if y >= 2010 => 1,
        _ => 0,
    }
}

//===========//
// Criteria  //
//===========//

/// Assembly level and contiguity (max 25).
pub fn assembly_quality(candidate: &Candidate) -> CriterionScore {
    CriterionScore {
        criterion: Criterion::AssemblyQuality,
        points: vec![
            (
                ScoreKey::AssemblyLevel,
                assembly_level_points(candidate.assembly_level),
            ),
            (
                ScoreKey::ScaffoldN50,
                scaffold_n50_points(candidate.scaffold_n50),
            ),
        ],
    }
}

/// BUSCO completeness and chromosome-level scaffolds (max 25).
pub fn completeness(candidate: &Candidate) -> CriterionScore {
    CriterionScore {
        criterion: Criterion::Completeness,
        points: vec![
            (
                ScoreKey::BuscoCompleteness,
                busco_points(candidate.busco_completeness),
            ),
            (
                ScoreKey::ChromosomeScaffolds,
                chromosome_scaffold_points(candidate.chromosome_level_scaffold_count),
            ),
        ],
    }
}

/// Gap content and size accuracy (max 20).
pub fn sequence_quality(candidate: &Candidate) -> CriterionScore {
    CriterionScore {
        criterion: Criterion::SequenceQuality,
        points: vec![
            (
                ScoreKey::GapContent,
                gap_content_points(candidate.n_percentage),
            ),
            (
                ScoreKey::SizeAccuracy,
                size_accuracy_points(candidate.total_length),
            ),
        ],
    }
}

/// Annotation and source database (max 15).
pub fn annotation_metadata(candidate: &Candidate) -> CriterionScore {
    let annotation = if candidate.has_annotation { 10 } else { 0 };
    let refseq = if candidate.is_refseq() { 5 } else { 0 };

    CriterionScore {
        criterion: Criterion::AnnotationMetadata,
        points: vec![
            (ScoreKey::Annotation, annotation),
            (ScoreKey::RefseqSource, refseq),
        ],
    }
}

/// Breed, sequencing technology and recency (max 15).
pub fn reference_suitability(candidate: &Candidate) -> CriterionScore {
    let (preferred_breed, other_breed) = match candidate.breed_class() {
        BreedClass::Preferred => (8, 0),
        BreedClass::Other => (0, 5),
        BreedClass::Unspecified => (0, 0),
    };

    let (long_read, short_read) = match candidate.sequencing_technology() {
        SequencingTechnology::LongRead => (4, 0),
        SequencingTechnology::ShortRead => (0, 2),
        SequencingTechnology::Unspecified => (0, 0),
    };

    CriterionScore {
        criterion: Criterion::ReferenceSuitability,
        points: vec![
            (ScoreKey::PreferredBreed, preferred_breed),
            (ScoreKey::OtherBreed, other_breed),
            (ScoreKey::LongReadTechnology, long_read),
            (ScoreKey::ShortReadTechnology, short_read),
            (
                ScoreKey::ReleaseRecency,
                release_year_points(candidate.release_year),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect_candidate() -> Candidate {
        let mut candidate = Candidate::new("rambouillet", "rambouillet.fa");
        candidate.assembly_level = AssemblyLevel::Chromosome;
        candidate.scaffold_n50 = 60_000_000;
        candidate.busco_completeness = 96.0;
        candidate.chromosome_level_scaffold_count = 27;
        candidate.n_percentage = 0.3;
        candidate.total_length = 2_800_000_000;
        candidate.has_annotation = true;
        candidate.source_database = String::from("RefSeq");
        candidate.breed = Some(String::from("Rambouillet"));
        candidate.assembly_method = Some(String::from("PacBio HiFi"));
        candidate.release_year = Some(2021);
        candidate
    }

    #[test]
    fn test_perfect_candidate_scores_one_hundred() {
        let breakdown = score(&perfect_candidate());
        assert_eq!(breakdown.total(), 100);
        assert_eq!(breakdown.criterion_total(Criterion::AssemblyQuality), 25);
        assert_eq!(breakdown.criterion_total(Criterion::Completeness), 25);
        assert_eq!(breakdown.criterion_total(Criterion::SequenceQuality), 20);
        assert_eq!(breakdown.criterion_total(Criterion::AnnotationMetadata), 15);
        assert_eq!(breakdown.criterion_total(Criterion::ReferenceSuitability), 15);
    }

    #[test]
    fn test_empty_candidate_scores_two() {
        let breakdown = score(&Candidate::new("empty", "empty.fa"));
        assert_eq!(breakdown.total(), 2);
        assert_eq!(breakdown.get(ScoreKey::GapContent), 2);
        assert_eq!(breakdown.get(ScoreKey::SizeAccuracy), 0);
        assert_eq!(breakdown.criterion_total(Criterion::AssemblyQuality), 0);
        assert_eq!(breakdown.criterion_total(Criterion::Completeness), 0);
        assert_eq!(breakdown.criterion_total(Criterion::AnnotationMetadata), 0);
        assert_eq!(breakdown.criterion_total(Criterion::ReferenceSuitability), 0);
    }

    #[test]
    fn test_breakdown_always_has_every_key_in_order() {
        let breakdown = score(&Candidate::new("empty", "empty.fa"));
        let keys: Vec<ScoreKey> = breakdown.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ScoreKey::ALL.to_vec());

        let json = serde_json::to_value(&breakdown).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 13);
        assert_eq!(object["scaffold_n50"], 0);
        assert_eq!(object["gap_content"], 2);
        let names: Vec<&str> = object.keys().map(String::as_str).collect();
        let expected: Vec<&str> = ScoreKey::ALL.iter().map(ScoreKey::name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_suffolk_only_scores_breed_points() {
        let mut candidate = Candidate::new("suffolk", "suffolk.fa");
        candidate.breed = Some(String::from("Suffolk"));
        candidate.n_percentage = 100.0;

        let breakdown = score(&candidate);
        assert_eq!(breakdown.get(ScoreKey::PreferredBreed), 8);
        assert_eq!(breakdown.total(), 8);
    }

    #[test]
    fn test_assembly_quality_thresholds() {
        assert_eq!(scaffold_n50_points(50_000_000), 10);
        assert_eq!(scaffold_n50_points(49_999_999), 7);
        assert_eq!(scaffold_n50_points(20_000_000), 7);
        assert_eq!(scaffold_n50_points(10_000_000), 5);
        assert_eq!(scaffold_n50_points(1_000_000), 2);
        assert_eq!(scaffold_n50_points(999_999), 0);

        assert_eq!(assembly_level_points(AssemblyLevel::Chromosome), 15);
        assert_eq!(assembly_level_points(AssemblyLevel::Scaffold), 10);
        assert_eq!(assembly_level_points(AssemblyLevel::Contig), 5);
        assert_eq!(assembly_level_points(AssemblyLevel::Unknown), 0);
    }

    #[test]
    fn test_completeness_thresholds() {
        assert_eq!(busco_points(100.0), 20);
        assert_eq!(busco_points(95.0), 20);
        assert_eq!(busco_points(94.99), 15);
        assert_eq!(busco_points(90.0), 15);
        assert_eq!(busco_points(80.0), 10);
        assert_eq!(busco_points(70.0), 5);
        assert_eq!(busco_points(69.9), 0);

        assert_eq!(chromosome_scaffold_points(54), 5);
        assert_eq!(chromosome_scaffold_points(27), 5);
        assert_eq!(chromosome_scaffold_points(26), 3);
        assert_eq!(chromosome_scaffold_points(20), 3);
        assert_eq!(chromosome_scaffold_points(15), 1);
        assert_eq!(chromosome_scaffold_points(14), 0);
    }

    #[test]
    fn test_sequence_quality_thresholds() {
        assert_eq!(gap_content_points(0.0), 10);
        assert_eq!(gap_content_points(0.5), 10);
        assert_eq!(gap_content_points(0.51), 8);
        assert_eq!(gap_content_points(1.0), 8);
        assert_eq!(gap_content_points(2.0), 6);
        assert_eq!(gap_content_points(3.0), 4);
        assert_eq!(gap_content_points(5.0), 2);
        assert_eq!(gap_content_points(5.01), 0);

        assert_eq!(size_accuracy(0), 0.0);
        assert_eq!(size_accuracy(2_800_000_000), 1.0);
        assert_eq!(size_accuracy(6_000_000_000), 0.0);

        assert_eq!(size_accuracy_points(2_800_000_000), 10);
        assert_eq!(size_accuracy_points(2_700_000_000), 10);
        assert_eq!(size_accuracy_points(2_600_000_000), 8);
        assert_eq!(size_accuracy_points(3_150_000_000), 6);
        assert_eq!(size_accuracy_points(2_300_000_000), 4);
        assert_eq!(size_accuracy_points(2_000_000_000), 0);
        assert_eq!(size_accuracy_points(0), 0);
    }

    #[test]
    fn test_annotation_metadata() {
        let mut candidate = Candidate::new("s1", "s1.fa");
        assert_eq!(annotation_metadata(&candidate).total(), 0);

        candidate.has_annotation = true;
        assert_eq!(annotation_metadata(&candidate).total(), 10);

        candidate.source_database = String::from("SOURCE_DATABASE_REFSEQ");
        assert_eq!(annotation_metadata(&candidate).total(), 15);
    }

    #[test]
    fn test_reference_suitability() {
        let mut candidate = Candidate::new("s1", "s1.fa");
        candidate.breed = Some(String::from("Hu"));
        candidate.assembly_method = Some(String::from("Illumina HiSeq"));
        candidate.release_year = Some(2016);

        let score = reference_suitability(&candidate);
        assert_eq!(score.total(), 5 + 2 + 2);

        candidate.release_year = Some(2010);
        assert_eq!(reference_suitability(&candidate).total(), 5 + 2 + 1);

        candidate.release_year = Some(2009);
        assert_eq!(reference_suitability(&candidate).total(), 5 + 2);

        candidate.release_year = None;
        candidate.breed = None;
        candidate.assembly_method = None;
        assert_eq!(reference_suitability(&candidate).total(), 0);
    }

    #[test]
    fn test_criterion_scores_never_exceed_weights() {
        let levels = [
            AssemblyLevel::Chromosome,
            AssemblyLevel::Scaffold,
            AssemblyLevel::Contig,
            AssemblyLevel::Unknown,
        ];
        let breeds = [None, Some("Texel"), Some("Hu")];
        let methods = [None, Some("ONT + Illumina"), Some("Sanger")];

        for level in levels {
            for breed in breeds {
                for method in methods {
                    for busco in [0.0, 72.5, 91.0, 100.0] {
                        let mut candidate = perfect_candidate();
                        candidate.assembly_level = level;
                        candidate.breed = breed.map(String::from);
                        candidate.assembly_method = method.map(String::from);
                        candidate.busco_completeness = busco;

                        let breakdown = score(&candidate);
                        for criterion in Criterion::ALL {
                            assert!(breakdown.criterion_total(criterion) <= criterion.weight());
                        }
                        for (key, points) in breakdown.iter() {
                            assert!(points <= key.max_points());
                        }
                        assert!(breakdown.total() <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn test_busco_points_are_monotonic() {
        let mut last = 0;
        let mut completeness = 0.0;
        while completeness <= 100.0 {
            let points = busco_points(completeness);
            assert!(points >= last);
            last = points;
            completeness += 0.25;
        }
    }

    #[test]
    fn test_weights_sum_to_one_hundred() {
        let sum: u32 = Criterion::ALL.iter().map(Criterion::weight).sum();
        assert_eq!(sum, MAX_SCORE);

        for criterion in Criterion::ALL {
            let keys = criterion.keys();
            assert!(!keys.is_empty());
            assert!(keys.iter().all(|key| key.criterion() == criterion));
        }
    }
}
