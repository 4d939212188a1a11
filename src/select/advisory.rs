//! Non-fatal quality gates applied to every candidate.
//!
//! Advisories never change a score or exclude a candidate. They surface in the
//! selection report and in the logs so that a questionable reference can be
//! reviewed before graph construction.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::select::candidate::Candidate;
use crate::select::candidate::DocumentStatus;

/// Plausible total length of a sheep assembly, in base pairs.
pub const GENOME_SIZE_RANGE: RangeInclusive<u64> = 2_400_000_000..=3_200_000_000;

/// Highest acceptable `N` content, in percent.
pub const MAX_N_PERCENTAGE: f64 = 5.0;

/// Plausible GC content, in percent.
pub const GC_PERCENTAGE_RANGE: RangeInclusive<f64> = 35.0..=50.0;

/// Lowest acceptable BUSCO completeness, in percent.
pub const MIN_BUSCO_COMPLETENESS: f64 = 85.0;

/// A quality concern raised for a candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Total length is outside [`GENOME_SIZE_RANGE`].
    GenomeSizeOutOfRange,

    /// `N` content exceeds [`MAX_N_PERCENTAGE`].
    ExcessGapContent,

    /// GC content is outside [`GC_PERCENTAGE_RANGE`].
    GcContentOutOfRange,

    /// BUSCO completeness is below [`MIN_BUSCO_COMPLETENESS`].
    LowCompleteness,

    /// The statistics document was missing or malformed.
    MissingStatistics,

    /// The metadata document was missing or malformed.
    MissingMetadata,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::GenomeSizeOutOfRange => write!(f, "genome size outside 2.4-3.2 Gb"),
            Advisory::ExcessGapContent => write!(f, "N content above 5%"),
            Advisory::GcContentOutOfRange => write!(f, "GC content outside 35-50%"),
            Advisory::LowCompleteness => write!(f, "BUSCO completeness below 85%"),
            Advisory::MissingStatistics => write!(f, "statistics document missing or malformed"),
            Advisory::MissingMetadata => write!(f, "metadata document missing or malformed"),
        }
    }
}

/// Evaluates every quality gate against a candidate.
pub fn assess(candidate: &Candidate) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if candidate.provenance.statistics != DocumentStatus::Parsed {
        advisories.push(Advisory::MissingStatistics);
    }

    if candidate.provenance.metadata != DocumentStatus::Parsed {
        advisories.push(Advisory::MissingMetadata);
    }

    if !GENOME_SIZE_RANGE.contains(&candidate.total_length) {
        advisories.push(Advisory::GenomeSizeOutOfRange);
    }

    if candidate.n_percentage > MAX_N_PERCENTAGE {
        advisories.push(Advisory::ExcessGapContent);
    }

    if let Some(gc) = candidate.gc_percentage {
        if !GC_PERCENTAGE_RANGE.contains(&gc) {
            advisories.push(Advisory::GcContentOutOfRange);
        }
    }

    if candidate.busco_completeness < MIN_BUSCO_COMPLETENESS {
        advisories.push(Advisory::LowCompleteness);
    }

    advisories
}
