//! The typed record describing one genome assembly under evaluation.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Breeds that are well established as sheep reference assemblies. Matching
/// is case-insensitive and exact.
pub const PREFERRED_BREEDS: [&str; 5] = ["texel", "rambouillet", "dorset", "suffolk", "merino"];

/// Substrings of an assembly method that indicate long-read sequencing.
pub const LONG_READ_MARKERS: [&str; 4] = ["hifi", "pacbio", "nanopore", "ont"];

/// Substrings of an assembly method that indicate short-read sequencing.
pub const SHORT_READ_MARKERS: [&str; 2] = ["illumina", "sanger"];

/// Gap content assumed when the statistics document does not report one.
pub const DEFAULT_N_PERCENTAGE: f64 = 5.0;

//================//
// Assembly level //
//================//

/// The assembly level reported by the source database.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyLevel {
    /// Sequences are assembled into chromosomes.
    Chromosome,

    /// Sequences are assembled into scaffolds.
    Scaffold,

    /// Sequences are assembled into contigs only.
    Contig,

    /// The level was not reported or is not recognized.
    #[default]
    Unknown,
}

impl AssemblyLevel {
    /// Parses an assembly level as it appears in NCBI style metadata
    /// (`"Chromosome"`, `"Scaffold"`, `"Contig"`). Any other value, including
    /// `"Complete Genome"`, is [`AssemblyLevel::Unknown`].
    pub fn from_ncbi(value: &str) -> Self {
        let value = value.trim();

        if value.eq_ignore_ascii_case("chromosome") {
            AssemblyLevel::Chromosome
        } else if value.eq_ignore_ascii_case("scaffold") {
            AssemblyLevel::Scaffold
        } else if value.eq_ignore_ascii_case("contig") {
            AssemblyLevel::Contig
        } else {
            AssemblyLevel::Unknown
        }
    }
}

impl fmt::Display for AssemblyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyLevel::Chromosome => write!(f, "chromosome"),
            AssemblyLevel::Scaffold => write!(f, "scaffold"),
            AssemblyLevel::Contig => write!(f, "contig"),
            AssemblyLevel::Unknown => write!(f, "unknown"),
        }
    }
}

//=========================//
// Breed and technology    //
//=========================//

/// How the breed of a candidate relates to the preferred breed set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BreedClass {
    /// The breed is one of [`PREFERRED_BREEDS`].
    Preferred,

    /// A breed is recorded, but it is not a preferred one.
    Other,

    /// No breed is recorded.
    Unspecified,
}

/// The sequencing technology family implied by the assembly method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SequencingTechnology {
    /// PacBio HiFi/CLR or Oxford Nanopore.
    LongRead,

    /// Illumina or Sanger.
    ShortRead,

    /// Not recorded or not recognized.
    Unspecified,
}

//============================//
// Document parse provenance  //
//============================//

/// What happened when an upstream document was loaded.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// The document was read and parsed. Pre-extracted candidate records count
    /// as parsed.
    #[default]
    Parsed,

    /// No document was configured, or the file does not exist.
    Missing,

    /// The file exists but could not be read or is not valid JSON.
    Malformed,
}

/// Parse status of both documents a candidate was extracted from.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Provenance {
    /// Status of the statistics document.
    #[serde(default)]
    pub statistics: DocumentStatus,

    /// Status of the metadata document.
    #[serde(default)]
    pub metadata: DocumentStatus,
}

//===========//
// Candidate //
//===========//

fn default_n_percentage() -> f64 {
    DEFAULT_N_PERCENTAGE
}

/// A genome assembly competing to become the pangenome reference. All fields
/// are populated; absent upstream values have already been replaced by their
/// defaults.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Candidate {
    /// Sample identifier, unique within a selection run.
    pub sample_id: String,

    /// Path to the standardized FASTA file.
    pub genome_file: PathBuf,

    /// Database accession, if one was listed in the samplesheet.
    #[serde(default)]
    pub accession: Option<String>,

    /// Assembly level.
    #[serde(default)]
    pub assembly_level: AssemblyLevel,

    /// Scaffold N50 in base pairs.
    #[serde(default)]
    pub scaffold_n50: u64,

    /// Total assembly length in base pairs.
    #[serde(default)]
    pub total_length: u64,

    /// Percentage of `N` bases.
    #[serde(default = "default_n_percentage")]
    pub n_percentage: f64,

    /// Percentage of `G`/`C` bases, when reported.
    #[serde(default)]
    pub gc_percentage: Option<f64>,

    /// Percentage of complete BUSCO orthologs.
    #[serde(default)]
    pub busco_completeness: f64,

    /// Whether `busco_completeness` was estimated from chromosome completeness
    /// rather than reported by BUSCO.
    #[serde(default)]
    pub busco_estimated: bool,

    /// Number of scaffolds large enough to be whole chromosomes.
    #[serde(default)]
    pub chromosome_level_scaffold_count: u64,

    /// Whether the source database carries an annotation for the assembly.
    #[serde(default)]
    pub has_annotation: bool,

    /// Name of the database the assembly came from.
    #[serde(default)]
    pub source_database: String,

    /// Breed of the sequenced animal.
    #[serde(default)]
    pub breed: Option<String>,

    /// Free-text assembly method (sequencing technology and assembler).
    #[serde(default)]
    pub assembly_method: Option<String>,

    /// Year the assembly was released.
    #[serde(default)]
    pub release_year: Option<i32>,

    /// How the upstream documents were loaded.
    #[serde(default)]
    pub provenance: Provenance,
}

impl Candidate {
    /// Creates a new [`Candidate`] with every metric at its default value.
    pub fn new(sample_id: impl Into<String>, genome_file: impl Into<PathBuf>) -> Self {
        Candidate {
            sample_id: sample_id.into(),
            genome_file: genome_file.into(),
            accession: None,
            assembly_level: AssemblyLevel::Unknown,
            scaffold_n50: 0,
            total_length: 0,
            n_percentage: DEFAULT_N_PERCENTAGE,
            gc_percentage: None,
            busco_completeness: 0.0,
            busco_estimated: false,
            chromosome_level_scaffold_count: 0,
            has_annotation: false,
            source_database: String::new(),
            breed: None,
            assembly_method: None,
            release_year: None,
            provenance: Provenance::default(),
        }
    }

    /// Whether the source database is RefSeq (case-insensitive substring).
    pub fn is_refseq(&self) -> bool {
        self.source_database.to_ascii_uppercase().contains("REFSEQ")
    }

    /// Classifies the recorded breed against [`PREFERRED_BREEDS`].
    pub fn breed_class(&self) -> BreedClass {
        match self.breed.as_deref().map(str::trim) {
            None | Some("") => BreedClass::Unspecified,
            Some(breed) => {
                if PREFERRED_BREEDS
                    .iter()
                    .any(|preferred| breed.eq_ignore_ascii_case(preferred))
                {
                    BreedClass::Preferred
                } else {
                    BreedClass::Other
                }
            }
        }
    }

    /// Classifies the assembly method by sequencing technology. Long-read
    /// markers take precedence over short-read markers.
    pub fn sequencing_technology(&self) -> SequencingTechnology {
        let method = match &self.assembly_method {
            Some(method) => method.to_ascii_lowercase(),
            None => return SequencingTechnology::Unspecified,
        };

        if LONG_READ_MARKERS.iter().any(|m| method.contains(m)) {
            SequencingTechnology::LongRead
        } else if SHORT_READ_MARKERS.iter().any(|m| method.contains(m)) {
            SequencingTechnology::ShortRead
        } else {
            SequencingTechnology::Unspecified
        }
    }
}
