//! Functionality related to the `panref select` and `panref score`
//! subcommands: scoring candidate assemblies and choosing the pangenome
//! reference.

pub mod advisory;
pub mod candidate;
pub mod command;
pub mod criteria;
pub mod extract;
pub mod rank;
pub mod report;
pub mod samplesheet;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The fatal outcomes of a selection run.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// There was nothing to select from.
    #[error("no eligible candidates: the candidate set is empty")]
    NoCandidates,

    /// The winning genome could not be copied into the output directory.
    #[error(
        "cannot write output {}: failed to copy genome {}: {}",
        .to.display(),
        .from.display(),
        .source
    )]
    CopyGenome {
        /// The genome file of the selected candidate.
        from: PathBuf,

        /// The destination of the copy.
        to: PathBuf,

        /// The underlying I/O error.
        source: io::Error,
    },

    /// A report document could not be written.
    #[error("cannot write output {}: {}", .path.display(), .source)]
    Output {
        /// The file that could not be written.
        path: PathBuf,

        /// The underlying I/O error.
        source: io::Error,
    },
}
