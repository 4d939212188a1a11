use std::fmt::Display;

use panref::select::SelectionError;
use tracing::error;

/// Process exit codes for the `panref` binary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitCode {
    /// Indicates that invalid data was supplied to the given subcommand.
    InvalidInputData = 1,

    /// Indicates that there were no candidates to select from.
    NoCandidates = 2,

    /// Indicates that the selection artifacts could not be written.
    CannotWriteOutput = 3,
}

impl From<&anyhow::Error> for ExitCode {
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<SelectionError>() {
            Some(SelectionError::NoCandidates) => ExitCode::NoCandidates,
            Some(SelectionError::CopyGenome { .. }) | Some(SelectionError::Output { .. }) => {
                ExitCode::CannotWriteOutput
            }
            None => ExitCode::InvalidInputData,
        }
    }
}

pub fn exit<I>(message: I, code: ExitCode) -> !
where
    I: Display,
{
    error!("{}", message);
    std::process::exit(code as i32);
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use anyhow::Context;

    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = anyhow::Error::from(SelectionError::NoCandidates);
        assert_eq!(ExitCode::from(&err), ExitCode::NoCandidates);

        let err = anyhow::Error::from(SelectionError::Output {
            path: PathBuf::from("out/reference_metadata.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(ExitCode::from(&err), ExitCode::CannotWriteOutput);

        let err: anyhow::Result<()> = Err(SelectionError::NoCandidates).context("selecting");
        assert_eq!(ExitCode::from(&err.unwrap_err()), ExitCode::NoCandidates);

        let err = anyhow::anyhow!("samplesheet is missing required column `fasta`");
        assert_eq!(ExitCode::from(&err), ExitCode::InvalidInputData);
    }
}
