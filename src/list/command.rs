//! Functionality related to the `panref list` command itself.

use anyhow::bail;
use clap::{builder::PossibleValuesParser, Args};
use itertools::Itertools;
use prettytable::{row, Table};

use crate::select::candidate::{LONG_READ_MARKERS, PREFERRED_BREEDS, SHORT_READ_MARKERS};
use crate::select::criteria::{Criterion, ScoreKey};

//========================//
// Command-line arguments //
//========================//

/// Command line arguments for `panref list`.
#[derive(Args)]
pub struct ListArgs {
    /// The subject which you want to list values for.
    #[arg(value_parser = PossibleValuesParser::new(["criteria", "keys", "breeds", "technologies"]))]
    subject: String,
}

//==============//
// Main command //
//==============//

/// Main method for the `panref list` subcommand.
pub fn list(args: ListArgs) -> anyhow::Result<()> {
    match args.subject.as_str() {
        "criteria" => {
            let mut table = Table::new();

            table.add_row(row!["Criterion", "Weight", "Keys", "Description"]);
            for criterion in Criterion::ALL {
                table.add_row(row![
                    criterion.name(),
                    criterion.weight(),
                    criterion.keys().iter().map(ScoreKey::name).join(", "),
                    criterion.description(),
                ]);
            }

            table.printstd();

            Ok(())
        }
        "keys" => {
            let mut table = Table::new();

            table.add_row(row!["Key", "Criterion", "Max Points"]);
            for key in ScoreKey::ALL {
                table.add_row(row![key.name(), key.criterion().name(), key.max_points()]);
            }

            table.printstd();

            Ok(())
        }
        "breeds" => {
            let mut table = Table::new();

            table.add_row(row!["Preferred Breed"]);
            for breed in PREFERRED_BREEDS {
                table.add_row(row![breed]);
            }

            table.printstd();

            Ok(())
        }
        "technologies" => {
            let mut table = Table::new();

            table.add_row(row!["Technology", "Markers", "Points"]);
            table.add_row(row![
                "Long read",
                LONG_READ_MARKERS.iter().join(", "),
                ScoreKey::LongReadTechnology.max_points()
            ]);
            table.add_row(row![
                "Short read",
                SHORT_READ_MARKERS.iter().join(", "),
                ScoreKey::ShortReadTechnology.max_points()
            ]);

            table.printstd();

            Ok(())
        }
        s => bail!("Unsupported subject: {}", s),
    }
}
