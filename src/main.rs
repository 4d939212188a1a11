use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

mod errors;

use git_testament::{git_testament, render_testament};
use panref::list;
use panref::select;

git_testament!(TESTAMENT);

/// Chooses the reference genome of a sheep pangenome graph.
#[derive(Parser)]
#[command(name = "panref", propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Subcommands,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Subcommands {
    /// Selects the reference genome and writes the selection artifacts.
    Select(select::command::SelectArgs),

    /// Scores and ranks every candidate without writing any files.
    Score(select::command::ScoreArgs),

    /// Lists the criteria, breakdown keys, preferred breeds or sequencing
    /// technologies used for scoring.
    List(list::command::ListArgs),
}

fn main() {
    let version = render_testament!(TESTAMENT);

    let matches = Cli::command().version(version).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let result = match cli.command {
        Subcommands::Select(args) => select::command::select(args),
        Subcommands::Score(args) => select::command::score(args),
        Subcommands::List(args) => list::command::list(args),
    };

    if let Err(err) = result {
        let code = errors::ExitCode::from(&err);
        errors::exit(format!("{:#}", err), code);
    }
}
