use crate::commands::{run_compare, run_parse, run_report, CompareArgs, ParseArgs, ReportArgs};
use crate::server;
use assessment_core::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Dashboard",
    about = "Parse detailed answers and score assessment results from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a respondent's results for a categories + submissions bundle
    Report(ReportArgs),
    /// Compare employees or companies found in a bundle
    Compare(CompareArgs),
    /// Parse a raw detailed-answers payload into question/answer pairs
    Parse(ParseArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Compare(args) => run_compare(args),
        Command::Parse(args) => run_parse(args),
    }
}
