use crate::demo::{run_catalog, run_series, SeriesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pop_atlas::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Population Indicator Dashboard",
    about = "Serve and inspect the curated population indicator catalog from the command line",
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
    /// Print the indicator and geography allowlists
    Catalog,
    /// Fetch one series from the in-process data source and print it
    Series(SeriesArgs),
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
        Command::Catalog => run_catalog(),
        Command::Series(args) => run_series(args),
    }
}
