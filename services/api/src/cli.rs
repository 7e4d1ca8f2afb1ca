use crate::demo::{run_check, run_demo, run_quote, CheckArgs, DemoArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use repair_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Repair Advisor",
    about = "Judge mechanic service recommendations and draft negotiation scripts",
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
    /// Check a single recommended service and print the negotiation script
    Check(CheckArgs),
    /// Score every line of a shop quote exported as CSV
    Quote(QuoteArgs),
    /// Walk through the demo garage end to end
    Demo(DemoArgs),
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
        Command::Check(args) => run_check(args),
        Command::Quote(args) => run_quote(args),
        Command::Demo(args) => run_demo(args),
    }
}
