mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::dashboard::SnapshotArgs;
use commands::xirr::XirrArgs;

/// Venture fund portfolio analytics
#[derive(Parser)]
#[command(
    name = "ventura",
    version,
    about = "Venture fund portfolio analytics",
    long_about = "Computes fund-level metrics from a snapshot of investment records: \
                  XIRR, MOIC, AUM, sector allocation, runway health, a synthetic \
                  quarterly history and the investment timeline. Currency amounts \
                  use decimal precision throughout."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log solver and aggregation details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Every dashboard panel in one result
    Dashboard(SnapshotArgs),
    /// Assets under management: deployed, current valuation, unrealized gains
    Aum(SnapshotArgs),
    /// Fund IRR and MOIC
    Performance(SnapshotArgs),
    /// Current valuation by sector with percentage shares
    Sectors(SnapshotArgs),
    /// Companies bucketed green / yellow / red by cash runway
    Health(SnapshotArgs),
    /// Quarterly history, investment timeline and sector comparison
    History(SnapshotArgs),
    /// Solve XIRR for an ad hoc list of dated cash flows
    Xirr(XirrArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args),
        Commands::Aum(args) => commands::dashboard::run_aum(args),
        Commands::Performance(args) => commands::dashboard::run_performance(args),
        Commands::Sectors(args) => commands::dashboard::run_sectors(args),
        Commands::Health(args) => commands::dashboard::run_health(args),
        Commands::History(args) => commands::dashboard::run_history(args),
        Commands::Xirr(args) => commands::xirr::run_xirr(args),
        Commands::Version => {
            println!("ventura {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
