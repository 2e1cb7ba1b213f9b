use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use ventura_core::portfolio::dashboard;
use ventura_core::portfolio::health::classify_portfolio;
use ventura_core::portfolio::sectors::sector_allocation;
use ventura_core::validation::validate_snapshot;
use ventura_core::{compute_dashboard_checked, DashboardInput, EngineConfig};

use crate::input;

/// Where to read the portfolio snapshot from, and how to value it
#[derive(Args)]
pub struct SnapshotArgs {
    /// Path to JSON snapshot: {"asOf": ..., "records": [...]} or a bare array of records
    #[arg(long)]
    pub input: Option<String>,

    /// Path to CSV snapshot, one record per row with camelCase headers
    #[arg(long, conflicts_with = "input")]
    pub csv: Option<String>,

    /// Valuation date (YYYY-MM-DD); defaults to the snapshot's asOf, then today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Engine config file (.json, .yaml or .yml)
    #[arg(long)]
    pub config: Option<String>,

    /// XIRR convergence tolerance on |NPV|
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// XIRR iteration cap
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// XIRR starting rate (0.10 = 10%)
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Option<f64>,
}

fn load(args: &SnapshotArgs) -> Result<(DashboardInput, EngineConfig), Box<dyn std::error::Error>> {
    let snapshot: input::Snapshot = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(ref path) = args.csv {
        input::Snapshot::Records(input::csv_in::read_records(path)?)
    } else if let Some(snapshot) = input::stdin::read_stdin()? {
        snapshot
    } else {
        return Err("--input <file.json>, --csv <file.csv> or stdin required".into());
    };
    let snapshot = snapshot.into_input(args.as_of);

    let mut config = match args.config {
        Some(ref path) => input::file::read_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(epsilon) = args.epsilon {
        config = config.with_epsilon(epsilon);
    }
    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(guess) = args.guess {
        config = config.with_initial_guess(guess);
    }

    tracing::debug!(
        records = snapshot.records.len(),
        as_of = %snapshot.as_of,
        "snapshot loaded"
    );
    Ok((snapshot, config))
}

/// Load and validate; the partial views skip the envelope so validate here.
fn load_valid(args: &SnapshotArgs) -> Result<(DashboardInput, EngineConfig), Box<dyn std::error::Error>> {
    let (snapshot, config) = load(args)?;
    validate_snapshot(&snapshot.records, snapshot.as_of)?;
    Ok((snapshot, config))
}

pub fn run_dashboard(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (snapshot, config) = load(&args)?;
    let result = compute_dashboard_checked(&snapshot, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_aum(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (snapshot, _) = load_valid(&args)?;
    Ok(serde_json::to_value(dashboard::aum(&snapshot.records))?)
}

pub fn run_performance(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (snapshot, config) = load_valid(&args)?;
    let result = dashboard::performance(&snapshot.records, snapshot.as_of, &config.solver);
    Ok(serde_json::to_value(result)?)
}

pub fn run_sectors(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (snapshot, _) = load_valid(&args)?;
    Ok(serde_json::to_value(sector_allocation(&snapshot.records))?)
}

pub fn run_health(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (snapshot, config) = load_valid(&args)?;
    let health = classify_portfolio(&snapshot.records, &config.health);
    Ok(serde_json::to_value(health)?)
}

pub fn run_history(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (snapshot, _) = load_valid(&args)?;
    Ok(serde_json::to_value(dashboard::history(
        &snapshot.records,
        snapshot.as_of,
    ))?)
}
