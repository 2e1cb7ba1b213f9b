use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use ventura_core::{xirr, CashFlowEvent, SolverConfig};

use crate::input;

/// Arguments for an ad hoc XIRR solve
#[derive(Args)]
pub struct XirrArgs {
    /// Path to JSON array of {"date": "YYYY-MM-DD", "amount": "..."} flows
    #[arg(long)]
    pub input: Option<String>,

    /// Dated flows, comma-separated DATE:AMOUNT (e.g. "2021-01-01:-100,2023-01-01:121")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_flow)]
    pub flows: Option<Vec<CashFlowEvent>>,

    /// Convergence tolerance on |NPV|
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Iteration cap
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Starting rate (0.10 = 10%)
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Option<f64>,
}

fn parse_flow(s: &str) -> Result<CashFlowEvent, String> {
    let (date, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("expected DATE:AMOUNT, got '{s}'"))?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("bad date '{date}': {e}"))?;
    let amount = Decimal::from_str(amount.trim()).map_err(|e| format!("bad amount '{amount}': {e}"))?;
    Ok(CashFlowEvent::new(date, amount))
}

pub fn run_xirr(args: XirrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let flows: Vec<CashFlowEvent> = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(flows) = args.flows {
        flows
    } else if let Some(flows) = input::stdin::read_stdin()? {
        flows
    } else {
        return Err("--flows, --input <file.json> or stdin required".into());
    };

    let defaults = SolverConfig::default();
    let config = SolverConfig {
        epsilon: args.epsilon.unwrap_or(defaults.epsilon),
        max_iterations: args.max_iterations.unwrap_or(defaults.max_iterations),
        initial_guess: args.guess.unwrap_or(defaults.initial_guess),
    };

    let outcome = xirr(&flows, &config);
    Ok(serde_json::json!({
        "irr": outcome.rate * 100.0,
        "rate": outcome.rate,
        "status": outcome.status,
        "converged": outcome.converged(),
        "iterations": outcome.iterations,
        "flows": flows.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_flow() {
        let cf = parse_flow("2021-01-01:-100.50").unwrap();
        assert_eq!(cf.date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(cf.amount, dec!(-100.50));
    }

    #[test]
    fn test_parse_flow_rejects_missing_amount() {
        assert!(parse_flow("2021-01-01").is_err());
        assert!(parse_flow("yesterday:5").is_err());
    }
}
