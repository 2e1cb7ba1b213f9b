use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amounts. Always Decimal, never f64.
pub type Money = Decimal;

/// Multiples (e.g., 2.5x MOIC)
pub type Multiple = Decimal;

/// Percentages for display (12.5 = 12.5%). Not rates.
pub type Percentage = f64;

/// A single portfolio company position as supplied by the portfolio store.
///
/// Read-only to the engine: every derived figure (runway, health, estimated
/// history) is computed into a new value and never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Company name
    pub name: String,
    /// Free-form sector label (SaaS, Fintech, AI, ...)
    pub sector: String,
    /// Round the fund entered at (Seed, Series A, ...)
    pub round_stage: String,
    /// Date the capital was deployed
    pub invested_at: NaiveDate,
    /// Capital deployed
    pub amount_invested: Money,
    /// Latest mark
    pub current_valuation: Money,
    #[serde(default)]
    pub cash_remaining: Money,
    #[serde(default)]
    pub monthly_burn_rate: Money,
    #[serde(default)]
    pub monthly_revenue: Money,
}

/// A single dated, signed capital movement fed to the rate solver.
/// Negative for capital deployed, positive for value returned or marked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEvent {
    pub date: NaiveDate,
    pub amount: Money,
}

impl CashFlowEvent {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit (currency), f64 (rate solver)".to_string(),
        },
    }
}
