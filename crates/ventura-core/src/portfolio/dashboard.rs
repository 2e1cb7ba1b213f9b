//! Fund dashboard: every component run once over the same snapshot.
//!
//! No component consumes another's output, only the shared snapshot, so they
//! may run in any order or concurrently. The partial views (`aum`,
//! `performance`, `history`) serve callers that need one panel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::{EngineConfig, SolverConfig};
use crate::portfolio::cash_flows::build_cash_flows;
use crate::portfolio::health::{classify_portfolio, PortfolioHealth};
use crate::portfolio::history::{project_history, HistoryPoint};
use crate::portfolio::parallel::maybe_join;
use crate::portfolio::sectors::{sector_allocation, sector_comparison, SectorAllocation, SectorComparison};
use crate::portfolio::timeline::{build_timeline, TimelineEvent};
use crate::portfolio::valuation::{summarize_valuation, ValuationSummary};
use crate::time_value::{xirr, SolverStatus, XirrOutcome};
use crate::types::{with_metadata, ComputationOutput, InvestmentRecord, Money, Multiple, Percentage};
use crate::validation::validate_snapshot;
use crate::VenturaResult;

/// A snapshot of investment records and the date it is valued at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInput {
    pub as_of: NaiveDate,
    pub records: Vec<InvestmentRecord>,
}

/// Assets under management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AumSummary {
    pub total_deployed: Money,
    pub current_valuation: Money,
    pub unrealized_gains: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Annualized IRR as a percentage (12.5 = 12.5%)
    pub irr: Percentage,
    pub irr_status: SolverStatus,
    pub irr_converged: bool,
    pub irr_iterations: u32,
    pub moic: Multiple,
    pub total_deployed: Money,
    pub current_value: Money,
    pub distributions: Money,
}

/// Reconstructed history, investment timeline and sector comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub portfolio_history: Vec<HistoryPoint>,
    pub investment_timeline: Vec<TimelineEvent>,
    pub sector_comparison: Vec<SectorComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub aum: AumSummary,
    pub performance: PerformanceSummary,
    pub sector_allocation: Vec<SectorAllocation>,
    pub portfolio_health: PortfolioHealth,
    pub portfolio_history: Vec<HistoryPoint>,
    pub investment_timeline: Vec<TimelineEvent>,
    pub sector_comparison: Vec<SectorComparison>,
}

impl From<&ValuationSummary> for AumSummary {
    fn from(v: &ValuationSummary) -> Self {
        AumSummary {
            total_deployed: v.total_deployed,
            current_valuation: v.current_valuation,
            unrealized_gains: v.unrealized_gains,
        }
    }
}

fn assemble_performance(valuation: &ValuationSummary, outcome: XirrOutcome) -> PerformanceSummary {
    PerformanceSummary {
        irr: outcome.rate * 100.0,
        irr_status: outcome.status,
        irr_converged: outcome.converged(),
        irr_iterations: outcome.iterations,
        moic: valuation.moic,
        total_deployed: valuation.total_deployed,
        current_value: valuation.current_valuation,
        distributions: valuation.distributions,
    }
}

fn portfolio_xirr(records: &[InvestmentRecord], as_of: NaiveDate, solver: &SolverConfig) -> XirrOutcome {
    xirr(&build_cash_flows(records, as_of), solver)
}

pub fn aum(records: &[InvestmentRecord]) -> AumSummary {
    AumSummary::from(&summarize_valuation(records))
}

pub fn performance(
    records: &[InvestmentRecord],
    as_of: NaiveDate,
    solver: &SolverConfig,
) -> PerformanceSummary {
    let valuation = summarize_valuation(records);
    assemble_performance(&valuation, portfolio_xirr(records, as_of, solver))
}

pub fn history(records: &[InvestmentRecord], as_of: NaiveDate) -> HistoryView {
    HistoryView {
        portfolio_history: project_history(records, as_of),
        investment_timeline: build_timeline(records),
        sector_comparison: sector_comparison(records),
    }
}

/// Computes every dashboard panel over one snapshot.
///
/// Pure and idempotent: the same snapshot, date and config always produce
/// the same metrics. Degenerate portfolios (empty, zero totals, no burn)
/// yield zeros and sentinels rather than errors.
pub fn compute_dashboard(
    records: &[InvestmentRecord],
    as_of: NaiveDate,
    config: &EngineConfig,
) -> DashboardMetrics {
    let n = records.len();
    tracing::debug!(records = n, %as_of, "computing dashboard");

    let ((valuation, outcome), (allocation, health)) = maybe_join(
        config,
        n,
        || {
            maybe_join(
                config,
                n,
                || summarize_valuation(records),
                || portfolio_xirr(records, as_of, &config.solver),
            )
        },
        || {
            maybe_join(
                config,
                n,
                || sector_allocation(records),
                || classify_portfolio(records, &config.health),
            )
        },
    );
    let (portfolio_history, (investment_timeline, comparison)) = maybe_join(
        config,
        n,
        || project_history(records, as_of),
        || maybe_join(config, n, || build_timeline(records), || sector_comparison(records)),
    );

    let metrics = DashboardMetrics {
        aum: AumSummary::from(&valuation),
        performance: assemble_performance(&valuation, outcome),
        sector_allocation: allocation,
        portfolio_health: health,
        portfolio_history,
        investment_timeline,
        sector_comparison: comparison,
    };
    tracing::debug!(
        records = n,
        irr = metrics.performance.irr,
        converged = metrics.performance.irr_converged,
        "dashboard computed"
    );
    metrics
}

/// Validates the snapshot, then computes the dashboard inside the standard
/// output envelope. A non-converged IRR is surfaced as a warning.
pub fn compute_dashboard_checked(
    input: &DashboardInput,
    config: &EngineConfig,
) -> VenturaResult<ComputationOutput<DashboardMetrics>> {
    let start = Instant::now();
    validate_snapshot(&input.records, input.as_of)?;

    let metrics = compute_dashboard(&input.records, input.as_of, config);

    let mut warnings: Vec<String> = Vec::new();
    if input.records.is_empty() {
        warnings.push("Snapshot contains no investments; all metrics are zero".into());
    }
    match metrics.performance.irr_status {
        SolverStatus::Converged => {}
        SolverStatus::InsufficientData => warnings.push(
            "IRR needs at least one investment, a non-zero current valuation and time elapsed \
             between investing and the valuation date; reported as 0"
                .into(),
        ),
        status => warnings.push(format!(
            "IRR did not converge ({}); the reported rate is not reliable",
            status.describe()
        )),
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Venture fund dashboard: XIRR (Newton-Raphson), MOIC, sector allocation, runway health, linear quarterly history",
        &serde_json::json!({
            "as_of": input.as_of.to_string(),
            "records": input.records.len(),
            "solver": config.solver,
            "health": config.health,
            "history": "linear interpolation from cost to current mark; synthetic, not historical",
        }),
        warnings,
        elapsed,
        metrics,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fixtures::{date, record};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let m = compute_dashboard(&[], date(2024, 1, 1), &EngineConfig::default());
        assert_eq!(m.aum.total_deployed, Decimal::ZERO);
        assert_eq!(m.performance.irr, 0.0);
        assert_eq!(m.performance.irr_status, SolverStatus::InsufficientData);
        assert_eq!(m.performance.moic, Decimal::ZERO);
        assert!(m.sector_allocation.is_empty());
        assert!(m.portfolio_history.is_empty());
        assert!(m.investment_timeline.is_empty());
    }

    #[test]
    fn test_single_company_ten_percent() {
        let records = vec![record("A", "SaaS", date(2020, 1, 1), dec!(100), dec!(121))];
        let m = compute_dashboard(&records, date(2022, 1, 1), &EngineConfig::default());
        assert!(m.performance.irr_converged);
        assert!((m.performance.irr - 10.0).abs() < 0.01, "got {}", m.performance.irr);
        assert_eq!(m.performance.moic, dec!(1.21));
        assert_eq!(m.aum.unrealized_gains, dec!(21));
    }

    #[test]
    fn test_partial_views_match_full_dashboard() {
        let records = vec![
            record("A", "SaaS", date(2021, 3, 1), dec!(100), dec!(180)),
            record("B", "AI", date(2022, 8, 1), dec!(200), dec!(150)),
        ];
        let as_of = date(2024, 2, 1);
        let config = EngineConfig::default();
        let full = compute_dashboard(&records, as_of, &config);

        assert_eq!(aum(&records), full.aum);
        assert_eq!(performance(&records, as_of, &config.solver), full.performance);
        let h = history(&records, as_of);
        assert_eq!(h.portfolio_history, full.portfolio_history);
        assert_eq!(h.investment_timeline, full.investment_timeline);
        assert_eq!(h.sector_comparison, full.sector_comparison);
    }

    #[test]
    fn test_checked_rejects_future_investment() {
        let input = DashboardInput {
            as_of: date(2024, 1, 1),
            records: vec![record("A", "SaaS", date(2024, 3, 1), dec!(100), dec!(100))],
        };
        assert!(compute_dashboard_checked(&input, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_checked_warns_when_everything_invested_today() {
        let as_of = date(2024, 1, 1);
        let input = DashboardInput {
            as_of,
            records: vec![record("A", "SaaS", as_of, dec!(100), dec!(100))],
        };
        let out = compute_dashboard_checked(&input, &EngineConfig::default()).unwrap();
        assert_eq!(out.result.performance.irr_status, SolverStatus::InsufficientData);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("time elapsed"), "got {}", out.warnings[0]);
    }

    #[test]
    fn test_checked_warns_on_empty() {
        let input = DashboardInput {
            as_of: date(2024, 1, 1),
            records: vec![],
        };
        let out = compute_dashboard_checked(&input, &EngineConfig::default()).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert!(out.result.portfolio_history.is_empty());
    }
}
