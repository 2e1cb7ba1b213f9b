//! Sector allocation and per-sector performance comparison.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::portfolio::valuation::moic;
use crate::types::{InvestmentRecord, Money, Multiple, Percentage};

/// Share of current portfolio value held in one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    pub value: Money,
    /// Share of total current valuation (0-100)
    pub percentage: Percentage,
}

/// Invested capital versus current value for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorComparison {
    pub sector: String,
    pub total_invested: Money,
    pub current_value: Money,
    pub moic: Multiple,
    pub company_count: usize,
}

#[derive(Default)]
struct SectorTotals {
    invested: Money,
    value: Money,
    count: usize,
}

/// Groups by sector label. BTreeMap keeps the output sorted by label.
fn group_by_sector(records: &[InvestmentRecord]) -> BTreeMap<&str, SectorTotals> {
    let mut grouped: BTreeMap<&str, SectorTotals> = BTreeMap::new();
    for r in records {
        let entry = grouped.entry(r.sector.as_str()).or_default();
        entry.invested += r.amount_invested;
        entry.value += r.current_valuation;
        entry.count += 1;
    }
    grouped
}

/// Current valuation by sector with percentage shares, sorted by sector label.
///
/// Percentages sum to 100 (within float rounding) whenever the total is
/// non-zero; an all-zero portfolio yields all-zero percentages.
pub fn sector_allocation(records: &[InvestmentRecord]) -> Vec<SectorAllocation> {
    let grouped = group_by_sector(records);
    let total: Money = grouped.values().map(|t| t.value).sum();

    grouped
        .into_iter()
        .map(|(sector, totals)| {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (totals.value / total * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or(0.0)
            };
            SectorAllocation {
                sector: sector.to_string(),
                value: totals.value,
                percentage,
            }
        })
        .collect()
}

/// One row per distinct sector, sorted by sector label.
pub fn sector_comparison(records: &[InvestmentRecord]) -> Vec<SectorComparison> {
    group_by_sector(records)
        .into_iter()
        .map(|(sector, totals)| SectorComparison {
            sector: sector.to_string(),
            total_invested: totals.invested,
            current_value: totals.value,
            moic: moic(totals.invested, totals.value, Decimal::ZERO),
            company_count: totals.count,
        })
        .collect()
}
