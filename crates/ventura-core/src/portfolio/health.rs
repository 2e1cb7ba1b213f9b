//! Cash runway and the green / yellow / red health classification.
//!
//! Runway and status are derived fresh from each record on every call.
//! Burn and cash figures move between snapshots, so nothing is cached and
//! the input record is never touched.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::HealthThresholds;
use crate::types::{InvestmentRecord, Money};

/// Wire value standing in for an unbounded runway.
pub const UNBOUNDED_RUNWAY_MONTHS: i64 = 999;

/// Months of operation left at the current burn.
///
/// Serialized as a bare integer; [`Runway::Unbounded`] becomes
/// [`UNBOUNDED_RUNWAY_MONTHS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Runway {
    Months(i64),
    /// No burn: the company is not consuming cash.
    Unbounded,
}

impl Runway {
    /// Whole months, with the sentinel for an unbounded runway.
    pub fn months(&self) -> i64 {
        match self {
            Runway::Months(m) => *m,
            Runway::Unbounded => UNBOUNDED_RUNWAY_MONTHS,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Runway::Unbounded)
    }
}

impl From<Runway> for i64 {
    fn from(runway: Runway) -> Self {
        runway.months()
    }
}

impl From<i64> for Runway {
    fn from(months: i64) -> Self {
        if months == UNBOUNDED_RUNWAY_MONTHS {
            Runway::Unbounded
        } else {
            Runway::Months(months)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

/// floor(cash / burn) when burning, otherwise unbounded.
///
/// Quotients beyond the range of `Decimal` or `i64` saturate toward the sign
/// of the cash balance.
pub fn runway_months(cash_remaining: Money, monthly_burn_rate: Money) -> Runway {
    if monthly_burn_rate <= Decimal::ZERO {
        return Runway::Unbounded;
    }
    let saturated = if cash_remaining.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    let months = cash_remaining
        .checked_div(monthly_burn_rate)
        .and_then(|q| q.floor().to_i64())
        .unwrap_or(saturated);
    Runway::Months(months)
}

pub fn classify_runway(runway: Runway, thresholds: &HealthThresholds) -> HealthStatus {
    match runway {
        Runway::Unbounded => HealthStatus::Green,
        Runway::Months(m) if m >= thresholds.healthy_months => HealthStatus::Green,
        Runway::Months(m) if m >= thresholds.watch_months => HealthStatus::Yellow,
        Runway::Months(_) => HealthStatus::Red,
    }
}

/// Derived health view of one portfolio company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHealth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub sector: String,
    pub cash_remaining: Money,
    pub monthly_burn_rate: Money,
    pub monthly_revenue: Money,
    pub runway_months: Runway,
    pub health_status: HealthStatus,
}

pub fn assess_company(record: &InvestmentRecord, thresholds: &HealthThresholds) -> CompanyHealth {
    let runway = runway_months(record.cash_remaining, record.monthly_burn_rate);
    CompanyHealth {
        id: record.id,
        name: record.name.clone(),
        sector: record.sector.clone(),
        cash_remaining: record.cash_remaining,
        monthly_burn_rate: record.monthly_burn_rate,
        monthly_revenue: record.monthly_revenue,
        runway_months: runway,
        health_status: classify_runway(runway, thresholds),
    }
}

/// Companies bucketed by health status, each bucket in snapshot order.
///
/// Serializes with a `counts` object alongside the buckets. Counts are
/// recomputed from the buckets on the way out and ignored on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "HealthBuckets", from = "HealthBuckets")]
pub struct PortfolioHealth {
    pub green: Vec<CompanyHealth>,
    pub yellow: Vec<CompanyHealth>,
    pub red: Vec<CompanyHealth>,
}

/// Wire form of [`PortfolioHealth`].
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBuckets {
    #[serde(default)]
    pub counts: HealthCounts,
    pub green: Vec<CompanyHealth>,
    pub yellow: Vec<CompanyHealth>,
    pub red: Vec<CompanyHealth>,
}

impl From<PortfolioHealth> for HealthBuckets {
    fn from(health: PortfolioHealth) -> Self {
        HealthBuckets {
            counts: health.counts(),
            green: health.green,
            yellow: health.yellow,
            red: health.red,
        }
    }
}

impl From<HealthBuckets> for PortfolioHealth {
    fn from(buckets: HealthBuckets) -> Self {
        PortfolioHealth {
            green: buckets.green,
            yellow: buckets.yellow,
            red: buckets.red,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl PortfolioHealth {
    pub fn counts(&self) -> HealthCounts {
        HealthCounts {
            green: self.green.len(),
            yellow: self.yellow.len(),
            red: self.red.len(),
        }
    }
}

pub fn classify_portfolio(
    records: &[InvestmentRecord],
    thresholds: &HealthThresholds,
) -> PortfolioHealth {
    let mut health = PortfolioHealth::default();
    for record in records {
        let company = assess_company(record, thresholds);
        match company.health_status {
            HealthStatus::Green => health.green.push(company),
            HealthStatus::Yellow => health.yellow.push(company),
            HealthStatus::Red => health.red.push(company),
        }
    }
    health
}
