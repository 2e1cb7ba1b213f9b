//! Rate-of-return solving for irregularly dated cash flows.
//!
//! Currency stays in `Decimal` everywhere else in the crate. The solver is
//! the one place amounts are converted to `f64`: IRR is an approximation
//! bounded by the convergence tolerance, so binary floating point is fine
//! here and nowhere else.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::types::CashFlowEvent;

const DAYS_PER_YEAR: f64 = 365.25;

/// How a solver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolverStatus {
    /// |NPV| fell below epsilon.
    Converged,
    /// Fewer than two flows, no sign change, or every flow on one date:
    /// there is no return to solve for.
    InsufficientData,
    /// NPV derivative vanished; the rate is reported as zero.
    ZeroDerivative,
    /// Iteration cap reached; the rate is the last iterate.
    IterationLimit,
    /// An iterate left the domain 1 + r > 0 or stopped being finite;
    /// the rate is the last valid iterate.
    OutOfDomain,
}

impl SolverStatus {
    pub fn describe(&self) -> &'static str {
        match self {
            SolverStatus::Converged => "converged",
            SolverStatus::InsufficientData => "insufficient data",
            SolverStatus::ZeroDerivative => "zero derivative",
            SolverStatus::IterationLimit => "iteration limit",
            SolverStatus::OutOfDomain => "out of domain",
        }
    }
}

/// Result of an XIRR solve: the rate together with whether it can be trusted.
///
/// `iterations` counts accepted Newton steps, so it is the number of updates
/// applied to the initial guess to reach `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XirrOutcome {
    /// Annualized rate as a decimal (0.10 = 10%)
    pub rate: f64,
    pub status: SolverStatus,
    pub iterations: u32,
}

impl XirrOutcome {
    fn new(rate: f64, status: SolverStatus, iterations: u32) -> Self {
        Self {
            rate,
            status,
            iterations,
        }
    }

    pub fn converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

/// Flows as (years from base date, amount) pairs.
fn year_fractions(flows: &[CashFlowEvent]) -> Vec<(f64, f64)> {
    let Some(base_date) = flows.iter().map(|cf| cf.date).min() else {
        return Vec::new();
    };
    flows
        .iter()
        .map(|cf| {
            let days = (cf.date - base_date).num_days() as f64;
            (days / DAYS_PER_YEAR, cf.amount.to_f64().unwrap_or(0.0))
        })
        .collect()
}

fn npv_and_derivative(rate: f64, points: &[(f64, f64)]) -> (f64, f64) {
    let one_plus_r = 1.0 + rate;
    let mut npv = 0.0;
    let mut dnpv = 0.0;
    for &(years, amount) in points {
        npv += amount * one_plus_r.powf(-years);
        dnpv += amount * -years * one_plus_r.powf(-years - 1.0);
    }
    (npv, dnpv)
}

/// Net present value of dated flows at an annual `rate`, discounted to the
/// earliest flow date on an actual/365.25 basis.
pub fn xnpv(rate: f64, flows: &[CashFlowEvent]) -> f64 {
    npv_and_derivative(rate, &year_fractions(flows)).0
}

/// Extended IRR for irregular cash flow dates using Newton-Raphson.
///
/// Flow order does not matter. Degenerate input never errors: it produces a
/// zero rate tagged [`SolverStatus::InsufficientData`].
pub fn xirr(flows: &[CashFlowEvent], config: &SolverConfig) -> XirrOutcome {
    let outcome = solve(flows, config);
    match outcome.status {
        SolverStatus::Converged | SolverStatus::InsufficientData => tracing::debug!(
            flows = flows.len(),
            iterations = outcome.iterations,
            rate = outcome.rate,
            status = outcome.status.describe(),
            "xirr solved"
        ),
        _ => tracing::warn!(
            flows = flows.len(),
            iterations = outcome.iterations,
            rate = outcome.rate,
            status = outcome.status.describe(),
            "xirr did not converge"
        ),
    }
    outcome
}

fn solve(flows: &[CashFlowEvent], config: &SolverConfig) -> XirrOutcome {
    if flows.len() < 2 {
        return XirrOutcome::new(0.0, SolverStatus::InsufficientData, 0);
    }
    let has_outflow = flows.iter().any(|cf| cf.amount.is_sign_negative() && !cf.amount.is_zero());
    let has_inflow = flows.iter().any(|cf| cf.amount.is_sign_positive() && !cf.amount.is_zero());
    let first_date = flows[0].date;
    let spans_time = flows.iter().any(|cf| cf.date != first_date);
    if !(has_outflow && has_inflow && spans_time) {
        return XirrOutcome::new(0.0, SolverStatus::InsufficientData, 0);
    }

    let points = year_fractions(flows);
    let mut rate = config.initial_guess;

    if !rate.is_finite() || 1.0 + rate <= 0.0 {
        return XirrOutcome::new(rate, SolverStatus::OutOfDomain, 0);
    }

    for i in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(rate, &points);

        if !npv.is_finite() || !dnpv.is_finite() {
            return XirrOutcome::new(rate, SolverStatus::OutOfDomain, i);
        }

        if npv.abs() < config.epsilon {
            return XirrOutcome::new(rate, SolverStatus::Converged, i);
        }

        if dnpv == 0.0 {
            return XirrOutcome::new(0.0, SolverStatus::ZeroDerivative, i);
        }

        let next = rate - npv / dnpv;
        if !next.is_finite() || 1.0 + next <= 0.0 {
            return XirrOutcome::new(rate, SolverStatus::OutOfDomain, i);
        }
        rate = next;
    }

    XirrOutcome::new(rate, SolverStatus::IterationLimit, config.max_iterations)
}
