use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{InvestmentRecord, Money, Multiple};

/// Capital deployed versus current marks across the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSummary {
    pub total_deployed: Money,
    pub current_valuation: Money,
    /// current_valuation - total_deployed; negative when the portfolio is under water
    pub unrealized_gains: Money,
    /// Realised proceeds. Not tracked by the record model, so always zero.
    pub distributions: Money,
    pub moic: Multiple,
}

/// Multiple on Invested Capital: (current value + distributions) / invested.
/// Zero when nothing has been invested; saturates at `Decimal::MAX` when the
/// quotient is out of range.
pub fn moic(total_invested: Money, current_value: Money, distributions: Money) -> Multiple {
    if total_invested.is_zero() {
        return Decimal::ZERO;
    }
    current_value
        .checked_add(distributions)
        .and_then(|returned| returned.checked_div(total_invested))
        .unwrap_or(Decimal::MAX)
}

pub fn summarize_valuation(records: &[InvestmentRecord]) -> ValuationSummary {
    let total_deployed: Money = records.iter().map(|r| r.amount_invested).sum();
    let current_valuation: Money = records.iter().map(|r| r.current_valuation).sum();
    let distributions = Decimal::ZERO;

    ValuationSummary {
        total_deployed,
        current_valuation,
        unrealized_gains: current_valuation - total_deployed,
        distributions,
        moic: moic(total_deployed, current_valuation, distributions),
    }
}
