use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{CashFlowEvent, InvestmentRecord};

/// Converts a snapshot into the dated flows the rate solver consumes.
///
/// Each record contributes its investment as an outflow on `invested_at`.
/// The portfolio's combined current valuation is a single inflow on `as_of`,
/// omitted when it is zero.
pub fn build_cash_flows(records: &[InvestmentRecord], as_of: NaiveDate) -> Vec<CashFlowEvent> {
    let mut flows: Vec<CashFlowEvent> = records
        .iter()
        .map(|r| CashFlowEvent::new(r.invested_at, -r.amount_invested))
        .collect();

    let current_value: Decimal = records.iter().map(|r| r.current_valuation).sum();
    if !current_value.is_zero() {
        flows.push(CashFlowEvent::new(as_of, current_value));
    }

    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fixtures::{date, record};
    use rust_decimal_macros::dec;

    #[test]
    fn test_outflow_per_record_and_single_inflow() {
        let d1 = date(2022, 3, 1);
        let d2 = date(2023, 7, 9);
        let as_of = date(2024, 1, 1);
        let flows = build_cash_flows(
            &[
                record("A", "SaaS", d1, dec!(100), dec!(150)),
                record("B", "AI", d2, dec!(50), dec!(25)),
            ],
            as_of,
        );
        assert_eq!(
            flows,
            vec![
                CashFlowEvent::new(d1, dec!(-100)),
                CashFlowEvent::new(d2, dec!(-50)),
                CashFlowEvent::new(as_of, dec!(175)),
            ]
        );
    }

    #[test]
    fn test_zero_valuation_has_no_inflow() {
        let flows = build_cash_flows(
            &[record("A", "SaaS", date(2022, 3, 1), dec!(100), dec!(0))],
            date(2024, 1, 1),
        );
        assert_eq!(flows.len(), 1);
        assert!(flows[0].amount.is_sign_negative());
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(build_cash_flows(&[], date(2024, 1, 1)).is_empty());
    }
}
