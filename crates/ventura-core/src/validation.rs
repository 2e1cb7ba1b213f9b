//! Snapshot checks for callers to run before handing records to the engine.
//!
//! The engine assumes well-formed input and never fails on its own; this is
//! the boundary where malformed records are rejected.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::VenturaError;
use crate::types::{InvestmentRecord, Money};
use crate::VenturaResult;

fn non_negative(index: usize, field: &str, value: Money) -> VenturaResult<()> {
    if value < Decimal::ZERO {
        return Err(VenturaError::InvalidInput {
            field: format!("records[{index}].{field}"),
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}

/// Returns the first problem found in the snapshot.
///
/// Negative `cashRemaining` is accepted: a company that has overdrawn its
/// cash is a valid (red) state, not malformed data.
pub fn validate_snapshot(records: &[InvestmentRecord], as_of: NaiveDate) -> VenturaResult<()> {
    for (i, r) in records.iter().enumerate() {
        if r.name.trim().is_empty() {
            return Err(VenturaError::InvalidInput {
                field: format!("records[{i}].name"),
                reason: "company name must not be blank".into(),
            });
        }
        non_negative(i, "amountInvested", r.amount_invested)?;
        non_negative(i, "currentValuation", r.current_valuation)?;
        non_negative(i, "monthlyBurnRate", r.monthly_burn_rate)?;
        non_negative(i, "monthlyRevenue", r.monthly_revenue)?;

        if r.invested_at > as_of {
            return Err(VenturaError::InvalidDate {
                field: format!("records[{i}].investedAt"),
                reason: format!("{} is after the valuation date {}", r.invested_at, as_of),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fixtures::{date, record};
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_snapshot() {
        let mut r = record("A", "SaaS", date(2023, 1, 1), dec!(100), dec!(90));
        r.cash_remaining = dec!(-10);
        assert!(validate_snapshot(&[r], date(2023, 1, 1)).is_ok());
        assert!(validate_snapshot(&[], date(2023, 1, 1)).is_ok());
    }

    #[test]
    fn test_future_investment_rejected() {
        let r = record("A", "SaaS", date(2023, 1, 2), dec!(100), dec!(90));
        match validate_snapshot(&[r], date(2023, 1, 1)) {
            Err(VenturaError::InvalidDate { field, .. }) => assert_eq!(field, "records[0].investedAt"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let ok = record("A", "SaaS", date(2023, 1, 1), dec!(100), dec!(90));
        let bad = record("B", "SaaS", date(2023, 1, 1), dec!(-5), dec!(90));
        match validate_snapshot(&[ok, bad], date(2024, 1, 1)) {
            Err(VenturaError::InvalidInput { field, .. }) => {
                assert_eq!(field, "records[1].amountInvested")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let r = record("  ", "SaaS", date(2023, 1, 1), dec!(100), dec!(90));
        assert!(validate_snapshot(&[r], date(2024, 1, 1)).is_err());
    }
}
