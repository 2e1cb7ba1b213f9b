use serde::{Deserialize, Serialize};

use crate::types::{InvestmentRecord, Money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// YYYY-MM-DD
    pub date: String,
    pub company_name: String,
    pub sector: String,
    pub amount: Money,
    pub round_stage: String,
}

/// One event per investment, newest first.
///
/// Dates are fixed-width ISO strings, so comparing them as strings is
/// comparing them chronologically. Same-day investments keep snapshot order.
pub fn build_timeline(records: &[InvestmentRecord]) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = records
        .iter()
        .map(|r| TimelineEvent {
            date: r.invested_at.format("%Y-%m-%d").to_string(),
            company_name: r.name.clone(),
            sector: r.sector.clone(),
            amount: r.amount_invested,
            round_stage: r.round_stage.clone(),
        })
        .collect();
    events.sort_by(|a, b| b.date.cmp(&a.date));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::fixtures::{date, record};
    use rust_decimal_macros::dec;

    #[test]
    fn test_newest_first() {
        let records = vec![
            record("Older", "SaaS", date(2023, 1, 1), dec!(100), dec!(100)),
            record("Newer", "AI", date(2024, 6, 15), dec!(250), dec!(300)),
        ];
        let timeline = build_timeline(&records);
        assert_eq!(timeline[0].company_name, "Newer");
        assert_eq!(timeline[0].date, "2024-06-15");
        assert_eq!(timeline[0].amount, dec!(250));
        assert_eq!(timeline[1].company_name, "Older");
        assert_eq!(timeline[1].round_stage, "Seed");
    }

    #[test]
    fn test_same_day_keeps_snapshot_order() {
        let d = date(2022, 9, 1);
        let records = vec![
            record("First", "SaaS", d, dec!(1), dec!(1)),
            record("Second", "SaaS", d, dec!(2), dec!(2)),
            record("Latest", "SaaS", date(2022, 10, 1), dec!(3), dec!(3)),
        ];
        let names: Vec<String> = build_timeline(&records)
            .into_iter()
            .map(|e| e.company_name)
            .collect();
        assert_eq!(names, vec!["Latest", "First", "Second"]);
    }
}
