pub mod csv_in;
pub mod file;
pub mod stdin;

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use ventura_core::{DashboardInput, InvestmentRecord};

/// A snapshot as found on disk or stdin: either dated, or a bare list of records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    Dated(DashboardInput),
    Records(Vec<InvestmentRecord>),
}

impl Snapshot {
    /// `as_of` wins over the snapshot's own date; undated snapshots are valued today.
    pub fn into_input(self, as_of: Option<NaiveDate>) -> DashboardInput {
        match self {
            Snapshot::Dated(mut input) => {
                if let Some(date) = as_of {
                    input.as_of = date;
                }
                input
            }
            Snapshot::Records(records) => DashboardInput {
                as_of: as_of.unwrap_or_else(|| Local::now().date_naive()),
                records,
            },
        }
    }
}
