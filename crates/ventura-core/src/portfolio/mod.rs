//! Fund-level analytics over a snapshot of investment records.
//!
//! Every function here is pure: it borrows the snapshot, allocates its own
//! output and keeps no state between calls.

pub mod cash_flows;
pub mod dashboard;
pub mod health;
pub mod history;
pub(crate) mod parallel;
pub mod sectors;
pub mod timeline;
pub mod valuation;
