pub mod dashboard;
pub mod xirr;
