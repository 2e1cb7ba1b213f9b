pub mod config;
pub mod error;
pub mod portfolio;
pub mod time_value;
pub mod types;
pub mod validation;

pub use config::{EngineConfig, HealthThresholds, SolverConfig};
pub use error::VenturaError;
pub use portfolio::dashboard::{compute_dashboard, compute_dashboard_checked, DashboardInput, DashboardMetrics};
pub use time_value::{xirr, SolverStatus, XirrOutcome};
pub use types::*;

/// Standard result type for all ventura operations
pub type VenturaResult<T> = Result<T, VenturaError>;
