//! Tunables for the analytics engine.
//!
//! The engine reads no files or environment variables; every knob is an
//! explicit value passed by the caller.

use serde::{Deserialize, Serialize};

use crate::VenturaResult;

/// Newton-Raphson settings for the XIRR solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Stop once |NPV| falls below this.
    pub epsilon: f64,
    /// Hard cap on iterations, bounds worst-case CPU per call.
    pub max_iterations: u32,
    /// Starting rate (0.10 = 10%).
    pub initial_guess: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            max_iterations: 100,
            initial_guess: 0.10,
        }
    }
}

/// Runway boundaries, in whole months, for the health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthThresholds {
    /// Runway at or above this is green.
    pub healthy_months: i64,
    /// Runway at or above this (and below `healthy_months`) is yellow.
    pub watch_months: i64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            healthy_months: 6,
            watch_months: 3,
        }
    }
}

/// Configuration for a dashboard computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub solver: SolverConfig,
    pub health: HealthThresholds,
    /// Compute independent components concurrently (requires the `parallel` feature).
    pub parallel: bool,
    /// Minimum record count before fanning out.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            health: HealthThresholds::default(),
            parallel: true,
            parallel_threshold: 100,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always computes sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> VenturaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.solver.epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.solver.initial_guess = guess;
        self
    }

    #[must_use]
    pub fn with_health_thresholds(mut self, thresholds: HealthThresholds) -> Self {
        self.health = thresholds;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert_eq!(config.solver.epsilon, 1e-4);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.health.healthy_months, 6);
        assert_eq!(config.health.watch_months, 3);
        assert!(config.parallel);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_epsilon(1e-8)
            .with_max_iterations(250)
            .with_initial_guess(0.2)
            .with_parallel(false);

        assert_eq!(config.solver.epsilon, 1e-8);
        assert_eq!(config.solver.max_iterations, 250);
        assert_eq!(config.solver.initial_guess, 0.2);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"solver": {"maxIterations": 50}}"#).unwrap();
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.solver.epsilon, 1e-4);
        assert_eq!(config.health, HealthThresholds::default());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::VenturaError::Serialization(_)));
    }

    #[test]
    fn test_sequential_never_parallelizes() {
        let config = EngineConfig::sequential().with_threshold(0);
        assert!(!config.should_parallelize(10_000));
    }
}
