//! Planner hyperparameters configuration.
//!
//! All tunable knobs of the search live here. Budgets control how much work
//! the planner performs and how it is spread across host frames; the
//! exploration constant tunes the UCT balance; the seed makes runs
//! reproducible.

use serde::{Deserialize, Serialize};

/// Planner hyperparameters configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerHyperparameters {
    /// Total iteration budget for one planning episode.
    /// Default: 100
    pub max_iterations: usize,

    /// Iterations executed per `run_iteration_batch` call.
    /// Lower values = more responsive host frames.
    /// Default: 10
    pub max_iterations_per_frame: usize,

    /// UCT exploration constant C.
    /// Higher values = more exploration.
    /// Default: 1.4
    pub exploration_constant: f64,

    /// Seed for the planner-owned random generator.
    /// `None` draws from OS entropy; set for reproducible playouts.
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for PlannerHyperparameters {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_iterations_per_frame: 10,
            exploration_constant: 1.4,
            seed: None,
        }
    }
}

impl PlannerHyperparameters {
    /// Validate that the configuration can drive a search at all.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".to_string());
        }
        if self.max_iterations_per_frame == 0 {
            return Err("max_iterations_per_frame must be at least 1".to_string());
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant <= 0.0 {
            return Err(format!(
                "exploration_constant must be a positive finite number, got {}",
                self.exploration_constant
            ));
        }
        Ok(())
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "iters[{},{}]_c[{:.2}]_seed[{}]",
            self.max_iterations,
            self.max_iterations_per_frame,
            self.exploration_constant,
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string())
        )
    }
}
