//! Defaults and limits for trade analysis.

use serde::{Deserialize, Serialize};

use crate::analytics::monte_carlo::{
    DEFAULT_SEED, MAX_ELEMENTS, MAX_PATH_POINTS, MonteCarloConfig,
};

/// Analysis configuration. Request parameters override the first four fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Starting equity.
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    /// Requested Monte Carlo simulations.
    #[serde(default = "default_n_simulations")]
    pub n_simulations: usize,
    /// Raw sample paths returned for fan charts.
    #[serde(default = "default_n_sample_paths")]
    pub n_sample_paths: usize,
    /// Random seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Cap on simulation matrix cells.
    #[serde(default = "default_max_matrix_elements")]
    pub max_matrix_elements: usize,
    /// Downsampling target for returned paths.
    #[serde(default = "default_max_path_points")]
    pub max_path_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            n_simulations: default_n_simulations(),
            n_sample_paths: default_n_sample_paths(),
            seed: default_seed(),
            max_matrix_elements: default_max_matrix_elements(),
            max_path_points: default_max_path_points(),
        }
    }
}

impl AnalysisConfig {
    /// Monte Carlo settings derived from this configuration.
    #[must_use]
    pub const fn monte_carlo(&self) -> MonteCarloConfig {
        MonteCarloConfig {
            initial_capital: self.initial_capital,
            n_simulations: self.n_simulations,
            n_sample_paths: self.n_sample_paths,
            seed: self.seed,
            max_elements: self.max_matrix_elements,
            max_path_points: self.max_path_points,
        }
    }
}

const fn default_initial_capital() -> f64 {
    1_000_000.0
}

const fn default_n_simulations() -> usize {
    10_000
}

const fn default_n_sample_paths() -> usize {
    500
}

const fn default_seed() -> u64 {
    DEFAULT_SEED
}

const fn default_max_matrix_elements() -> usize {
    MAX_ELEMENTS
}

const fn default_max_path_points() -> usize {
    MAX_PATH_POINTS
}
