//! Configuration and sizing policy for Monte Carlo simulation.

use serde::{Deserialize, Serialize};

/// Upper bound on simulation matrix cells (~400 MB of `f64`).
pub const MAX_ELEMENTS: usize = 50_000_000;

/// Fan-chart paths are downsampled to roughly this many points.
pub const MAX_PATH_POINTS: usize = 300;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// A simulation whose max drawdown is below this counts as a large drawdown.
pub const LARGE_DRAWDOWN_THRESHOLD: f64 = -0.50;

/// Percentiles reported for each fan-chart column.
pub const BAND_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Configuration for Monte Carlo simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Starting equity of every simulated path.
    pub initial_capital: f64,
    /// Requested number of simulations (may be capped).
    pub n_simulations: usize,
    /// Number of raw paths returned for fan-chart overlays.
    pub n_sample_paths: usize,
    /// Seed for reproducibility.
    pub seed: u64,
    /// Cap on `simulations × trades` matrix cells.
    pub max_elements: usize,
    /// Target number of points per returned path.
    pub max_path_points: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            initial_capital: 1_000_000.0,
            n_simulations: 10_000,
            n_sample_paths: 500,
            seed: DEFAULT_SEED,
            max_elements: MAX_ELEMENTS,
            max_path_points: MAX_PATH_POINTS,
        }
    }
}

/// Number of simulations that fit the matrix cap.
///
/// Never more than requested; silently fewer when
/// `n_simulations × n_trades` would exceed `max_elements`.
#[must_use]
pub fn effective_simulations(n_simulations: usize, n_trades: usize, max_elements: usize) -> usize {
    n_simulations.min(max_elements / n_trades.max(1))
}

/// Column stride used to downsample paths of `n_trades` points.
#[must_use]
pub fn path_stride(n_trades: usize, max_path_points: usize) -> usize {
    if n_trades > max_path_points {
        (n_trades / max_path_points.max(1)).max(1)
    } else {
        1
    }
}
