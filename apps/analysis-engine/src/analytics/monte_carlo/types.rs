//! Result types for Monte Carlo simulation.

use serde::{Deserialize, Serialize};

/// Summary statistics of the simulated final-equity distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloDistribution {
    /// Final equity of every simulation, in simulation order.
    pub final_equities: Vec<f64>,
    /// Mean final equity.
    pub mean_final: f64,
    /// Median final equity.
    pub median_final: f64,
    /// 5th percentile of final equity.
    pub p5: f64,
    /// 95th percentile of final equity.
    pub p95: f64,
    /// Fraction of simulations ending above initial capital.
    pub prob_profit: f64,
    /// Fraction of simulations with max drawdown worse than -50%.
    pub prob_large_drawdown: f64,
}

/// Fan-chart data: percentile bands plus sparse raw sample paths.
///
/// Every sequence has one point per downsampled trade index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloPaths {
    /// Randomly selected simulated paths.
    pub sample_paths: Vec<Vec<f64>>,
    /// 50th percentile per point.
    pub median_path: Vec<f64>,
    /// 5th percentile per point.
    pub p5_path: Vec<f64>,
    /// 25th percentile per point.
    pub p25_path: Vec<f64>,
    /// 75th percentile per point.
    pub p75_path: Vec<f64>,
    /// 95th percentile per point.
    pub p95_path: Vec<f64>,
}

/// Complete Monte Carlo simulation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Simulations actually run after applying the matrix cap.
    pub effective_simulations: usize,
    /// Column stride applied to returned paths.
    pub stride: usize,
    /// Final-equity distribution.
    pub distribution: MonteCarloDistribution,
    /// Fan-chart data.
    pub paths: MonteCarloPaths,
}
