//! Bootstrap Monte Carlo simulator.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::{debug, info, warn};

use super::config::{
    LARGE_DRAWDOWN_THRESHOLD, MonteCarloConfig, effective_simulations, path_stride,
};
use super::matrix::{SimulationMatrix, percentile_bands};
use super::types::{MonteCarloDistribution, MonteCarloPaths, MonteCarloResult};
use crate::analytics::math::{mean, median_of_sorted, percentile_of_sorted, sorted_copy};
use crate::error::AnalysisError;

/// Monte Carlo simulator over a historical P&L series.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    config: MonteCarloConfig,
    pnl: Vec<f64>,
}

impl MonteCarloSimulator {
    /// Create a new simulator.
    #[must_use]
    pub const fn new(config: MonteCarloConfig, pnl: Vec<f64>) -> Self {
        Self { config, pnl }
    }

    /// Run the simulation.
    ///
    /// The same config and series always produce identical output: one
    /// seeded generator drives the bootstrap draws and then the sample-path
    /// selection.
    pub fn run(&self) -> Result<MonteCarloResult, AnalysisError> {
        let n_trades = self.pnl.len();
        if n_trades == 0 {
            return Err(AnalysisError::empty("pnl series"));
        }

        let requested = self.config.n_simulations;
        let n_sims = effective_simulations(requested, n_trades, self.config.max_elements);
        if n_sims < requested {
            warn!(
                requested,
                effective = n_sims,
                n_trades,
                max_elements = self.config.max_elements,
                "Capping simulation count to fit matrix budget"
            );
        }
        if n_sims == 0 {
            return Err(AnalysisError::invalid_parameter(
                "n_simulations",
                format!("no simulations fit for {n_trades} trades"),
            ));
        }

        info!(
            simulations = n_sims,
            trades = n_trades,
            seed = self.config.seed,
            "Running Monte Carlo simulation"
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let matrix =
            SimulationMatrix::bootstrap(&self.pnl, self.config.initial_capital, n_sims, &mut rng);

        let distribution = self.summarise(&matrix);

        let stride = path_stride(n_trades, self.config.max_path_points);
        let sampled = matrix.downsampled(stride);
        let [p5_path, p25_path, median_path, p75_path, p95_path] = percentile_bands(sampled);

        let n_samples = self.config.n_sample_paths.min(n_sims);
        let sample_paths = index::sample(&mut rng, n_sims, n_samples)
            .iter()
            .map(|row| sampled.row(row).to_vec())
            .collect();

        debug!(
            stride,
            points = sampled.ncols(),
            sample_paths = n_samples,
            prob_profit = distribution.prob_profit,
            "Monte Carlo simulation complete"
        );

        Ok(MonteCarloResult {
            effective_simulations: n_sims,
            stride,
            distribution,
            paths: MonteCarloPaths {
                sample_paths,
                median_path,
                p5_path,
                p25_path,
                p75_path,
                p95_path,
            },
        })
    }

    fn summarise(&self, matrix: &SimulationMatrix) -> MonteCarloDistribution {
        let n = matrix.n_simulations() as f64;
        let final_equities = matrix.final_equities();
        let sorted = sorted_copy(&final_equities);

        let profitable = final_equities
            .iter()
            .filter(|e| **e > self.config.initial_capital)
            .count();
        let large_drawdowns = matrix
            .max_drawdowns()
            .iter()
            .filter(|dd| **dd < LARGE_DRAWDOWN_THRESHOLD)
            .count();

        MonteCarloDistribution {
            mean_final: mean(&final_equities).unwrap_or(0.0),
            median_final: median_of_sorted(&sorted).unwrap_or(0.0),
            p5: percentile_of_sorted(&sorted, 5.0),
            p95: percentile_of_sorted(&sorted, 95.0),
            prob_profit: profitable as f64 / n,
            prob_large_drawdown: large_drawdowns as f64 / n,
            final_equities,
        }
    }
}

/// Run a simulation for `pnl` with the given config.
pub fn run_monte_carlo(
    pnl: &[f64],
    config: &MonteCarloConfig,
) -> Result<MonteCarloResult, AnalysisError> {
    MonteCarloSimulator::new(config.clone(), pnl.to_vec()).run()
}

/// Builder for Monte Carlo simulation.
#[derive(Debug, Default)]
pub struct MonteCarloBuilder {
    config: MonteCarloConfig,
    pnl: Vec<f64>,
}

impl MonteCarloBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting equity.
    #[must_use]
    pub const fn initial_capital(mut self, capital: f64) -> Self {
        self.config.initial_capital = capital;
        self
    }

    /// Set requested number of simulations.
    #[must_use]
    pub const fn simulations(mut self, n: usize) -> Self {
        self.config.n_simulations = n;
        self
    }

    /// Set number of raw sample paths to return.
    #[must_use]
    pub const fn sample_paths(mut self, n: usize) -> Self {
        self.config.n_sample_paths = n;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the matrix cell budget.
    #[must_use]
    pub const fn max_elements(mut self, max: usize) -> Self {
        self.config.max_elements = max;
        self
    }

    /// Set the downsampling target for returned paths.
    #[must_use]
    pub const fn max_path_points(mut self, max: usize) -> Self {
        self.config.max_path_points = max;
        self
    }

    /// Set the historical P&L series.
    #[must_use]
    pub fn pnl(mut self, pnl: Vec<f64>) -> Self {
        self.pnl = pnl;
        self
    }

    /// Build the simulator.
    #[must_use]
    pub fn build(self) -> MonteCarloSimulator {
        MonteCarloSimulator::new(self.config, self.pnl)
    }
}
