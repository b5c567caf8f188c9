//! Bootstrap Monte Carlo simulation of equity paths.
//!
//! Resamples a historical per-trade P&L series with replacement to build a
//! matrix of synthetic equity paths, then reduces it to:
//! - Final-equity distribution statistics
//! - Percentile bands for fan charts
//! - A sparse set of raw sample paths
//!
//! Matrix size is capped by [`MAX_ELEMENTS`]; oversized requests run fewer
//! simulations rather than failing.

mod config;
mod matrix;
mod simulator;
mod types;

pub use config::{
    BAND_PERCENTILES, DEFAULT_SEED, LARGE_DRAWDOWN_THRESHOLD, MAX_ELEMENTS, MAX_PATH_POINTS,
    MonteCarloConfig, effective_simulations, path_stride,
};
pub use simulator::{MonteCarloBuilder, MonteCarloSimulator, run_monte_carlo};
pub use types::{MonteCarloDistribution, MonteCarloPaths, MonteCarloResult};
