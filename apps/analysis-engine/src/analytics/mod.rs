//! Analytics over reconstructed trades.
//!
//! - [`metrics`]: deterministic performance metrics for a P&L series
//! - [`monte_carlo`]: bootstrap simulation of alternative trade orderings

pub mod math;
pub mod metrics;
pub mod monte_carlo;

pub use metrics::{EquityCurve, Metrics, PerformanceCalculator, compute_metrics};
pub use monte_carlo::{
    MonteCarloBuilder, MonteCarloConfig, MonteCarloDistribution, MonteCarloPaths,
    MonteCarloResult, MonteCarloSimulator, run_monte_carlo,
};
