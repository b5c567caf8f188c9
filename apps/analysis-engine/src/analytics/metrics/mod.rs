//! Performance metrics for a per-trade P&L series.
//!
//! Implements standard trading performance metrics:
//! - Equity curve and running-peak drawdown
//! - Per-trade Sharpe ratio (signal-to-noise, not annualised)
//! - Skewness of the P&L distribution
//! - Win rate and summary moments

mod calculator;
mod types;

pub use calculator::{PerformanceCalculator, compute_metrics};
pub use types::{EquityCurve, Metrics};
