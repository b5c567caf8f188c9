//! Result types for per-trade performance metrics.

use serde::{Deserialize, Serialize};

/// Performance summary of a P&L series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of trades in the series.
    pub total_trades: usize,
    /// Fraction of trades with strictly positive P&L.
    pub win_rate: f64,
    /// Mean P&L per trade.
    pub mean_pnl: f64,
    /// Median P&L per trade.
    pub median_pnl: f64,
    /// Sample standard deviation of P&L (n − 1), 0 below two trades.
    pub std_pnl: f64,
    /// Deepest peak-to-trough decline as a fraction, e.g. -0.25 = -25%.
    pub max_drawdown: f64,
    /// Per-trade Sharpe ratio (mean / std, not annualised).
    pub sharpe_ratio: f64,
    /// Skewness of the P&L distribution.
    pub skewness: f64,
    /// Sum of all P&L.
    pub total_pnl: f64,
}

/// Cumulative equity aligned to trade exit timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    /// Exit timestamps (ISO 8601).
    pub times: Vec<String>,
    /// Equity after each trade.
    pub equity: Vec<f64>,
}
