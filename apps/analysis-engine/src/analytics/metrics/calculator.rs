//! Performance calculator for a sequence of per-trade P&L values.

use super::types::{EquityCurve, Metrics};
use crate::analytics::math::{
    equity_curve, max_drawdown, mean, median, sample_std_dev, skewness, win_rate,
};
use crate::error::AnalysisError;

/// Performance calculator over an ordered P&L series.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceCalculator<'a> {
    pnl: &'a [f64],
    initial_capital: f64,
}

impl<'a> PerformanceCalculator<'a> {
    /// Create a calculator. The series must hold at least one trade.
    pub fn new(pnl: &'a [f64], initial_capital: f64) -> Result<Self, AnalysisError> {
        if pnl.is_empty() {
            return Err(AnalysisError::empty("pnl series"));
        }
        Ok(Self {
            pnl,
            initial_capital,
        })
    }

    /// Equity after each trade, in input order.
    #[must_use]
    pub fn equity(&self) -> Vec<f64> {
        equity_curve(self.pnl, self.initial_capital)
    }

    /// Calculate all performance metrics.
    #[must_use]
    pub fn calculate(&self) -> Metrics {
        let n = self.pnl.len();

        let mean_pnl = mean(self.pnl).unwrap_or(0.0);
        let std_pnl = sample_std_dev(self.pnl).unwrap_or(0.0);
        // Per-trade signal-to-noise; undefined ratios are reported as 0.
        let sharpe_ratio = if std_pnl > 0.0 { mean_pnl / std_pnl } else { 0.0 };

        Metrics {
            total_trades: n,
            win_rate: win_rate(self.pnl).unwrap_or(0.0),
            mean_pnl,
            median_pnl: median(self.pnl).unwrap_or(0.0),
            std_pnl,
            max_drawdown: max_drawdown(&self.equity()),
            sharpe_ratio,
            skewness: skewness(self.pnl).unwrap_or(0.0),
            total_pnl: self.pnl.iter().sum(),
        }
    }

    /// Build the equity curve payload against the trades' exit times.
    #[must_use]
    pub fn equity_curve(&self, times: Vec<String>) -> EquityCurve {
        EquityCurve {
            times,
            equity: self.equity(),
        }
    }
}

/// Compute metrics for a P&L series.
pub fn compute_metrics(pnl: &[f64], initial_capital: f64) -> Result<Metrics, AnalysisError> {
    Ok(PerformanceCalculator::new(pnl, initial_capital)?.calculate())
}
