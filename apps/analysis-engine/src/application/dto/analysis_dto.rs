//! Analysis DTOs

use serde::{Deserialize, Serialize};

use crate::analytics::{EquityCurve, Metrics, MonteCarloDistribution, MonteCarloPaths};
use crate::trades::Trade;

/// DTO for an analysis request. Absent parameters take configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequestDto {
    /// Trades in chronological order.
    pub trades: Vec<Trade>,
    /// Starting equity.
    #[serde(default)]
    pub initial_capital: Option<f64>,
    /// Requested simulations.
    #[serde(default)]
    pub n_simulations: Option<usize>,
    /// Raw sample paths to return.
    #[serde(default)]
    pub n_sample_paths: Option<usize>,
    /// Random seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AnalysisRequestDto {
    /// Request with default parameters.
    #[must_use]
    pub const fn new(trades: Vec<Trade>) -> Self {
        Self {
            trades,
            initial_capital: None,
            n_simulations: None,
            n_sample_paths: None,
            seed: None,
        }
    }
}

/// Entry notional per trade, aligned to exit times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotionalDataDto {
    /// Exit timestamps.
    pub times: Vec<String>,
    /// `|entry_price × quantity|` per trade.
    pub notionals: Vec<f64>,
}

/// DTO for a full analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponseDto {
    /// Performance metrics.
    pub metrics: Metrics,
    /// Monte Carlo final-equity distribution.
    pub mc_distribution: MonteCarloDistribution,
    /// Monte Carlo fan-chart data.
    pub mc_paths: MonteCarloPaths,
    /// Historical equity curve.
    pub equity_curve: EquityCurve,
    /// Per-trade P&L in input order.
    pub pnl_series: Vec<f64>,
    /// Position notional over time.
    pub notional_data: NotionalDataDto,
}
