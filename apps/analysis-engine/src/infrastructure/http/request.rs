//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::application::dto::AnalysisRequestDto;
use crate::trades::Trade;

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Trades returned by `/upload`, possibly filtered by the client.
    pub trades: Vec<Trade>,
    /// Starting equity.
    #[serde(default)]
    pub initial_capital: Option<f64>,
    /// Requested Monte Carlo simulations.
    #[serde(default)]
    pub n_simulations: Option<usize>,
    /// Raw sample paths to return.
    #[serde(default)]
    pub n_sample_paths: Option<usize>,
    /// Random seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl From<AnalyzeRequest> for AnalysisRequestDto {
    fn from(request: AnalyzeRequest) -> Self {
        Self {
            trades: request.trades,
            initial_capital: request.initial_capital,
            n_simulations: request.n_simulations,
            n_sample_paths: request.n_sample_paths,
            seed: request.seed,
        }
    }
}
