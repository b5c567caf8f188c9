//! Analyze Trades Use Case

use tracing::info;

use crate::analytics::{MonteCarloSimulator, PerformanceCalculator};
use crate::application::dto::{AnalysisRequestDto, AnalysisResponseDto, NotionalDataDto};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Use case for computing metrics and Monte Carlo projections of a trade list.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeTradesUseCase {
    defaults: AnalysisConfig,
}

impl AnalyzeTradesUseCase {
    /// Create a new `AnalyzeTradesUseCase` with parameter defaults.
    pub const fn new(defaults: AnalysisConfig) -> Self {
        Self { defaults }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidParameter`] for an empty trade list or
    /// an unusable parameter.
    pub fn execute(
        &self,
        request: AnalysisRequestDto,
    ) -> Result<AnalysisResponseDto, AnalysisError> {
        if request.trades.is_empty() {
            return Err(AnalysisError::invalid_parameter(
                "trades",
                "trade list is empty",
            ));
        }

        // 1. Resolve parameters against configured defaults
        let mut config = self.defaults.monte_carlo();
        if let Some(capital) = request.initial_capital {
            config.initial_capital = capital;
        }
        if let Some(n) = request.n_simulations {
            config.n_simulations = n;
        }
        if let Some(n) = request.n_sample_paths {
            config.n_sample_paths = n;
        }
        if let Some(seed) = request.seed {
            config.seed = seed;
        }

        if !config.initial_capital.is_finite() || config.initial_capital <= 0.0 {
            return Err(AnalysisError::invalid_parameter(
                "initial_capital",
                format!("must be a positive number, got {}", config.initial_capital),
            ));
        }
        if config.n_simulations == 0 {
            return Err(AnalysisError::invalid_parameter(
                "n_simulations",
                "must be at least 1",
            ));
        }

        // 2. Per-trade series
        let pnl_series: Vec<f64> = request.trades.iter().map(|t| t.pnl).collect();
        let exit_times: Vec<String> = request.trades.iter().map(|t| t.exit_time.clone()).collect();
        let notionals: Vec<f64> = request.trades.iter().map(|t| t.entry_notional()).collect();

        // 3. Historical metrics
        let calculator = PerformanceCalculator::new(&pnl_series, config.initial_capital)?;
        let metrics = calculator.calculate();
        let equity_curve = calculator.equity_curve(exit_times.clone());

        // 4. Monte Carlo projection
        info!(
            simulations = config.n_simulations,
            trades = pnl_series.len(),
            initial_capital = config.initial_capital,
            "Starting Monte Carlo analysis"
        );
        let mc = MonteCarloSimulator::new(config, pnl_series.clone()).run()?;

        info!(
            total_pnl = metrics.total_pnl,
            effective_simulations = mc.effective_simulations,
            prob_profit = mc.distribution.prob_profit,
            "Analysis complete"
        );

        Ok(AnalysisResponseDto {
            metrics,
            mc_distribution: mc.distribution,
            mc_paths: mc.paths,
            equity_curve,
            pnl_series,
            notional_data: NotionalDataDto {
                times: exit_times,
                notionals,
            },
        })
    }
}
