// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Analysis Engine - Rust Core Library
//!
//! Stateless analytics for exported trade histories.
//!
//! # Pipeline
//!
//! - **Ingest**: CSV text → alias-resolved [`CanonicalTable`]
//! - **Trades**: format detection, then FIFO round-trip matching for fill
//!   exports or direct normalization for summary exports
//! - **Analytics**
//!   - `metrics`: equity curve, drawdown, Sharpe, skewness, win rate
//!   - `monte_carlo`: bootstrap resampling of the P&L series into a matrix of
//!     synthetic equity paths, summarized into a distribution and fan chart
//!
//! # Layers
//!
//! - **Application**: `ParseTrades` and `AnalyzeTrades` use cases plus DTOs
//! - **Infrastructure**: axum HTTP adapter (`/health`, `/upload`, `/analyze`)
//!
//! Every request is computed to completion from its own inputs. Nothing is
//! cached between requests and all randomness comes from one seeded
//! generator per simulation.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Core
// =============================================================================

/// Error types and HTTP error mapping.
pub mod error;

/// CSV ingest and header alias resolution.
pub mod ingest;

/// Trade reconstruction from fill and summary exports.
pub mod trades;

/// Performance metrics and Monte Carlo simulation.
pub mod analytics;

// =============================================================================
// Layers
// =============================================================================

/// Application layer - Use cases and DTOs.
pub mod application;

/// Infrastructure layer - HTTP adapter.
pub mod infrastructure;

// =============================================================================
// Runtime
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Tracing and OpenTelemetry setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use analytics::{
    EquityCurve, Metrics, MonteCarloConfig, MonteCarloDistribution, MonteCarloPaths,
    MonteCarloResult, compute_metrics, run_monte_carlo,
};
pub use application::{AnalyzeTradesUseCase, ParseTradesUseCase};
pub use error::{AnalysisError, ErrorCode, HttpErrorResponse};
pub use ingest::parse_csv;
pub use trades::{
    CanonicalField, CanonicalRow, CanonicalTable, Trade, TradeFormat, detect_format,
    match_round_trips, normalize_summaries, reconstruct_trades,
};
