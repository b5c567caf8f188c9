//! Application Use Cases
//!
//! Use cases orchestrate ingest, reconstruction and analytics for the
//! HTTP layer.

mod analyze_trades;
mod parse_trades;

pub use analyze_trades::AnalyzeTradesUseCase;
pub use parse_trades::ParseTradesUseCase;
