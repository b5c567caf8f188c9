//! Parse Trades Use Case

use std::collections::BTreeSet;

use tracing::info;

use crate::application::dto::UploadResponseDto;
use crate::error::AnalysisError;
use crate::ingest::parse_csv;
use crate::trades::reconstruct_trades;

/// Use case for turning an uploaded CSV export into round-trip trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseTradesUseCase;

impl ParseTradesUseCase {
    /// Create a new `ParseTradesUseCase`.
    pub const fn new() -> Self {
        Self
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns an ingest or reconstruction error, or
    /// [`AnalysisError::EmptySeries`] when no round trip can be built.
    pub fn execute(&self, csv_text: &str) -> Result<UploadResponseDto, AnalysisError> {
        // 1. Read and alias-resolve the CSV
        let table = parse_csv(csv_text)?;
        info!(
            rows = table.len(),
            columns = ?table.columns(),
            "CSV parsed"
        );

        // 2. Reconstruct trades in the detected layout
        let (format, trades) = reconstruct_trades(&table)?;
        if trades.is_empty() {
            return Err(AnalysisError::empty("round-trip trades"));
        }

        // 3. Summarize
        let symbols: Vec<String> = trades
            .iter()
            .map(|t| t.symbol.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        info!(
            trades = trades.len(),
            ?format,
            symbols = ?symbols,
            "Extracted round-trip trades"
        );

        Ok(UploadResponseDto {
            total_trades: trades.len(),
            trades,
            symbols,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trades::TradeFormat;

    const FILLS: &str = "\
Time,Symbol,Price,Quantity,Type,Status,Value,Tag
2024-01-02T10:00:00Z,SPY,100,10,Market,Filled,1000,
2024-01-02T11:00:00Z,AAPL,180,5,Market,Filled,900,
2024-01-03T10:00:00Z,SPY,110,-10,Market,Filled,-1100,Liquidated
2024-01-03T15:00:00Z,AAPL,170,-5,Market,Filled,-850,Liquidated
";

    #[test]
    fn test_fill_export() {
        let response = ParseTradesUseCase::new().execute(FILLS).unwrap();

        assert_eq!(response.format, TradeFormat::OrderFill);
        assert_eq!(response.total_trades, 2);
        assert_eq!(response.symbols, vec!["AAPL", "SPY"]);

        let spy = &response.trades[0];
        assert_eq!(spy.symbol, "SPY");
        assert_eq!(spy.pnl, 100.0);
        assert_eq!(spy.entry_time, "2024-01-02T10:00:00+00:00");
        assert_eq!(spy.exit_time, "2024-01-03T10:00:00+00:00");
        assert_eq!(response.trades[1].pnl, -50.0);
    }

    #[test]
    fn test_summary_export() {
        let text = "\
Entry Time,Exit Time,Symbol,Entry Price,Exit Price,Quantity,P&L
2024-01-02 09:30:00,2024-01-02 16:00:00,QQQ,400,404,10,
2024-01-03 09:30:00,2024-01-03 16:00:00,IWM,200,198,20,-45.5
";
        let response = ParseTradesUseCase::new().execute(text).unwrap();

        assert_eq!(response.format, TradeFormat::Summary);
        assert_eq!(response.symbols, vec!["IWM", "QQQ"]);
        assert_eq!(response.trades[0].pnl, 40.0);
        assert_eq!(response.trades[1].pnl, -45.5);
    }

    #[test]
    fn test_no_round_trips_is_empty_series() {
        let text = "time,symbol,price,quantity\n2024-01-02,SPY,90,-5\n";
        let result = ParseTradesUseCase::new().execute(text);
        assert!(matches!(result, Err(AnalysisError::EmptySeries { .. })));
    }

    #[test]
    fn test_missing_columns() {
        let text = "time,symbol,quantity\n2024-01-02,SPY,5\n";
        match ParseTradesUseCase::new().execute(text) {
            Err(AnalysisError::MissingColumns { missing, present }) => {
                assert_eq!(missing, vec!["price"]);
                assert_eq!(present, vec!["time", "symbol", "quantity"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }
}
