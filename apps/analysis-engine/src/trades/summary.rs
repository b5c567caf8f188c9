//! Normalization of exports that already list one row per round trip.

use tracing::debug;

use super::table::{CanonicalField, CanonicalRow, CanonicalTable};
use super::types::{Trade, format_timestamp, round_pnl};
use crate::error::AnalysisError;

/// Columns a summary export must provide.
pub const SUMMARY_COLUMNS: [CanonicalField; 5] = [
    CanonicalField::Time,
    CanonicalField::Symbol,
    CanonicalField::EntryPrice,
    CanonicalField::ExitPrice,
    CanonicalField::Quantity,
];

/// Convert pre-aggregated round-trip rows into trades, in input order.
///
/// A supplied `pnl` is taken as-is since it may already include fees and
/// adjustments. Otherwise it is derived from prices and size, negated for
/// short rows. Missing `exit_time` falls back to `time`.
///
/// # Errors
///
/// - [`AnalysisError::MissingColumns`] if a [`SUMMARY_COLUMNS`] column is absent.
/// - [`AnalysisError::MissingValue`] if a row leaves a required cell empty.
pub fn normalize_summaries(table: &CanonicalTable) -> Result<Vec<Trade>, AnalysisError> {
    table.require_columns(&SUMMARY_COLUMNS)?;

    let trades = table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| summary_trade(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = table.len(), trades = trades.len(), "Normalized round-trip rows");

    Ok(trades)
}

fn summary_trade(index: usize, row: &CanonicalRow) -> Result<Trade, AnalysisError> {
    let entry_time = CanonicalRow::require(row.time.as_ref(), index, CanonicalField::Time)?;
    let symbol = CanonicalRow::require(row.symbol.as_ref(), index, CanonicalField::Symbol)?;
    let entry_price = CanonicalRow::require(row.entry_price.as_ref(), index, CanonicalField::EntryPrice)?;
    let exit_price = CanonicalRow::require(row.exit_price.as_ref(), index, CanonicalField::ExitPrice)?;
    let quantity = CanonicalRow::require(row.quantity.as_ref(), index, CanonicalField::Quantity)?.abs();
    let exit_time = row.exit_time.unwrap_or(entry_time);

    let pnl = row.pnl.unwrap_or_else(|| {
        let direction = row.direction.unwrap_or_default();
        direction.sign() * (exit_price - entry_price) * quantity
    });

    Ok(Trade {
        symbol,
        entry_time: format_timestamp(&entry_time),
        exit_time: format_timestamp(&exit_time),
        quantity,
        entry_price,
        exit_price,
        pnl: round_pnl(pnl),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::trades::types::Direction;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 15, 0, 0).unwrap()
    }

    fn summary(day: u32, entry: f64, exit: f64, quantity: f64) -> CanonicalRow {
        CanonicalRow {
            time: Some(at(day)),
            exit_time: Some(at(day + 1)),
            symbol: Some("QQQ".to_string()),
            entry_price: Some(entry),
            exit_price: Some(exit),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    fn table(rows: Vec<CanonicalRow>) -> CanonicalTable {
        let mut fields = SUMMARY_COLUMNS.to_vec();
        fields.extend([
            CanonicalField::ExitTime,
            CanonicalField::Pnl,
            CanonicalField::Direction,
        ]);
        CanonicalTable::with_fields(&fields, rows)
    }

    #[test]
    fn test_long_pnl_is_derived() {
        let trades = normalize_summaries(&table(vec![summary(1, 100.0, 104.5, 20.0)])).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].pnl, 90.0);
        assert_eq!(trades[0].entry_time, "2024-03-01T15:00:00+00:00");
        assert_eq!(trades[0].exit_time, "2024-03-02T15:00:00+00:00");
    }

    #[test]
    fn test_short_pnl_is_negated() {
        let mut row = summary(1, 100.0, 90.0, 5.0);
        row.direction = Some(Direction::Short);

        let trades = normalize_summaries(&table(vec![row])).unwrap();

        assert_eq!(trades[0].pnl, 50.0);
    }

    #[test]
    fn test_supplied_pnl_wins() {
        let mut row = summary(1, 100.0, 110.0, 1.0);
        row.pnl = Some(7.123_456_7);
        row.direction = Some(Direction::Short);

        let trades = normalize_summaries(&table(vec![row])).unwrap();

        assert_eq!(trades[0].pnl, 7.1235);
    }

    #[test]
    fn test_null_pnl_cell_falls_back_to_prices() {
        let text = "\
time,symbol,entry_price,exit_price,quantity,pnl
2024-01-02,X,100,110,1,NaN
2024-01-03,X,100,90,2,N/A
2024-01-04,X,100,90,2,-3.5
";
        let table = crate::ingest::parse_csv(text).unwrap();

        let pnls: Vec<f64> = normalize_summaries(&table)
            .unwrap()
            .iter()
            .map(|t| t.pnl)
            .collect();

        assert_eq!(pnls, vec![10.0, -20.0, -3.5]);
    }

    #[test]
    fn test_quantity_is_absolute() {
        let trades = normalize_summaries(&table(vec![summary(1, 10.0, 12.0, -3.0)])).unwrap();

        assert_eq!(trades[0].quantity, 3.0);
        assert_eq!(trades[0].pnl, 6.0);
    }

    #[test]
    fn test_exit_time_defaults_to_entry_time() {
        let mut row = summary(4, 10.0, 11.0, 1.0);
        row.exit_time = None;

        let trades = normalize_summaries(&table(vec![row])).unwrap();

        assert_eq!(trades[0].exit_time, trades[0].entry_time);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let rows = vec![
            summary(9, 1.0, 2.0, 1.0),
            summary(1, 1.0, 3.0, 1.0),
            summary(5, 1.0, 4.0, 1.0),
        ];

        let pnls: Vec<f64> = normalize_summaries(&table(rows))
            .unwrap()
            .iter()
            .map(|t| t.pnl)
            .collect();

        assert_eq!(pnls, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_columns() {
        let table = CanonicalTable::with_fields(
            &[
                CanonicalField::Symbol,
                CanonicalField::EntryPrice,
                CanonicalField::ExitPrice,
            ],
            vec![],
        );

        match normalize_summaries(&table).unwrap_err() {
            AnalysisError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["time", "quantity"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_entry_price_cell() {
        let mut row = summary(1, 10.0, 11.0, 1.0);
        row.entry_price = None;

        assert!(matches!(
            normalize_summaries(&table(vec![row])),
            Err(AnalysisError::MissingValue {
                row: 0,
                field: "entry_price"
            })
        ));
    }
}
