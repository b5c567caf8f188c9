//! FIFO round-trip matching of order fills.
//!
//! Exports that list every fill as its own row encode an open as a positive
//! quantity and a close as a negative one. Closes consume the oldest open lot
//! of the same symbol.
//!
//! A close always retires exactly one whole lot. When the closing size
//! differs from the lot size the trade is reported with the closing size and
//! nothing is carried forward; partial fills are not split.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::table::{CanonicalField, CanonicalRow, CanonicalTable};
use super::types::{OpenPosition, Trade, format_timestamp, round_pnl};
use crate::error::AnalysisError;

/// Columns a fill export must provide.
pub const FILL_COLUMNS: [CanonicalField; 4] = [
    CanonicalField::Time,
    CanonicalField::Symbol,
    CanonicalField::Price,
    CanonicalField::Quantity,
];

/// A fill row with every required value present.
#[derive(Debug, Clone)]
struct Fill {
    time: DateTime<Utc>,
    symbol: String,
    price: f64,
    quantity: f64,
}

impl Fill {
    fn from_row(index: usize, row: &CanonicalRow) -> Result<Self, AnalysisError> {
        Ok(Self {
            time: CanonicalRow::require(row.time.as_ref(), index, CanonicalField::Time)?,
            symbol: CanonicalRow::require(row.symbol.as_ref(), index, CanonicalField::Symbol)?,
            price: CanonicalRow::require(row.price.as_ref(), index, CanonicalField::Price)?,
            quantity: CanonicalRow::require(row.quantity.as_ref(), index, CanonicalField::Quantity)?,
        })
    }
}

/// Match order fills into round-trip trades.
///
/// Rows are stable-sorted by time, so fills sharing a timestamp keep their
/// input order. Trades come back in the order they closed.
///
/// # Errors
///
/// - [`AnalysisError::MissingColumns`] if a [`FILL_COLUMNS`] column is absent.
/// - [`AnalysisError::MissingValue`] if a row leaves a required cell empty.
pub fn match_round_trips(table: &CanonicalTable) -> Result<Vec<Trade>, AnalysisError> {
    table.require_columns(&FILL_COLUMNS)?;

    let mut fills = table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| Fill::from_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;
    fills.sort_by_key(|fill| fill.time);

    let mut open: HashMap<String, VecDeque<OpenPosition>> = HashMap::new();
    let mut trades = Vec::new();
    let mut dropped_closes = 0_usize;

    for fill in fills {
        if fill.quantity > 0.0 {
            open.entry(fill.symbol).or_default().push_back(OpenPosition {
                entry_time: fill.time,
                entry_price: fill.price,
                quantity: fill.quantity,
            });
        } else if fill.quantity < 0.0 {
            let Some(entry) = open.get_mut(&fill.symbol).and_then(VecDeque::pop_front) else {
                dropped_closes += 1;
                continue;
            };

            let exit_qty = fill.quantity.abs();
            let pnl = (fill.price - entry.entry_price) * exit_qty;

            trades.push(Trade {
                entry_time: format_timestamp(&entry.entry_time),
                exit_time: format_timestamp(&fill.time),
                symbol: fill.symbol,
                quantity: exit_qty,
                entry_price: entry.entry_price,
                exit_price: fill.price,
                pnl: round_pnl(pnl),
            });
        }
    }

    let unmatched_opens: usize = open.values().map(VecDeque::len).sum();
    debug!(
        rows = table.len(),
        trades = trades.len(),
        dropped_closes,
        unmatched_opens,
        "Matched fills into round trips"
    );

    Ok(trades)
}
