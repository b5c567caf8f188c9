//! Trade reconstruction from raw exports.
//!
//! Two export layouts are supported:
//!
//! - **Order fills**: one row per fill, matched into round trips per symbol
//!   with FIFO queues ([`match_round_trips`]).
//! - **Summaries**: one row per completed round trip, normalized directly
//!   ([`normalize_summaries`]).
//!
//! [`detect_format`] picks the layout from the available columns.

mod fifo;
mod format;
mod summary;
mod table;
mod types;

pub use fifo::{FILL_COLUMNS, match_round_trips};
pub use format::detect_format;
pub use summary::{SUMMARY_COLUMNS, normalize_summaries};
pub use table::{CanonicalField, CanonicalRow, CanonicalTable};
pub use types::{
    Direction, OpenPosition, PNL_DECIMAL_PLACES, Trade, TradeFormat, format_timestamp, round_pnl,
};

use crate::error::AnalysisError;

/// Detect the table's layout and reconstruct its trades.
///
/// Returns the detected format alongside the trades.
pub fn reconstruct_trades(
    table: &CanonicalTable,
) -> Result<(TradeFormat, Vec<Trade>), AnalysisError> {
    let format = detect_format(table.columns());
    let trades = match format {
        TradeFormat::OrderFill => match_round_trips(table)?,
        TradeFormat::Summary => normalize_summaries(table)?,
    };
    Ok((format, trades))
}
