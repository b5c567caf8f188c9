//! Round-trip trade record and the types the reconstruction layer shares.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept on every reconstructed P&L value.
pub const PNL_DECIMAL_PLACES: u32 = 4;

/// A single round-trip trade (entry fill -> exit fill).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Instrument symbol.
    pub symbol: String,
    /// Entry timestamp (ISO 8601).
    pub entry_time: String,
    /// Exit timestamp (ISO 8601).
    pub exit_time: String,
    /// Absolute position size.
    pub quantity: f64,
    /// Entry price.
    pub entry_price: f64,
    /// Exit price.
    pub exit_price: f64,
    /// Realized P&L, rounded to [`PNL_DECIMAL_PLACES`].
    pub pnl: f64,
}

impl Trade {
    /// Entry notional (`|entry_price × quantity|`).
    #[must_use]
    pub fn entry_notional(&self) -> f64 {
        (self.entry_price * self.quantity).abs()
    }
}

/// An open lot waiting in a symbol's FIFO queue.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPosition {
    /// When the lot was opened.
    pub entry_time: DateTime<Utc>,
    /// Fill price of the opening row.
    pub entry_price: f64,
    /// Size of the opening row. Not reconciled against the closing size.
    pub quantity: f64,
}

/// Position direction on a pre-aggregated row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Profit when price rises.
    #[default]
    Long,
    /// Profit when price falls.
    Short,
}

impl Direction {
    /// Parse an export label. `short` and `sell` are short, anything else long.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "short" | "sell" => Self::Short,
            _ => Self::Long,
        }
    }

    /// Sign applied to `(exit − entry) × quantity`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

/// Layout of a trade export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeFormat {
    /// One row per order fill; round trips must be matched.
    OrderFill,
    /// One row per completed round trip.
    Summary,
}

/// Round a P&L value to [`PNL_DECIMAL_PLACES`], half-to-even on the exact
/// binary value.
///
/// Values that do not fit a `Decimal` (non-finite or astronomically large)
/// are returned unchanged.
#[must_use]
pub fn round_pnl(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(PNL_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Format a timestamp the way trades carry it (`2024-01-02T10:00:00+00:00`).
///
/// Sub-second values are written with microsecond precision.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let precision = if ts.timestamp_subsec_nanos() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(precision, false)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    #[test]
    fn test_round_pnl() {
        assert_eq!(round_pnl(100.0), 100.0);
        assert_eq!(round_pnl(1.234_56), 1.2346);
        assert_eq!(round_pnl(-0.000_04), -0.0);
        assert_eq!(round_pnl((110.1 - 100.0) * 3.0), 30.3);
    }

    #[test]
    fn test_round_pnl_passes_through_non_finite() {
        assert!(round_pnl(f64::NAN).is_nan());
        assert_eq!(round_pnl(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::from_label("short"), Direction::Short);
        assert_eq!(Direction::from_label(" SELL "), Direction::Short);
        assert_eq!(Direction::from_label("long"), Direction::Long);
        assert_eq!(Direction::from_label("buy"), Direction::Long);
        assert_eq!(Direction::from_label(""), Direction::Long);
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-02T10:30:00+00:00");
    }

    #[test]
    fn test_format_timestamp_sub_second() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap()
            + TimeDelta::milliseconds(250);
        assert_eq!(format_timestamp(&ts), "2024-01-02T10:30:00.250000+00:00");
    }

    #[test]
    fn test_entry_notional_is_absolute() {
        let trade = Trade {
            symbol: "SPY".to_string(),
            entry_time: "2024-01-02T10:00:00+00:00".to_string(),
            exit_time: "2024-01-02T11:00:00+00:00".to_string(),
            quantity: 10.0,
            entry_price: -5.0,
            exit_price: 1.0,
            pnl: 60.0,
        };
        assert_eq!(trade.entry_notional(), 50.0);
    }
}
