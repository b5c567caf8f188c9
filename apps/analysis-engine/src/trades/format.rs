//! Export layout detection.

use super::table::CanonicalField;
use super::types::TradeFormat;

/// Decide how rows with the given columns should be read.
///
/// Rows are round-trip summaries when both `entry_price` and `exit_price`
/// columns exist; anything else is treated as order fills. Required columns
/// for the chosen reader are checked by that reader.
#[must_use]
pub fn detect_format<S: AsRef<str>>(columns: &[S]) -> TradeFormat {
    let has = |field: CanonicalField| columns.iter().any(|c| c.as_ref() == field.as_str());

    if has(CanonicalField::EntryPrice) && has(CanonicalField::ExitPrice) {
        TradeFormat::Summary
    } else {
        TradeFormat::OrderFill
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(&["time", "symbol", "price", "quantity"], TradeFormat::OrderFill ; "fill export")]
    #[test_case(&["time", "symbol", "entry_price", "exit_price", "quantity"], TradeFormat::Summary ; "summary export")]
    #[test_case(&["time", "entry_price", "price"], TradeFormat::OrderFill ; "entry price only")]
    #[test_case(&["exit_price"], TradeFormat::OrderFill ; "exit price only")]
    #[test_case(&["exit_price", "entry_price"], TradeFormat::Summary ; "column order irrelevant")]
    #[test_case(&[], TradeFormat::OrderFill ; "no columns")]
    fn test_detect_format(columns: &[&str], expected: TradeFormat) {
        assert_eq!(detect_format(columns), expected);
    }
}
