//! CSV text to a canonical table.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::aliases::resolve_headers;
use crate::error::AnalysisError;
use crate::trades::{CanonicalField, CanonicalRow, CanonicalTable, Direction};

/// Naive date-time layouts, interpreted as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, taken at midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Cell texts read as missing values, compared case-insensitively.
const NULL_TOKENS: &[&str] = &[
    "nan", "-nan", "na", "n/a", "#n/a", "#na", "null", "none", "<na>",
];

/// Parse CSV text into a canonical table.
///
/// Headers are resolved through the alias table; cells of bound columns are
/// converted to their field types. Empty cells, null markers such as `NaN`
/// or `N/A`, and non-finite numbers are left unset.
///
/// # Errors
///
/// - [`AnalysisError::Csv`] if the text is not well-formed CSV.
/// - [`AnalysisError::InvalidValue`] if a bound cell cannot be converted.
pub fn parse_csv(text: &str) -> Result<CanonicalTable, AnalysisError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let resolved = resolve_headers(&headers.iter().collect::<Vec<_>>());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = CanonicalRow::default();
        for ((cell, binding), column) in record
            .iter()
            .zip(resolved.bindings())
            .zip(resolved.columns())
        {
            let Some(field) = binding else { continue };
            if is_null(cell) {
                continue;
            }
            assign(&mut row, *field, cell).ok_or_else(|| AnalysisError::InvalidValue {
                row: index,
                column: column.clone(),
                value: cell.to_string(),
            })?;
        }
        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        columns = ?resolved.columns(),
        "Parsed CSV"
    );

    Ok(CanonicalTable::new(resolved.into_columns(), rows))
}

/// Store `cell` in `row`. `None` if the text does not convert.
fn assign(row: &mut CanonicalRow, field: CanonicalField, cell: &str) -> Option<()> {
    match field {
        CanonicalField::Time => row.time = Some(parse_timestamp(cell)?),
        CanonicalField::ExitTime => row.exit_time = Some(parse_timestamp(cell)?),
        CanonicalField::Symbol => row.symbol = Some(cell.to_string()),
        CanonicalField::Price => row.price = finite(parse_number(cell)?),
        CanonicalField::EntryPrice => row.entry_price = finite(parse_number(cell)?),
        CanonicalField::ExitPrice => row.exit_price = finite(parse_number(cell)?),
        CanonicalField::Quantity => row.quantity = finite(parse_number(cell)?),
        CanonicalField::Pnl => row.pnl = finite(parse_number(cell)?),
        CanonicalField::Direction => row.direction = Some(Direction::from_label(cell)),
    }
    Some(())
}

fn is_null(cell: &str) -> bool {
    cell.is_empty()
        || NULL_TOKENS
            .iter()
            .any(|token| cell.eq_ignore_ascii_case(token))
}

/// Parse a number, tolerating thousands separators.
fn parse_number(cell: &str) -> Option<f64> {
    cell.replace(',', "").parse().ok()
}

/// Non-finite values are stored as missing.
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Parse an RFC 3339 timestamp or a naive layout taken as UTC.
pub fn parse_timestamp(cell: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(cell) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(ts.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use test_case::test_case;

    use super::*;
    use crate::trades::{TradeFormat, detect_format};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test_case("2024-01-02T10:00:00Z", utc(2024, 1, 2, 10, 0, 0))]
    #[test_case("2024-01-02T12:00:00+02:00", utc(2024, 1, 2, 10, 0, 0))]
    #[test_case("2024-01-02 10:00:00+00:00", utc(2024, 1, 2, 10, 0, 0))]
    #[test_case("2024-01-02 10:00:00", utc(2024, 1, 2, 10, 0, 0))]
    #[test_case("2024-01-02T10:00:00.250", utc(2024, 1, 2, 10, 0, 0) + TimeDelta::milliseconds(250))]
    #[test_case("2024-01-02 10:00", utc(2024, 1, 2, 10, 0, 0))]
    #[test_case("01/02/2024 10:00:00", utc(2024, 1, 2, 10, 0, 0))]
    #[test_case("2024-01-02", utc(2024, 1, 2, 0, 0, 0))]
    #[test_case("01/02/2024", utc(2024, 1, 2, 0, 0, 0))]
    fn test_parse_timestamp(text: &str, expected: DateTime<Utc>) {
        assert_eq!(parse_timestamp(text), Some(expected));
    }

    #[test_case("yesterday")]
    #[test_case("2024-13-40")]
    #[test_case("10:00")]
    fn test_parse_timestamp_rejects(text: &str) {
        assert_eq!(parse_timestamp(text), None);
    }

    #[test]
    fn test_parse_fill_export() {
        let text = "\
Time,Symbol,Price,Quantity,Type,Tag
2024-01-02T10:00:00Z,SPY,100.0,10,Market,
2024-01-03T10:00:00Z,SPY,110.0,-10,Market,Liquidated
";
        let table = parse_csv(text).unwrap();

        assert_eq!(
            table.columns(),
            &["time", "symbol", "price", "quantity", "type", "tag"]
        );
        assert_eq!(detect_format(table.columns()), TradeFormat::OrderFill);
        assert_eq!(table.len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.time, Some(utc(2024, 1, 2, 10, 0, 0)));
        assert_eq!(first.symbol.as_deref(), Some("SPY"));
        assert_eq!(first.price, Some(100.0));
        assert_eq!(first.quantity, Some(10.0));
        assert_eq!(table.rows()[1].quantity, Some(-10.0));
    }

    #[test]
    fn test_parse_summary_export() {
        let text = "\
Entry Time,Exit Time,Ticker,Side,Entry Price,Exit Price,Qty,P&L
2024-01-02 09:30:00,2024-01-02 15:59:00,QQQ,Short,400.5,395.25,\"1,000\",
";
        let table = parse_csv(text).unwrap();
        assert_eq!(detect_format(table.columns()), TradeFormat::Summary);

        let row = &table.rows()[0];
        assert_eq!(row.time, Some(utc(2024, 1, 2, 9, 30, 0)));
        assert_eq!(row.exit_time, Some(utc(2024, 1, 2, 15, 59, 0)));
        assert_eq!(row.symbol.as_deref(), Some("QQQ"));
        assert_eq!(row.direction, Some(Direction::Short));
        assert_eq!(row.entry_price, Some(400.5));
        assert_eq!(row.exit_price, Some(395.25));
        assert_eq!(row.quantity, Some(1000.0));
        assert_eq!(row.pnl, None);
    }

    #[test]
    fn test_cells_are_trimmed_and_empty_cells_unset() {
        let table = parse_csv("symbol , price\n  SPY  ,   \n").unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.symbol.as_deref(), Some("SPY"));
        assert_eq!(row.price, None);
    }

    #[test_case("NaN")]
    #[test_case("nan")]
    #[test_case("N/A")]
    #[test_case("NA")]
    #[test_case("null")]
    #[test_case("NULL")]
    #[test_case("inf")]
    #[test_case("-Infinity")]
    fn test_null_markers_leave_number_unset(marker: &str) {
        let text = format!(
            "time,symbol,entry_price,exit_price,quantity,pnl\n2024-01-02,X,100,110,1,{marker}\n"
        );
        let table = parse_csv(&text).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.pnl, None);
        assert_eq!(row.exit_price, Some(110.0));
    }

    #[test]
    fn test_null_marker_leaves_timestamp_unset() {
        let table = parse_csv("time,exit_time,symbol\n2024-01-02,N/A,X\n").unwrap();
        assert_eq!(table.rows()[0].exit_time, None);
        assert_eq!(table.rows()[0].time, Some(utc(2024, 1, 2, 0, 0, 0)));
    }

    #[test]
    fn test_unbound_columns_are_not_converted() {
        let table = parse_csv("symbol,notes\nSPY,not a number\n").unwrap();
        assert_eq!(table.columns(), &["symbol", "notes"]);
        assert_eq!(table.rows()[0].symbol.as_deref(), Some("SPY"));
    }

    #[test]
    fn test_invalid_number_reports_cell() {
        let text = "time,symbol,price,quantity\n2024-01-02,SPY,100,10\n2024-01-03,SPY,abc,-10\n";
        match parse_csv(text) {
            Err(AnalysisError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "price");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_timestamp_reports_cell() {
        let result = parse_csv("date,symbol\nsoon,SPY\n");
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidValue { row: 0, ref column, .. }) if column == "time"
        ));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let result = parse_csv("time,symbol,price\n2024-01-02,SPY\n");
        assert!(matches!(result, Err(AnalysisError::Csv(_))));
    }

    #[test]
    fn test_header_only() {
        let table = parse_csv("time,symbol,price,quantity\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 4);
    }
}
