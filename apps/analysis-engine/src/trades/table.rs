//! Canonical tabular input to the reconstruction layer.
//!
//! Rows arrive already alias-resolved. Column presence is a property of the
//! table; a present column may still leave individual cells empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::Direction;
use crate::error::AnalysisError;

/// A canonical column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Fill time, or entry time on summary rows.
    Time,
    /// Exit time on summary rows.
    ExitTime,
    /// Instrument symbol.
    Symbol,
    /// Fill price.
    Price,
    /// Entry price on summary rows.
    EntryPrice,
    /// Exit price on summary rows.
    ExitPrice,
    /// Signed fill size, or size on summary rows.
    Quantity,
    /// Pre-computed P&L on summary rows.
    Pnl,
    /// `long` / `short` on summary rows.
    Direction,
}

impl CanonicalField {
    /// Column name as it appears after normalization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::ExitTime => "exit_time",
            Self::Symbol => "symbol",
            Self::Price => "price",
            Self::EntryPrice => "entry_price",
            Self::ExitPrice => "exit_price",
            Self::Quantity => "quantity",
            Self::Pnl => "pnl",
            Self::Direction => "direction",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alias-resolved input row. `None` means the cell was empty or the
/// column is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    /// Fill time, or entry time.
    pub time: Option<DateTime<Utc>>,
    /// Exit time.
    pub exit_time: Option<DateTime<Utc>>,
    /// Instrument symbol (trimmed).
    pub symbol: Option<String>,
    /// Fill price.
    pub price: Option<f64>,
    /// Entry price.
    pub entry_price: Option<f64>,
    /// Exit price.
    pub exit_price: Option<f64>,
    /// Quantity (signed for fills).
    pub quantity: Option<f64>,
    /// Pre-computed P&L.
    pub pnl: Option<f64>,
    /// Position direction.
    pub direction: Option<Direction>,
}

impl CanonicalRow {
    /// Return a required value or a [`AnalysisError::MissingValue`] for `row`.
    pub fn require<T: Clone>(
        value: Option<&T>,
        row: usize,
        field: CanonicalField,
    ) -> Result<T, AnalysisError> {
        value.cloned().ok_or(AnalysisError::MissingValue {
            row,
            field: field.as_str(),
        })
    }
}

/// Alias-resolved rows plus the columns they were read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTable {
    columns: Vec<String>,
    rows: Vec<CanonicalRow>,
}

impl CanonicalTable {
    /// Create a table from normalized column names and rows.
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<CanonicalRow>) -> Self {
        Self { columns, rows }
    }

    /// Build a table whose columns are exactly the given canonical fields.
    #[must_use]
    pub fn with_fields(fields: &[CanonicalField], rows: Vec<CanonicalRow>) -> Self {
        let columns = fields.iter().map(|f| f.as_str().to_string()).collect();
        Self { columns, rows }
    }

    /// Column names, canonical and otherwise, in input order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether a canonical column is present.
    #[must_use]
    pub fn has(&self, field: CanonicalField) -> bool {
        self.columns.iter().any(|c| c == field.as_str())
    }

    /// Fail with [`AnalysisError::MissingColumns`] unless every field is present.
    pub fn require_columns(&self, required: &[CanonicalField]) -> Result<(), AnalysisError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|field| !self.has(**field))
            .map(|field| field.as_str().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::MissingColumns {
                missing,
                present: self.columns.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_reports_missing_and_present() {
        let table = CanonicalTable::new(
            vec!["time".to_string(), "symbol".to_string(), "tag".to_string()],
            Vec::new(),
        );

        let err = table
            .require_columns(&[
                CanonicalField::Time,
                CanonicalField::Symbol,
                CanonicalField::Price,
                CanonicalField::Quantity,
            ])
            .unwrap_err();

        match err {
            AnalysisError::MissingColumns { missing, present } => {
                assert_eq!(missing, vec!["price", "quantity"]);
                assert_eq!(present, vec!["time", "symbol", "tag"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_value() {
        let row = CanonicalRow {
            price: Some(10.0),
            ..Default::default()
        };
        assert_eq!(
            CanonicalRow::require(row.price.as_ref(), 0, CanonicalField::Price).unwrap(),
            10.0
        );
        assert!(matches!(
            CanonicalRow::require(row.quantity.as_ref(), 4, CanonicalField::Quantity),
            Err(AnalysisError::MissingValue {
                row: 4,
                field: "quantity"
            })
        ));
    }
}
