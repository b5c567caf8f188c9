//! Header alias resolution for broker and backtester exports.

use crate::trades::CanonicalField;

/// Header spellings accepted for each canonical field, after trimming and
/// lower-casing. Lists are disjoint.
const ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Time,
        &[
            "time",
            "date",
            "datetime",
            "timestamp",
            "entry time",
            "entry_time",
            "open time",
            "order time",
        ],
    ),
    (
        CanonicalField::ExitTime,
        &["exit_time", "exit time", "close time"],
    ),
    (
        CanonicalField::Symbol,
        &["symbol", "ticker", "instrument", "asset"],
    ),
    (
        CanonicalField::Price,
        &[
            "price",
            "fill price",
            "execution price",
            "avg price",
            "avgprice",
        ],
    ),
    (
        CanonicalField::EntryPrice,
        &["entry_price", "entry price", "open price"],
    ),
    (
        CanonicalField::ExitPrice,
        &["exit_price", "exit price", "close price"],
    ),
    (
        CanonicalField::Quantity,
        &["quantity", "qty", "shares", "size", "amount"],
    ),
    (
        CanonicalField::Pnl,
        &["pnl", "p&l", "profit", "net profit", "realized pnl"],
    ),
    (CanonicalField::Direction, &["direction", "side"]),
];

/// Headers bound to canonical fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeaders {
    columns: Vec<String>,
    bindings: Vec<Option<CanonicalField>>,
}

impl ResolvedHeaders {
    /// Column names in header order. Bound headers carry their canonical
    /// name; the rest are lower-cased.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Canonical field bound to each header position.
    #[must_use]
    pub fn bindings(&self) -> &[Option<CanonicalField>] {
        &self.bindings
    }

    /// Consume into the column list.
    #[must_use]
    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}

/// Normalize a raw header: trimmed and lower-cased.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Bind each canonical field to the first header spelling one of its aliases.
pub fn resolve_headers<S: AsRef<str>>(headers: &[S]) -> ResolvedHeaders {
    let mut columns: Vec<String> = headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect();
    let mut bindings = vec![None; columns.len()];

    for (field, aliases) in ALIASES {
        let position = columns
            .iter()
            .zip(&bindings)
            .position(|(name, bound)| bound.is_none() && aliases.contains(&name.as_str()));
        if let Some(i) = position {
            bindings[i] = Some(*field);
        }
    }

    for (name, bound) in columns.iter_mut().zip(&bindings) {
        if let Some(field) = bound {
            *name = field.as_str().to_string();
        }
    }

    ResolvedHeaders { columns, bindings }
}
