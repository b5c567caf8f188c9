//! Error handling for the analysis engine.
//!
//! Every failure in the reconstruction layer, the statistics engines and the
//! CSV ingest is an [`AnalysisError`]. Errors carry enough context for the
//! HTTP layer to build a client-facing body without re-parsing messages.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `MALFORMED_CSV` | 400 | CSV text could not be read |
//! | `INVALID_PARAMETER` | 400 | Unusable analysis parameter |
//! | `MISSING_COLUMNS` | 422 | Required canonical columns absent |
//! | `MISSING_VALUE` | 422 | Required cell left empty |
//! | `INVALID_VALUE` | 422 | Cell could not be converted |
//! | `EMPTY_SERIES` | 422 | No trades to work with |
//! | `INTERNAL` | 500 | Analysis task failed unexpectedly |

use std::collections::HashMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by trade reconstruction, analytics and ingest.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Required canonical columns are absent.
    #[error("missing required columns: {missing:?}; found columns: {present:?}")]
    MissingColumns {
        /// Canonical fields that were required but not found.
        missing: Vec<String>,
        /// Every column actually present in the input.
        present: Vec<String>,
    },

    /// A series that must hold at least one element is empty.
    #[error("{what} is empty")]
    EmptySeries {
        /// What was empty.
        what: &'static str,
    },

    /// A required column exists but the cell for this row is empty.
    #[error("row {row}: required field '{field}' has no value")]
    MissingValue {
        /// Zero-based data row index (header excluded).
        row: usize,
        /// Canonical field name.
        field: &'static str,
    },

    /// A cell could not be converted to the field's type.
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        /// Zero-based data row index (header excluded).
        row: usize,
        /// Column name after alias resolution.
        column: String,
        /// The raw text of the cell.
        value: String,
    },

    /// An analysis parameter cannot be used.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value is rejected.
        reason: String,
    },

    /// The CSV text could not be read.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Stable error codes exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body or parameters rejected before analysis.
    InvalidRequest,
    /// CSV text could not be read.
    MalformedCsv,
    /// Unusable analysis parameter.
    InvalidParameter,
    /// Required canonical columns absent.
    MissingColumns,
    /// Required cell left empty.
    MissingValue,
    /// Cell could not be converted.
    InvalidValue,
    /// No trades to work with.
    EmptySeries,
    /// Analysis task failed unexpectedly.
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::MalformedCsv | Self::InvalidParameter => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingColumns | Self::MissingValue | Self::InvalidValue | Self::EmptySeries => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::MalformedCsv => "MALFORMED_CSV",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::MissingColumns => "MISSING_COLUMNS",
            Self::MissingValue => "MISSING_VALUE",
            Self::InvalidValue => "INVALID_VALUE",
            Self::EmptySeries => "EMPTY_SERIES",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl AnalysisError {
    /// Shorthand for an empty-series failure.
    #[must_use]
    pub const fn empty(what: &'static str) -> Self {
        Self::EmptySeries { what }
    }

    /// Shorthand for a rejected parameter.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingColumns { .. } => ErrorCode::MissingColumns,
            Self::EmptySeries { .. } => ErrorCode::EmptySeries,
            Self::MissingValue { .. } => ErrorCode::MissingValue,
            Self::InvalidValue { .. } => ErrorCode::InvalidValue,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::Csv(_) => ErrorCode::MalformedCsv,
        }
    }

    /// Key-value context attached to the HTTP body.
    #[must_use]
    pub fn context(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();
        match self {
            Self::MissingColumns { missing, present } => {
                details.insert("missing".to_string(), missing.join(","));
                details.insert("present".to_string(), present.join(","));
            }
            Self::EmptySeries { what } => {
                details.insert("what".to_string(), (*what).to_string());
            }
            Self::MissingValue { row, field } => {
                details.insert("row".to_string(), row.to_string());
                details.insert("field".to_string(), (*field).to_string());
            }
            Self::InvalidValue { row, column, value } => {
                details.insert("row".to_string(), row.to_string());
                details.insert("column".to_string(), column.clone());
                details.insert("value".to_string(), value.clone());
            }
            Self::InvalidParameter { name, .. } => {
                details.insert("parameter".to_string(), (*name).to_string());
            }
            Self::Csv(_) => {}
        }
        details
    }

    /// Convert to an HTTP-compatible error response.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code().reason().to_string(),
            message: self.to_string(),
            details: self.context(),
        }
    }
}

/// HTTP-compatible error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    #[serde(default)]
    pub details: HashMap<String, String>,
}

impl HttpErrorResponse {
    /// Build a body for a request rejected before reaching the core.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidRequest.reason().to_string(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Build a body for a failure outside the analysis itself.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal.reason().to_string(),
            message: message.into(),
            details: HashMap::new(),
        }
    }
}
