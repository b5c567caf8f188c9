//! HTTP response DTOs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ErrorCode, HttpErrorResponse};

/// Response from health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Error returned by a handler: a status plus a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: HttpErrorResponse,
}

impl ApiError {
    /// Reject a request before it reaches a use case.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: ErrorCode::InvalidRequest.http_status(),
            body: HttpErrorResponse::invalid_request(message),
        }
    }

    /// Report a failure of the analysis task itself.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: ErrorCode::Internal.http_status(),
            body: HttpErrorResponse::internal(message),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        Self {
            status: error.code().http_status(),
            body: error.to_http_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
