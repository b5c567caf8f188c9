//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases. Analysis is
//! CPU bound and runs on the blocking pool.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    routing::{get, post},
};
use tracing::{error, warn};

use crate::application::dto::{AnalysisResponseDto, UploadResponseDto};
use crate::application::use_cases::{AnalyzeTradesUseCase, ParseTradesUseCase};
use crate::config::AnalysisConfig;

use super::request::AnalyzeRequest;
use super::response::{ApiError, HealthResponse};

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Use case for parsing uploaded exports.
    pub parse_trades: Arc<ParseTradesUseCase>,
    /// Use case for running the analysis.
    pub analyze_trades: Arc<AnalyzeTradesUseCase>,
    /// Application version.
    pub version: String,
}

impl AppState {
    /// Build state from analysis defaults.
    pub fn new(analysis: AnalysisConfig, version: impl Into<String>) -> Self {
        Self {
            parse_trades: Arc::new(ParseTradesUseCase::new()),
            analyze_trades: Arc::new(AnalyzeTradesUseCase::new(analysis)),
            version: version.into(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/upload", post(upload))
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
    })
}

/// Upload endpoint: CSV export in the body, round-trip trades out.
async fn upload(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadResponseDto>, ApiError> {
    let text = String::from_utf8(body.to_vec())
        .map_err(|_| ApiError::invalid_request("upload must be UTF-8 CSV text"))?;
    if text.trim().is_empty() {
        return Err(ApiError::invalid_request("upload is empty"));
    }

    let use_case = Arc::clone(&state.parse_trades);
    let result = tokio::task::spawn_blocking(move || use_case.execute(&text))
        .await
        .map_err(|e| {
            error!(error = %e, "Upload task failed");
            ApiError::internal("upload task failed")
        })?;

    result.map(Json).map_err(|e| {
        warn!(code = %e.code(), error = %e, "Upload rejected");
        ApiError::from(e)
    })
}

/// Analyze endpoint: trades in, metrics and Monte Carlo projection out.
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponseDto>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed analyze request");
        ApiError::invalid_request(rejection.body_text())
    })?;

    let use_case = Arc::clone(&state.analyze_trades);
    let result = tokio::task::spawn_blocking(move || use_case.execute(request.into()))
        .await
        .map_err(|e| {
            error!(error = %e, "Analysis task failed");
            ApiError::internal("analysis task failed")
        })?;

    result.map(Json).map_err(|e| {
        warn!(code = %e.code(), error = %e, "Analysis rejected");
        ApiError::from(e)
    })
}
