//! Analysis Engine Binary
//!
//! Serves trade reconstruction and Monte Carlo analysis over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin analysis-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ANALYSIS_ENGINE_CONFIG`: YAML config path (default: config.yaml, optional)
//! - `RUST_LOG`: Log filter (default: `observability.log_level`)

use std::net::SocketAddr;

use analysis_engine::config::{Config, config_path, load_config};
use analysis_engine::infrastructure::http::{AppState, create_router};
use analysis_engine::telemetry::init_telemetry;
use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path();
    let config = load_config(Some(&path)).with_context(|| format!("loading {path}"))?;

    let guard = init_telemetry(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_path = %path,
        otel_exporting = guard.is_exporting(),
        "Starting analysis engine"
    );
    log_config(&config);

    start_http_server(&config).await?;

    tracing::info!("Analysis engine stopped");
    Ok(())
}

/// Log the effective configuration.
fn log_config(config: &Config) {
    tracing::info!(
        bind_address = %config.server.bind_address,
        http_port = config.server.http_port,
        max_upload_bytes = config.server.max_upload_bytes,
        initial_capital = config.analysis.initial_capital,
        n_simulations = config.analysis.n_simulations,
        n_sample_paths = config.analysis.n_sample_paths,
        seed = config.analysis.seed,
        otel_enabled = config.observability.otel_enabled,
        "Configuration loaded"
    );
}

/// Run the HTTP server until a shutdown signal arrives.
async fn start_http_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config.analysis.clone(), env!("CARGO_PKG_VERSION"));
    let app = create_router(state, config.server.max_upload_bytes);

    let http_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .context("invalid bind address")?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /upload");
    tracing::info!("  POST /analyze");

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("binding {http_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
