//! # RBAC Lens HTTP Server
//!
//! Serves the principal-inspection endpoints over a cluster RBAC snapshot.
//!
//! ## Endpoints
//!
//! - `GET /v1/rbac/users/details?userName=` — bindings and cluster roles for a user
//! - `GET /v1/rbac/serviceaccounts/details?serviceAccountName=` — same for a service account
//! - `GET /v1/rbac/users/roles?userName=` — flat role-name list for a user
//! - `GET /health` — health check
//!
//! ## Configuration
//!
//! Environment variables:
//! - `PORT` — HTTP server port (default: 8080)
//! - `BIND_ADDR` — listen address (default: 0.0.0.0)
//! - `SNAPSHOT_PATH` — JSON cluster snapshot file (default: empty snapshot)
//! - `RUST_LOG` — log level (default: info)

use anyhow::Context;
use axum::serve;
use rbac_lens_api::{router, AllowAll, ApiConfig, AppState, SnapshotClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }

    info!("Starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RBAC Lens server v{}", rbac_lens_api::VERSION);

    let config = ApiConfig::from_env();
    info!("Configuration:");
    info!("  Bind: {}:{}", config.bind_addr, config.port);
    info!(
        "  Snapshot: {}",
        config.snapshot_path.as_deref().unwrap_or("<empty>")
    );

    let client = match &config.snapshot_path {
        Some(path) => SnapshotClient::from_file(path)
            .with_context(|| format!("failed to load snapshot from {}", path))?,
        None => SnapshotClient::default(),
    };

    let state = AppState::new(Arc::new(client), Arc::new(AllowAll));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let app = router(state).layer(ServiceBuilder::new().layer(trace).layer(cors));

    let addr = SocketAddr::from((config.bind_addr, config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down gracefully");
    Ok(())
}
