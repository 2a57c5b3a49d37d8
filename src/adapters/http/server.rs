//! HTTP Server
//!
//! Server lifecycle: bind the configured address, serve the router, and
//! drain connections on Ctrl-C.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::ports::SourceError;

use super::routes::create_router;
use super::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to initialize sources: {0}")]
    Init(#[from] SourceError),

    #[error("invalid bind address '{addr}': {reason}")]
    Address { addr: String, reason: String },

    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: SocketAddr, reason: String },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Starts the relay and blocks until shutdown.
pub async fn run_server(config: &Config) -> Result<(), ServerError> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let host = &config.server.host;
    let port = config.server.effective_port();
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e: std::net::AddrParseError| ServerError::Address {
            addr: format!("{}:{}", host, port),
            reason: e.to_string(),
        })?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| ServerError::Bind {
        addr,
        reason: match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                "address already in use (is another instance running? pick a different port via --port or PORT)"
                    .to_string()
            }
            std::io::ErrorKind::PermissionDenied => {
                "permission denied (ports below 1024 need elevated privileges)".to_string()
            }
            _ => e.to_string(),
        },
    })?;

    info!("Listening on http://{}", addr);
    info!("  GET  /                        service health");
    info!("  GET  /api/coins               coin board with fallback");
    info!("  GET  /api/coins/aggregated    merged multi-source board");
    info!("  GET  /api/coin/:address       raw single-coin passthrough");
    info!("  POST /api/jupiter/quote       swap quote");
    info!("  POST /api/jupiter/swap        swap transaction build");
    info!("  GET  /api/price-history/:mint synthetic candles");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(err) => {
            // without a handler the only way out is SIGKILL; keep serving
            error!("Failed to install Ctrl-C handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
