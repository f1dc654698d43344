//! # Bill API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Bill API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► routes ───► services ───► SQLite          │
//! │                                 │                                       │
//! │                                 └──► bearer JWT guard                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use bill_api::{router, ApiConfig, AppState};
use bill_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Bill API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.db_path,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.db_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config)
        .await
        .with_context(|| format!("opening database at {}", config.db_path))?;
    info!("Database ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(db.clone(), config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bill=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
