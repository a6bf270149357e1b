//! Main entry point for the authgate server.
//!
//! Loads configuration, opens the database pool, registers the routes and
//! serves until Ctrl+C, then closes the pool. Migrations are not applied
//! here; run `authgate-migrate` first.

use anyhow::{Context, Result};
use authgate::config::Config;
use authgate::database::Database;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    authgate::init_tracing();

    let config = Config::from_env()?;
    let db = Database::new(&config.database).await?;

    let auth_service = authgate::build_auth_service(&config, db.pool().clone())?;
    let app = authgate::build_app(auth_service);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting authgate server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    db.close().await;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
