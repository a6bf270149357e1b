//! One-shot schema migration runner.
//!
//! Applies the embedded migrations to `DATABASE_URL`, creating the SQLite
//! file if needed, and exits non-zero if anything fails.

use anyhow::Result;
use authgate::config::DatabaseConfig;
use authgate::database::Database;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    authgate::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error during migration: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = DatabaseConfig::from_env()?;
    let db = Database::new(&config).await?;

    let result = db.migrate().await;
    db.close().await;

    let versions = result?;
    info!(applied = ?versions, "Migrations up to date");

    Ok(())
}
