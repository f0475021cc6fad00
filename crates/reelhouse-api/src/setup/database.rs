//! Database connection setup

use anyhow::{Context, Result};
use reelhouse_core::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Connect and migrate when `DATABASE_URL` is set. `None` selects the
/// in-memory video store.
pub async fn setup_database(config: &Config) -> Result<Option<PgPool>> {
    let Some(database_url) = config.database.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; video records are kept in memory");
        return Ok(None);
    };

    tracing::info!(
        max_connections = config.database.max_connections,
        timeout_seconds = config.database.timeout_seconds,
        "Connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Database connection established");

    let migrations_path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    sqlx::migrate::Migrator::new(migrations_path)
        .await
        .context("Failed to load migrations")?
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed successfully");

    Ok(Some(pool))
}
