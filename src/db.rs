//! PostgreSQL connection pool bootstrap.

use std::time::{Duration, Instant};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;

/// Open the shared connection pool and verify the store answers.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let started_at = Instant::now();
    info!(
        max_connections = config.db_max_connections,
        db = %config.masked_db_conn(),
        "Connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.db_conn)
        .await
        .map_err(|e| {
            error!(
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %e,
                "Database connection failed"
            );
            e
        })?;

    ping(&pool).await?;
    info!(
        duration_ms = started_at.elapsed().as_millis() as u64,
        "Database connected"
    );
    Ok(pool)
}

/// Round-trip a trivial query.
pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
