use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::Config;

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Registered vehicles and their last known position
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            vehicle_id VARCHAR(64) PRIMARY KEY,
            last_latitude VARCHAR(32),
            last_longitude VARCHAR(32),
            registered_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Append-only position log
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS position_logs (
            id BIGSERIAL PRIMARY KEY,
            vehicle_id VARCHAR(64) NOT NULL,
            latitude VARCHAR(32) NOT NULL,
            longitude VARCHAR(32) NOT NULL,
            recorded_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_position_logs_vehicle ON position_logs(vehicle_id, recorded_at)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
