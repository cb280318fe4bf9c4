//! Position Log Repository
//!
//! Handles all database operations related to the position log.

use async_trait::async_trait;
use fleet_core::domain::position::PositionLogEntry;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{PositionLogStore, StoreError};

/// Columns bound per inserted row
const BINDS_PER_ROW: usize = 4;

/// Postgres caps a statement at 65535 bind parameters
const MAX_ROWS_PER_STATEMENT: usize = u16::MAX as usize / BINDS_PER_ROW;

/// Split `entries` into runs that each fit in one `INSERT`
fn statement_chunks(entries: &[PositionLogEntry]) -> std::slice::Chunks<'_, PositionLogEntry> {
    entries.chunks(MAX_ROWS_PER_STATEMENT)
}

/// Postgres implementation of PositionLogStore
#[derive(Clone)]
pub struct PgPositionLogStore {
    pool: PgPool,
}

impl PgPositionLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionLogStore for PgPositionLogStore {
    async fn insert_all(&self, entries: Vec<PositionLogEntry>) -> Result<u64, StoreError> {
        if entries.is_empty() {
            return Ok(0);
        }

        // Oversized batches span several statements; the transaction keeps
        // the write all-or-nothing.
        let mut tx = self.pool.begin().await?;
        let mut written: u64 = 0;

        for chunk in statement_chunks(&entries) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO position_logs (vehicle_id, latitude, longitude, recorded_at) ",
            );

            builder.push_values(chunk, |mut row, entry| {
                row.push_bind(entry.vehicle_id.clone())
                    .push_bind(entry.latitude.clone())
                    .push_bind(entry.longitude.clone())
                    .push_bind(entry.recorded_at);
            });

            let result = builder.build().execute(&mut *tx).await?;
            written += result.rows_affected();
        }

        tx.commit().await?;

        Ok(written)
    }
}
