//! Vehicle Repository
//!
//! Handles all database operations related to vehicle summaries.

use async_trait::async_trait;
use fleet_core::domain::vehicle::{VehicleLookup, VehicleSummary};
use sqlx::PgPool;

use super::{StoreError, VehicleRegistry};

/// Postgres implementation of VehicleRegistry
#[derive(Clone)]
pub struct PgVehicleRegistry {
    pool: PgPool,
}

impl PgVehicleRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRegistry for PgVehicleRegistry {
    async fn find_by_vehicle_id(&self, vehicle_id: &str) -> Result<VehicleLookup, StoreError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT vehicle_id, last_latitude, last_longitude, registered_at
            FROM vehicles
            WHERE vehicle_id = $1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VehicleSummary::from).into())
    }

    async fn save(&self, summary: VehicleSummary) -> Result<VehicleSummary, StoreError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET last_latitude = $1, last_longitude = $2
            WHERE vehicle_id = $3
            RETURNING vehicle_id, last_latitude, last_longitude, registered_at
            "#,
        )
        .bind(&summary.last_latitude)
        .bind(&summary.last_longitude)
        .bind(&summary.vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(VehicleSummary::from)
            .ok_or(StoreError::VehicleMissing(summary.vehicle_id))
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct VehicleRow {
    vehicle_id: String,
    last_latitude: Option<String>,
    last_longitude: Option<String>,
    registered_at: chrono::DateTime<chrono::Utc>,
}

impl From<VehicleRow> for VehicleSummary {
    fn from(row: VehicleRow) -> Self {
        VehicleSummary {
            vehicle_id: row.vehicle_id,
            last_latitude: row.last_latitude,
            last_longitude: row.last_longitude,
            registered_at: row.registered_at,
        }
    }
}
