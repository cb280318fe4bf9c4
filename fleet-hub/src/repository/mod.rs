//! Repository Module
//!
//! Data access layer for the hub.
//! Each repository is a trait so services can be tested without a database;
//! the Postgres implementations live in the submodules.

pub mod position_log;
pub mod vehicle;

use async_trait::async_trait;
use fleet_core::domain::position::PositionLogEntry;
use fleet_core::domain::vehicle::{VehicleLookup, VehicleSummary};
use thiserror::Error;

pub use position_log::PgPositionLogStore;
pub use vehicle::PgVehicleRegistry;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected or failed the operation
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The vehicle row disappeared between lookup and save
    #[error("vehicle {0} no longer exists")]
    VehicleMissing(String),
}

impl StoreError {
    /// Whether repeating the same write could succeed
    ///
    /// Data exceptions (SQLSTATE class 22) and integrity violations (class 23)
    /// fail again for the same rows.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db)) => {
                !db.code().is_some_and(|code| is_permanent_sqlstate(&code))
            }
            Self::Database(_) | Self::VehicleMissing(_) => true,
        }
    }
}

fn is_permanent_sqlstate(code: &str) -> bool {
    code.starts_with("22") || code.starts_with("23")
}

/// Append-only store for position log entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionLogStore: Send + Sync {
    /// Persist every entry in a single bulk write
    ///
    /// Either all entries are stored or none are. Returns the number of rows
    /// written.
    async fn insert_all(&self, entries: Vec<PositionLogEntry>) -> Result<u64, StoreError>;
}

/// Registry of vehicle summaries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRegistry: Send + Sync {
    /// Look a vehicle up by identifier
    async fn find_by_vehicle_id(&self, vehicle_id: &str) -> Result<VehicleLookup, StoreError>;

    /// Persist an existing summary and return the stored version
    async fn save(&self, summary: VehicleSummary) -> Result<VehicleSummary, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_sqlstate_classes() {
        // string_data_right_truncation, the error an over-long VARCHAR raises
        assert!(is_permanent_sqlstate("22001"));
        assert!(is_permanent_sqlstate("22P02"));
        assert!(is_permanent_sqlstate("23505"));

        assert!(!is_permanent_sqlstate("40001"));
        assert!(!is_permanent_sqlstate("53300"));
        assert!(!is_permanent_sqlstate("08006"));
    }

    #[test]
    fn test_non_database_failures_are_retryable() {
        assert!(StoreError::Database(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(StoreError::VehicleMissing("A1234".to_string()).is_retryable());
    }
}
