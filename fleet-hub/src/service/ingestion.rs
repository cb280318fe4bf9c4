//! Ingestion Service
//!
//! Entry point for position batches: log every report, then refresh the
//! vehicle summary.

use std::sync::Arc;

use fleet_core::dto::position::PositionBatch;

use super::error::{IngestError, Result};
use super::vehicle_lock::VehicleLocks;
use super::vehicle_state::{SummaryUpdate, VehicleStateUpdater};
use crate::repository::{PositionLogStore, VehicleRegistry};

/// Result of handling one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Number of position log entries written
    pub logged: u64,
    pub summary: SummaryUpdate,
}

/// Handles position batches delivered by the feed
///
/// The log write and the summary update are separate persistence calls with
/// no shared transaction. A failed log write fails the batch before the
/// summary is touched; a failed summary write leaves the log entries in place.
#[derive(Clone)]
pub struct IngestionHandler {
    log_store: Arc<dyn PositionLogStore>,
    updater: VehicleStateUpdater,
    locks: Option<VehicleLocks>,
}

impl IngestionHandler {
    pub fn new(
        log_store: Arc<dyn PositionLogStore>,
        registry: Arc<dyn VehicleRegistry>,
    ) -> Self {
        Self {
            log_store,
            updater: VehicleStateUpdater::new(registry),
            locks: None,
        }
    }

    /// Process batches for the same vehicle one at a time
    pub fn with_vehicle_locks(mut self, locks: VehicleLocks) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Persist every report in `batch`, then update the vehicle summary
    pub async fn handle(&self, batch: PositionBatch) -> Result<IngestOutcome> {
        validate_batch(&batch)?;

        let _guard = match &self.locks {
            Some(locks) => Some(locks.lock(&batch.vehicle_id).await),
            None => None,
        };

        tracing::debug!(
            "Ingesting {} position report(s) for vehicle {}",
            batch.reports.len(),
            batch.vehicle_id
        );

        let logged = if batch.reports.is_empty() {
            0
        } else {
            self.log_store
                .insert_all(batch.to_log_entries())
                .await
                .map_err(|source| {
                    tracing::error!(
                        "Position log write failed for vehicle {}: {}",
                        batch.vehicle_id,
                        source
                    );
                    IngestError::LogWrite {
                        vehicle_id: batch.vehicle_id.clone(),
                        source,
                    }
                })?
        };

        let summary = self
            .updater
            .update(&batch.vehicle_id, &batch.reports)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    "Logged {} report(s) for vehicle {} but summary update failed: {}",
                    logged,
                    batch.vehicle_id,
                    e
                );
            })?;

        Ok(IngestOutcome { logged, summary })
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Column widths of `vehicle_id` and the coordinate columns (see `db.rs`)
const MAX_VEHICLE_ID_LEN: usize = 64;
const MAX_COORDINATE_LEN: usize = 32;

fn validate_batch(batch: &PositionBatch) -> Result<()> {
    if batch.vehicle_id.trim().is_empty() {
        return Err(IngestError::InvalidBatch(
            "vehicle id cannot be empty".to_string(),
        ));
    }

    if batch.vehicle_id.chars().count() > MAX_VEHICLE_ID_LEN {
        return Err(IngestError::InvalidBatch(format!(
            "vehicle id exceeds {} characters",
            MAX_VEHICLE_ID_LEN
        )));
    }

    for (index, report) in batch.reports.iter().enumerate() {
        for (field, value) in [("latitude", &report.latitude), ("longitude", &report.longitude)] {
            if value.chars().count() > MAX_COORDINATE_LEN {
                return Err(IngestError::InvalidBatch(format!(
                    "report {}: {} exceeds {} characters",
                    index, field, MAX_COORDINATE_LEN
                )));
            }
        }
    }

    Ok(())
}
