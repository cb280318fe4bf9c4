//! Vehicle State Service
//!
//! Keeps each registered vehicle's last known position in step with the
//! reports it sends.

use std::sync::Arc;

use fleet_core::domain::position::{PositionReport, latest_report};
use fleet_core::domain::vehicle::{VehicleLookup, VehicleSummary};

use super::error::{IngestError, Result};
use crate::repository::VehicleRegistry;

/// What happened to the vehicle summary for one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryUpdate {
    /// The summary now carries the batch's latest position
    Updated(VehicleSummary),

    /// No summary exists for the vehicle; nothing was written
    VehicleNotRegistered,

    /// The batch had no reports; the registry was not consulted
    NoReports,
}

impl SummaryUpdate {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryUpdate::Updated(_) => "updated",
            SummaryUpdate::VehicleNotRegistered => "vehicle_not_registered",
            SummaryUpdate::NoReports => "no_reports",
        }
    }
}

/// Updates vehicle summaries from position batches
#[derive(Clone)]
pub struct VehicleStateUpdater {
    registry: Arc<dyn VehicleRegistry>,
}

impl VehicleStateUpdater {
    pub fn new(registry: Arc<dyn VehicleRegistry>) -> Self {
        Self { registry }
    }

    /// Move the vehicle's last known position to the latest report
    ///
    /// Issues at most one save. An unregistered vehicle is left alone.
    pub async fn update(
        &self,
        vehicle_id: &str,
        reports: &[PositionReport],
    ) -> Result<SummaryUpdate> {
        let Some(latest) = latest_report(reports) else {
            return Ok(SummaryUpdate::NoReports);
        };

        let lookup = self
            .registry
            .find_by_vehicle_id(vehicle_id)
            .await
            .map_err(|source| IngestError::SummaryLookup {
                vehicle_id: vehicle_id.to_string(),
                source,
            })?;

        let mut summary = match lookup {
            VehicleLookup::Found(summary) => summary,
            VehicleLookup::NotFound => {
                tracing::debug!(
                    "Vehicle {} not registered, skipping summary update",
                    vehicle_id
                );
                return Ok(SummaryUpdate::VehicleNotRegistered);
            }
        };

        summary.apply_position(latest);

        let saved = self
            .registry
            .save(summary)
            .await
            .map_err(|source| IngestError::SummaryWrite {
                vehicle_id: vehicle_id.to_string(),
                source,
            })?;

        tracing::info!(
            "Vehicle {} position updated to ({}, {}) as of {}",
            vehicle_id,
            latest.latitude,
            latest.longitude,
            latest.timestamp
        );

        Ok(SummaryUpdate::Updated(saved))
    }
}
