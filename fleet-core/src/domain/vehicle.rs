//! Vehicle domain model
//!
//! The "current state" record the hub keeps for each registered vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::position::PositionReport;

/// Last known state of a registered vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    /// Vehicle identifier (plate or fleet number)
    pub vehicle_id: String,

    /// Last known latitude, unset until the first position arrives
    pub last_latitude: Option<String>,

    /// Last known longitude, unset until the first position arrives
    pub last_longitude: Option<String>,

    /// When the vehicle was registered with the hub
    pub registered_at: DateTime<Utc>,
}

impl VehicleSummary {
    /// Overwrite the last known position with the one carried by `report`
    pub fn apply_position(&mut self, report: &PositionReport) {
        self.last_latitude = Some(report.latitude.clone());
        self.last_longitude = Some(report.longitude.clone());
    }
}

/// Result of looking a vehicle up by identifier
///
/// A missing vehicle is an expected outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleLookup {
    Found(VehicleSummary),
    NotFound,
}

impl From<Option<VehicleSummary>> for VehicleLookup {
    fn from(summary: Option<VehicleSummary>) -> Self {
        match summary {
            Some(summary) => VehicleLookup::Found(summary),
            None => VehicleLookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_position_overwrites_coordinates() {
        let mut summary = VehicleSummary {
            vehicle_id: "B5678".to_string(),
            last_latitude: Some("37.0000".to_string()),
            last_longitude: Some("127.0000".to_string()),
            registered_at: Utc::now(),
        };

        summary.apply_position(&PositionReport::new("37.1234", "127.5678", Utc::now()));

        assert_eq!(summary.vehicle_id, "B5678");
        assert_eq!(summary.last_latitude.as_deref(), Some("37.1234"));
        assert_eq!(summary.last_longitude.as_deref(), Some("127.5678"));
    }

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(VehicleLookup::from(None), VehicleLookup::NotFound);
    }
}
