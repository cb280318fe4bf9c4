//! Position DTOs delivered by the feed

use serde::{Deserialize, Serialize};

use crate::domain::position::{PositionLogEntry, PositionReport};

/// Batch of position reports for one vehicle
///
/// Reports keep the order they had in the source message, which is not
/// necessarily chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBatch {
    pub vehicle_id: String,
    #[serde(default)]
    pub reports: Vec<PositionReport>,
}

impl PositionBatch {
    pub fn new(vehicle_id: impl Into<String>, reports: Vec<PositionReport>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            reports,
        }
    }

    /// One log entry per report, in batch order
    pub fn to_log_entries(&self) -> Vec<PositionLogEntry> {
        self.reports
            .iter()
            .map(|report| PositionLogEntry::from_report(&self.vehicle_id, report))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_deserialize_feed_message() {
        let json = r#"{
            "vehicleId": "B5678",
            "reports": [
                {"latitude": "37.0000", "longitude": "127.0000", "timestamp": "2025-03-01T09:00:00Z"},
                {"latitude": "37.1234", "longitude": "127.5678", "timestamp": "2025-03-01T09:05:00+00:00"}
            ]
        }"#;

        let batch: PositionBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.vehicle_id, "B5678");
        assert_eq!(batch.reports.len(), 2);
        assert_eq!(
            batch.reports[1].timestamp,
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).unwrap()
        );
    }

    #[test]
    fn test_deserialize_local_timestamp_as_utc() {
        let json = r#"{"vehicleId":"A1234","reports":[{"latitude":"37.5665","longitude":"126.9780","timestamp":"2025-03-01T09:00:00"}]}"#;

        let batch: PositionBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.reports.len(), 1);
        assert_eq!(
            batch.reports[0].timestamp,
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_deserialize_rejects_unparseable_timestamp() {
        let json = r#"{"vehicleId":"A1234","reports":[{"latitude":"1","longitude":"1","timestamp":"soon"}]}"#;

        let err = serde_json::from_str::<PositionBatch>(json).unwrap_err();
        assert!(err.to_string().contains("invalid position timestamp"));
    }

    #[test]
    fn test_missing_reports_defaults_to_empty() {
        let batch: PositionBatch = serde_json::from_str(r#"{"vehicleId": "A1234"}"#).unwrap();
        assert!(batch.reports.is_empty());
    }

    #[test]
    fn test_to_log_entries_preserves_order() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let batch = PositionBatch::new(
            "C9012",
            vec![
                PositionReport::new("2.0", "2.0", t),
                PositionReport::new("1.0", "1.0", t),
            ],
        );

        let entries = batch.to_log_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.vehicle_id == "C9012"));
        assert_eq!(entries[0].latitude, "2.0");
        assert_eq!(entries[1].latitude, "1.0");
    }
}
