//! Position domain types

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single GPS observation reported by a vehicle
///
/// Coordinates are kept as the decimal strings the device sent, so nothing
/// is lost to floating point between the feed and the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    pub latitude: String,
    pub longitude: String,
    #[serde(deserialize_with = "deserialize_feed_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl PositionReport {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            timestamp,
        }
    }
}

/// Read a feed timestamp as an instant.
///
/// RFC 3339 values keep their offset. Values without an offset (ISO-8601
/// local date-times such as `2025-03-01T09:00:00` or `2025-03-01T09:00`) are
/// taken to be UTC.
fn deserialize_feed_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_feed_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid position timestamp: {}", raw))
    })
}

fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|local| local.and_utc())
}

/// Persisted, append-only record of one position report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLogEntry {
    pub vehicle_id: String,
    pub latitude: String,
    pub longitude: String,
    pub recorded_at: DateTime<Utc>,
}

impl PositionLogEntry {
    /// Build the log entry for a report received from `vehicle_id`
    pub fn from_report(vehicle_id: &str, report: &PositionReport) -> Self {
        Self {
            vehicle_id: vehicle_id.to_string(),
            latitude: report.latitude.clone(),
            longitude: report.longitude.clone(),
            recorded_at: report.timestamp,
        }
    }
}

/// Pick the report with the latest timestamp.
///
/// Single pass over `reports` in the order given. When several reports share
/// the maximal timestamp the first one scanned is kept. Returns `None` for an
/// empty slice.
pub fn latest_report(reports: &[PositionReport]) -> Option<&PositionReport> {
    let mut latest: Option<&PositionReport> = None;

    for report in reports {
        // strictly greater, so an equal timestamp never replaces the held one
        let newer = match latest {
            Some(current) => report.timestamp > current.timestamp,
            None => true,
        };
        if newer {
            latest = Some(report);
        }
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_latest_report_empty() {
        assert!(latest_report(&[]).is_none());
    }

    #[test]
    fn test_latest_report_unordered_input() {
        let reports = vec![
            PositionReport::new("37.1000", "127.1000", t0() + Duration::minutes(2)),
            PositionReport::new("37.3000", "127.3000", t0() + Duration::minutes(9)),
            PositionReport::new("37.2000", "127.2000", t0()),
        ];

        let latest = latest_report(&reports).unwrap();
        assert_eq!(latest.latitude, "37.3000");
        assert_eq!(latest.longitude, "127.3000");
    }

    #[test]
    fn test_latest_report_tie_keeps_first_scanned() {
        let t = t0() + Duration::seconds(30);
        let reports = vec![
            PositionReport::new("1.0", "1.0", t0()),
            PositionReport::new("2.0", "2.0", t),
            PositionReport::new("3.0", "3.0", t),
            PositionReport::new("4.0", "4.0", t0()),
        ];

        let latest = latest_report(&reports).unwrap();
        assert_eq!(latest.latitude, "2.0");
    }

    #[test]
    fn test_parse_feed_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        assert_eq!(parse_feed_timestamp("2025-03-01T09:00:00Z"), Some(expected));
        assert_eq!(parse_feed_timestamp("2025-03-01T18:00:00+09:00"), Some(expected));
        assert_eq!(parse_feed_timestamp("2025-03-01T09:00:00"), Some(expected));
        assert_eq!(parse_feed_timestamp("2025-03-01T09:00"), Some(expected));
        assert_eq!(
            parse_feed_timestamp("2025-03-01T09:00:00.250"),
            Some(expected + Duration::milliseconds(250))
        );
        assert_eq!(parse_feed_timestamp("yesterday"), None);
    }

    #[test]
    fn test_log_entry_copies_report_fields() {
        let report = PositionReport::new("37.5665", "126.9780", t0());
        let entry = PositionLogEntry::from_report("A1234", &report);

        assert_eq!(entry.vehicle_id, "A1234");
        assert_eq!(entry.latitude, report.latitude);
        assert_eq!(entry.longitude, report.longitude);
        assert_eq!(entry.recorded_at, report.timestamp);
    }
}
