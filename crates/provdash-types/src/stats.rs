use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ordered::Distribution;
use crate::serde_util::null_as_default;

/// Metadata of one batch scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "type")]
    pub run_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count_processed: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_updates: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manual_reviews: u64,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
}

/// Acknowledgement of `POST /run-batch`; the backend answers with the
/// finished run's summary.
pub type BatchRun = RunSummary;

impl RunSummary {
    pub fn started_at_parsed(&self) -> Option<NaiveDateTime> {
        self.started_at.as_deref().and_then(parse_backend_timestamp)
    }

    pub fn has_run(&self) -> bool {
        self.started_at.is_some()
    }
}

/// One entry of the recent-runs trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_updates: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manual_reviews: u64,
}

/// Payload of `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_run: RunSummary,
    #[serde(default)]
    pub avg_pcs: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drift_distribution: Distribution,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pcs_distribution: Distribution,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend: Vec<TrendPoint>,
}

/// Kind of batch scoring run the backend can be asked to perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    #[default]
    Daily,
    Weekly,
    Full,
}

impl BatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::Daily => "daily",
            BatchKind::Weekly => "weekly",
            BatchKind::Full => "full",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse the timestamp formats the backend emits: RFC 3339, naive ISO
/// datetimes with or without fractional seconds, and bare dates.
pub fn parse_backend_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_JSON: &str = r#"{
        "latest_run": {
            "id": 9, "type": "daily", "count_processed": 120,
            "auto_updates": 80, "manual_reviews": 12,
            "started_at": "2026-03-02T08:15:00.123456", "finished_at": null
        },
        "avg_pcs": 76.25,
        "drift_distribution": {"Low": 13, "Medium": 5, "High": 2},
        "pcs_distribution": null,
        "trend": [{"id": 9, "date": "2026-03-02", "auto_updates": 80, "manual_reviews": 12}]
    }"#;

    #[test]
    fn test_stats_payload_parses() {
        let stats: RunStats = serde_json::from_str(STATS_JSON).unwrap();
        assert_eq!(stats.latest_run.run_type.as_deref(), Some("daily"));
        assert_eq!(stats.latest_run.count_processed, 120);
        assert_eq!(stats.drift_distribution.len(), 3);
        assert!(stats.pcs_distribution.is_empty());
        assert_eq!(stats.trend.len(), 1);
        assert!(stats.latest_run.started_at_parsed().is_some());
    }

    #[test]
    fn test_never_run_latest_run_is_empty() {
        let stats: RunStats = serde_json::from_str(
            r#"{"latest_run": {"id": null, "type": null, "count_processed": 0, "started_at": null},
                "avg_pcs": null, "drift_distribution": {"Low": 0, "Medium": 0, "High": 0}}"#,
        )
        .unwrap();
        assert!(!stats.latest_run.has_run());
        assert_eq!(stats.avg_pcs, None);
    }

    #[test]
    fn test_parse_backend_timestamp_variants() {
        assert!(parse_backend_timestamp("2026-03-02T08:15:00Z").is_some());
        assert!(parse_backend_timestamp("2026-03-02T08:15:00").is_some());
        assert!(parse_backend_timestamp("2026-03-02 08:15:00.5").is_some());
        assert!(parse_backend_timestamp("2026-03-02").is_some());
        assert!(parse_backend_timestamp("yesterday").is_none());
    }
}
