//! Small reusable pieces shared by several screens.

use serde::Serialize;

use super::common::StatusLevel;

/// One bar of a distribution chart. `fraction` is relative to the largest
/// count in the same chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarViewModel {
    pub label: String,
    pub count: u64,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PcsBadgeViewModel {
    pub score: Option<f64>,
    pub band: Option<String>,
    pub level: StatusLevel,
}

impl PcsBadgeViewModel {
    pub fn label(&self) -> String {
        match (self.score, &self.band) {
            (Some(score), Some(band)) => format!("PCS {score:.1} ({band})"),
            (Some(score), None) => format!("PCS {score:.1}"),
            (None, _) => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftChipViewModel {
    pub bucket: Option<String>,
    pub level: StatusLevel,
}

impl DriftChipViewModel {
    pub fn label(&self) -> String {
        match &self.bucket {
            Some(bucket) => format!("Drift: {bucket}"),
            None => "Drift N/A".to_string(),
        }
    }
}

/// Horizontal gauge; `fraction` is always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressViewModel {
    pub fraction: f64,
    pub level: StatusLevel,
}
