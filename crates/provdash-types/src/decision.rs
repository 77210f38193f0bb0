use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence at or above which a validated field counts as auto-updated.
///
/// This is the only place the threshold lives: status badges, progress bar
/// colors and the `decision` sent to `/explain` all derive from it.
pub const AUTO_UPDATE_THRESHOLD: f64 = 0.7;

/// Display classification of a field-level confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceClass {
    AutoUpdated,
    ManualReview,
}

impl ConfidenceClass {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceClass::AutoUpdated => "Auto-Updated",
            ConfidenceClass::ManualReview => "Manual Review",
        }
    }

    pub fn is_auto_updated(&self) -> bool {
        matches!(self, ConfidenceClass::AutoUpdated)
    }
}

impl fmt::Display for ConfidenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a confidence in [0, 1]. `NaN` never reaches the threshold.
pub fn classify_confidence(confidence: f64) -> ConfidenceClass {
    if confidence >= AUTO_UPDATE_THRESHOLD {
        ConfidenceClass::AutoUpdated
    } else {
        ConfidenceClass::ManualReview
    }
}

/// Decision label as the explanation backend expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    AutoUpdate,
    ManualReview,
}

impl Decision {
    /// Recompute the decision from a confidence, matching the visible badge.
    pub fn from_confidence(confidence: f64) -> Self {
        classify_confidence(confidence).into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::AutoUpdate => "auto_update",
            Decision::ManualReview => "manual_review",
        }
    }
}

impl From<ConfidenceClass> for Decision {
    fn from(class: ConfidenceClass) -> Self {
        match class {
            ConfidenceClass::AutoUpdated => Decision::AutoUpdate,
            ConfidenceClass::ManualReview => Decision::ManualReview,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(classify_confidence(0.7), ConfidenceClass::AutoUpdated);
        assert_eq!(classify_confidence(0.6999), ConfidenceClass::ManualReview);
        assert_eq!(classify_confidence(1.0), ConfidenceClass::AutoUpdated);
        assert_eq!(classify_confidence(0.0), ConfidenceClass::ManualReview);
    }

    #[test]
    fn test_classification_matches_threshold_over_range() {
        for step in 0..=1000 {
            let c = f64::from(step) / 1000.0;
            let auto = classify_confidence(c).is_auto_updated();
            assert_eq!(auto, c >= AUTO_UPDATE_THRESHOLD, "confidence {c}");
        }
    }

    #[test]
    fn test_nan_is_manual_review() {
        assert_eq!(classify_confidence(f64::NAN), ConfidenceClass::ManualReview);
    }

    #[test]
    fn test_decision_agrees_with_classification() {
        assert_eq!(Decision::from_confidence(0.92), Decision::AutoUpdate);
        assert_eq!(Decision::from_confidence(0.41), Decision::ManualReview);
        assert_eq!(
            serde_json::to_string(&Decision::AutoUpdate).unwrap(),
            "\"auto_update\""
        );
    }
}
