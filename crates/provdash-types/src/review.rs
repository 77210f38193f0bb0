use serde::{Deserialize, Serialize};
use std::fmt;

use crate::provider::ProviderId;
use crate::serde_util::optional_text;

pub type ReviewItemId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Overridden,
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ReviewStatus::Pending)
    }
}

/// Flagged field-level discrepancy awaiting a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualReviewItem {
    pub id: ReviewItemId,
    pub provider_id: ProviderId,
    pub field_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub current_value: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub suggested_value: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: ReviewStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Reviewer decision on a manual review item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
    Override(String),
}

impl ReviewAction {
    /// Path segment of the review endpoint for this action.
    pub fn verb(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
            ReviewAction::Override(_) => "override",
        }
    }

    /// Build an override, rejecting empty or whitespace-only values.
    pub fn override_with(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ReviewAction::Override(trimmed.to_string()))
        }
    }

    pub fn override_value(&self) -> Option<&str> {
        match self {
            ReviewAction::Override(value) => Some(value),
            _ => None,
        }
    }

    /// Status the item ends up in once the action is accepted.
    pub fn resulting_status(&self) -> ReviewStatus {
        match self {
            ReviewAction::Approve => ReviewStatus::Approved,
            ReviewAction::Reject => ReviewStatus::Rejected,
            ReviewAction::Override(_) => ReviewStatus::Overridden,
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewAction::Override(value) => write!(f, "override ({value})"),
            other => write!(f, "{}", other.verb()),
        }
    }
}

/// Generic acknowledgement body (`{"status": "ok"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_does_not_fail_parsing() {
        let item: ManualReviewItem = serde_json::from_str(
            r#"{"id": 1, "provider_id": 2, "field_name": "phone", "status": "escalated"}"#,
        )
        .unwrap();
        assert_eq!(item.status, ReviewStatus::Unknown);
        assert!(!item.status.is_pending());
    }

    #[test]
    fn test_override_requires_non_blank_value() {
        assert_eq!(ReviewAction::override_with(""), None);
        assert_eq!(ReviewAction::override_with("   "), None);
        assert_eq!(
            ReviewAction::override_with(" 555-0199 "),
            Some(ReviewAction::Override("555-0199".to_string()))
        );
    }

    #[test]
    fn test_action_verbs_and_statuses() {
        assert_eq!(ReviewAction::Approve.verb(), "approve");
        assert_eq!(ReviewAction::Reject.resulting_status(), ReviewStatus::Rejected);
        let action = ReviewAction::Override("x".into());
        assert_eq!(action.verb(), "override");
        assert_eq!(action.override_value(), Some("x"));
        assert_eq!(action.resulting_status(), ReviewStatus::Overridden);
    }
}
