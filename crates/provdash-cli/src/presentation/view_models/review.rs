use serde::Serialize;

use provdash_types::{ProviderId, ReviewItemId, ReviewStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewQueueViewModel {
    pub items: Vec<ReviewItemViewModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItemViewModel {
    pub id: ReviewItemId,
    pub provider_id: ProviderId,
    pub provider_name: Option<String>,
    pub field_name: String,
    pub current_value: Option<String>,
    pub suggested_value: Option<String>,
    pub reason: Option<String>,
    pub created_at: Option<String>,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<ItemExplanationViewModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "lowercase")]
pub enum ItemExplanationViewModel {
    Loading,
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcomeViewModel {
    pub id: ReviewItemId,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub status: ReviewStatus,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemExplanationResultViewModel {
    pub id: ReviewItemId,
    pub field_name: String,
    pub suggested_value: Option<String>,
    pub explanation: String,
}
