//! Manual review queue state: per-item explanations and in-flight actions.

use std::collections::{HashMap, HashSet};

use provdash_client::{ApiError, ApiResult, FailureKind};
use provdash_types::{Decision, ExplainRequest, ManualReviewItem, ReviewItemId};

pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait before requesting more explanations.";
pub const EXPLAIN_FAILED_MESSAGE: &str = "Failed to get AI explanation.";
pub const ACTION_FAILED_MESSAGE: &str = "Action failed";

/// Confidence sent when explaining a queued item; the queue payload
/// carries no score of its own.
pub const ITEM_EXPLAIN_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemExplanation {
    Loading,
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewState {
    explanations: HashMap<ReviewItemId, ItemExplanation>,
    submitting: HashSet<ReviewItemId>,
}

impl ReviewState {
    pub fn explanation(&self, id: ReviewItemId) -> Option<&ItemExplanation> {
        self.explanations.get(&id)
    }

    pub fn is_explaining(&self, id: ReviewItemId) -> bool {
        matches!(self.explanations.get(&id), Some(ItemExplanation::Loading))
    }

    pub fn is_submitting(&self, id: ReviewItemId) -> bool {
        self.submitting.contains(&id)
    }

    /// Concurrent explanations are fine, but not two for the same item.
    pub fn begin_explain(&mut self, item: &ManualReviewItem) -> Option<ExplainRequest> {
        if self.is_explaining(item.id) {
            return None;
        }
        self.explanations.insert(item.id, ItemExplanation::Loading);
        Some(build_item_explain_request(item))
    }

    pub fn finish_explain(&mut self, id: ReviewItemId, result: ApiResult<String>) -> bool {
        if !self.is_explaining(id) {
            return false;
        }
        let settled = match result {
            Ok(text) => ItemExplanation::Ready(text),
            Err(err) => ItemExplanation::Failed(explain_failure_message(&err).to_string()),
        };
        self.explanations.insert(id, settled);
        true
    }

    /// Returns false when an action for this item is already in flight.
    pub fn begin_submit(&mut self, id: ReviewItemId) -> bool {
        self.submitting.insert(id)
    }

    pub fn finish_submit(&mut self, id: ReviewItemId) {
        self.submitting.remove(&id);
    }

    /// Drop explanations for items that left the queue.
    pub fn retain_items(&mut self, pending: &[ManualReviewItem]) {
        let live: HashSet<ReviewItemId> = pending.iter().map(|item| item.id).collect();
        self.explanations.retain(|id, _| live.contains(id));
    }

    pub fn clear_explanations(&mut self) {
        self.explanations.clear();
    }
}

fn explain_failure_message(err: &ApiError) -> &'static str {
    match err.kind() {
        FailureKind::RateLimited => RATE_LIMIT_MESSAGE,
        FailureKind::NetworkFailure | FailureKind::ServerError => EXPLAIN_FAILED_MESSAGE,
    }
}

pub fn build_item_explain_request(item: &ManualReviewItem) -> ExplainRequest {
    ExplainRequest {
        field: item.field_name.clone(),
        current_value: item.current_value.clone(),
        candidates: Vec::new(),
        chosen_value: item.suggested_value.clone(),
        confidence: ITEM_EXPLAIN_CONFIDENCE,
        decision: Decision::ManualReview,
    }
}
