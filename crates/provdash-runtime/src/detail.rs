//! Per-provider detail view state.
//!
//! Detail, OCR and QA history are fetched independently and settle their
//! own slices. Field explanations are serialized: one field at a time.

use std::collections::HashMap;

use provdash_client::{ApiError, ApiResult, FailureKind};
use provdash_types::{
    Decision, ExplainRequest, OcrRecord, ProviderDetail, ProviderId, QaRecord,
};

use crate::load::Load;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please wait.";
pub const EXPLAIN_FAILED_MESSAGE: &str = "Failed to generate explanation.";

/// QA rows shown in the detail view.
pub const QA_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub provider_id: ProviderId,
    pub detail: Load<ProviderDetail>,
    pub ocr: Load<OcrRecord>,
    pub qa_history: Load<Vec<QaRecord>>,
    explanations: HashMap<String, String>,
    loading_field: Option<String>,
    explain_error: Option<String>,
}

impl DetailState {
    /// Fresh state for a provider whose three fetches are in flight.
    pub fn loading(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            detail: Load::Loading,
            ocr: Load::Loading,
            qa_history: Load::Loading,
            explanations: HashMap::new(),
            loading_field: None,
            explain_error: None,
        }
    }

    pub fn explanation(&self, field: &str) -> Option<&str> {
        self.explanations.get(field).map(String::as_str)
    }

    pub fn explanation_count(&self) -> usize {
        self.explanations.len()
    }

    pub fn loading_field(&self) -> Option<&str> {
        self.loading_field.as_deref()
    }

    pub fn is_explaining(&self, field: &str) -> bool {
        self.loading_field.as_deref() == Some(field)
    }

    /// Banner shown above the validation table after a failed explanation.
    pub fn explain_error(&self) -> Option<&str> {
        self.explain_error.as_deref()
    }

    /// QA rows in backend order, capped for display.
    pub fn recent_qa(&self) -> &[QaRecord] {
        match self.qa_history.ready() {
            Some(rows) => &rows[..rows.len().min(QA_HISTORY_LIMIT)],
            None => &[],
        }
    }

    /// Build the request for `field` and mark it loading. Returns `None`
    /// while another field is in flight or when the field is not validated.
    pub fn begin_explain(&mut self, field: &str) -> Option<ExplainRequest> {
        if self.loading_field.is_some() {
            return None;
        }
        let request = build_field_explain_request(self.detail.ready()?, field)?;
        self.loading_field = Some(field.to_string());
        self.explain_error = None;
        Some(request)
    }

    /// Settle an explanation. Results for a field that is not the one in
    /// flight are ignored.
    pub fn finish_explain(&mut self, field: &str, result: ApiResult<String>) -> bool {
        if !self.is_explaining(field) {
            return false;
        }
        self.loading_field = None;
        match result {
            Ok(text) => {
                self.explanations.insert(field.to_string(), text);
            }
            Err(err) => self.explain_error = Some(explain_failure_message(&err).to_string()),
        }
        true
    }

    pub fn dismiss_explain_error(&mut self) {
        self.explain_error = None;
    }
}

fn explain_failure_message(err: &ApiError) -> &'static str {
    match err.kind() {
        FailureKind::RateLimited => RATE_LIMIT_MESSAGE,
        FailureKind::NetworkFailure | FailureKind::ServerError => EXPLAIN_FAILED_MESSAGE,
    }
}

/// Explanation payload for one validated field of a provider.
///
/// The current value doubles as the chosen value; the decision follows the
/// same threshold as the confidence badge.
pub fn build_field_explain_request(detail: &ProviderDetail, field: &str) -> Option<ExplainRequest> {
    let entry = detail.validation.get(field)?;
    let current_value = detail
        .provider
        .field_value(field)
        .or_else(|| entry.value.clone());
    Some(ExplainRequest {
        field: field.to_string(),
        current_value: current_value.clone(),
        candidates: entry.sources.clone(),
        chosen_value: current_value,
        confidence: entry.confidence,
        decision: Decision::from_confidence(entry.confidence),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> ProviderDetail {
        serde_json::from_str(
            r#"{
                "provider": {"id": 42, "name": "Dr. Ada", "phone": "555-0100", "address": "1 Main St"},
                "validation": {
                    "phone": {"confidence": 0.92, "sources": [{"source": "npi", "value": "555-0100"}, "maps"]},
                    "address": {"confidence": 0.41, "sources": ["npi"]}
                }
            }"#,
        )
        .unwrap()
    }

    fn ready_state() -> DetailState {
        let mut state = DetailState::loading(42);
        state.detail.settle(Ok(detail()));
        state
    }

    #[test]
    fn test_field_request_payload() {
        let request = build_field_explain_request(&detail(), "phone").unwrap();
        assert_eq!(request.current_value.as_deref(), Some("555-0100"));
        assert_eq!(request.chosen_value, request.current_value);
        assert_eq!(request.candidates.len(), 2);
        assert_eq!(request.candidates[1].source, "maps");
        assert_eq!(request.candidates[1].value, None);
        assert_eq!(request.decision, Decision::AutoUpdate);

        let low = build_field_explain_request(&detail(), "address").unwrap();
        assert_eq!(low.decision, Decision::ManualReview);
        assert!(build_field_explain_request(&detail(), "email").is_none());
    }

    #[test]
    fn test_explain_requires_loaded_detail() {
        let mut state = DetailState::loading(42);
        assert!(state.begin_explain("phone").is_none());
        assert_eq!(state.loading_field(), None);
    }

    #[test]
    fn test_only_one_field_in_flight() {
        let mut state = ready_state();
        assert!(state.begin_explain("phone").is_some());
        assert!(state.is_explaining("phone"));
        assert!(!state.is_explaining("address"));

        assert!(state.begin_explain("address").is_none());
        assert_eq!(state.loading_field(), Some("phone"));
    }

    #[test]
    fn test_failure_keeps_other_explanations() {
        let mut state = ready_state();
        state.begin_explain("phone").unwrap();
        assert!(state.finish_explain("phone", Ok("Matches NPI.".to_string())));

        state.begin_explain("address").unwrap();
        assert!(state.finish_explain("address", Err(ApiError::RateLimited)));
        assert_eq!(state.explain_error(), Some(RATE_LIMIT_MESSAGE));
        assert_eq!(state.explanation("phone"), Some("Matches NPI."));
        assert_eq!(state.explanation("address"), None);

        // Next attempt clears the banner.
        state.begin_explain("address").unwrap();
        assert_eq!(state.explain_error(), None);
        state.finish_explain(
            "address",
            Err(ApiError::Server {
                status: 500,
                body: String::new(),
            }),
        );
        assert_eq!(state.explain_error(), Some(EXPLAIN_FAILED_MESSAGE));
    }

    #[test]
    fn test_stray_result_is_ignored() {
        let mut state = ready_state();
        assert!(!state.finish_explain("phone", Ok("late".to_string())));
        assert_eq!(state.explanation_count(), 0);
    }
}
