use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::provider::SourceCandidate;

/// Body of `POST /explain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub field: String,
    pub current_value: Option<String>,
    pub candidates: Vec<SourceCandidate>,
    pub chosen_value: Option<String>,
    pub confidence: f64,
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}
