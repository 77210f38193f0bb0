use serde::Serialize;

use super::common::StatusLevel;
use super::widgets::{DriftChipViewModel, PcsBadgeViewModel, ProgressViewModel};
use provdash_types::{ProviderId, SourceCandidate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderListViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub total_count: usize,
    pub providers: Vec<ProviderRowViewModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRowViewModel {
    pub id: ProviderId,
    pub name: String,
    pub specialty: Option<String>,
    pub pcs: PcsBadgeViewModel,
    pub drift: DriftChipViewModel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDetailViewModel {
    pub id: ProviderId,
    pub name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_no: Option<String>,
    pub license_expiry: Option<String>,
    pub pcs: PcsBadgeViewModel,
    pub pcs_components: Vec<PcsComponentViewModel>,
    pub drift: DriftChipViewModel,
    pub drift_explanation: Option<String>,
    pub fields: Vec<FieldRowViewModel>,
    /// Banner from the last failed explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain_error: Option<String>,
    pub enrichment: Option<EnrichmentViewModel>,
    pub ocr: SectionViewModel<OcrViewModel>,
    pub qa_history: SectionViewModel<Vec<QaRowViewModel>>,
}

/// State of a section fetched independently of the main detail payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum SectionViewModel<T> {
    Loading,
    Ready(T),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PcsComponentViewModel {
    pub code: String,
    pub legend: String,
    pub score: f64,
    pub progress: ProgressViewModel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRowViewModel {
    pub field: String,
    pub value: Option<String>,
    pub confidence: f64,
    pub status: String,
    pub level: StatusLevel,
    pub progress: ProgressViewModel,
    pub sources: Vec<SourceCandidate>,
    pub explaining: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentViewModel {
    pub summary: Option<String>,
    pub education: Option<String>,
    pub certifications: Vec<String>,
    pub affiliations: Vec<String>,
    pub secondary_specialties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrViewModel {
    pub exists: bool,
    pub doc_type: Option<String>,
    pub ocr_confidence: Option<f64>,
    pub ocr_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaRowViewModel {
    pub field_name: String,
    pub confidence: f64,
    pub status: String,
    pub level: StatusLevel,
    pub source_count: usize,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldExplanationViewModel {
    pub provider_id: ProviderId,
    pub field: String,
    pub confidence: f64,
    pub status: String,
    pub explanation: String,
}
