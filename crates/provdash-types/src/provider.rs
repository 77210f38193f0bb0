use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::decision::{ConfidenceClass, classify_confidence};
use crate::ordered::OrderedMap;
use crate::serde_util::{clamped_score, null_as_default, optional_text, string_list, value_to_text};

pub type ProviderId = i64;

/// Row of the bulk provider listing (`GET /providers`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub id: ProviderId,
    #[serde(default, deserialize_with = "optional_text")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pcs: Option<f64>,
    #[serde(default)]
    pub pcs_band: Option<String>,
    #[serde(default)]
    pub drift_score: Option<f64>,
    #[serde(default)]
    pub drift_bucket: Option<DriftBucket>,
}

impl ProviderSummary {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    /// Case-insensitive match against id, name and specialty.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.id.to_string().contains(&query)
            || [&self.name, &self.specialty, &self.external_id]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&query))
    }
}

/// Full provider record from the details payload.
///
/// Known fields are typed; anything else the backend adds is kept in
/// `extra` so `field_value` can still resolve it by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: ProviderId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub license_no: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub license_expiry: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProviderRecord {
    /// Current value of a field, looked up by its backend field name.
    pub fn field_value(&self, field: &str) -> Option<String> {
        let typed = match field {
            "id" => return Some(self.id.to_string()),
            "name" => &self.name,
            "phone" => &self.phone,
            "address" => &self.address,
            "specialty" => &self.specialty,
            "license_no" => &self.license_no,
            "license_expiry" => &self.license_expiry,
            other => return self.extra.get(other).and_then(value_to_text),
        };
        typed.clone()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

/// One candidate source for a validated field.
///
/// The backend sends either a bare source name (`"npi"`) or an object
/// (`{"source": "npi", "value": "..."}`); both normalize to this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCandidate")]
pub struct SourceCandidate {
    pub source: String,
    pub value: Option<String>,
}

impl SourceCandidate {
    pub fn new(source: impl Into<String>, value: Option<String>) -> Self {
        Self {
            source: source.into(),
            value,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCandidate {
    Name(String),
    Entry {
        #[serde(default, alias = "name")]
        source: Option<String>,
        #[serde(default)]
        value: Option<serde_json::Value>,
    },
}

impl From<RawCandidate> for SourceCandidate {
    fn from(raw: RawCandidate) -> Self {
        match raw {
            RawCandidate::Name(source) => SourceCandidate {
                source,
                value: None,
            },
            RawCandidate::Entry { source, value } => SourceCandidate {
                source: source.unwrap_or_else(|| "unknown".to_string()),
                value: value.as_ref().and_then(value_to_text),
            },
        }
    }
}

/// Per-field validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationEntry {
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourceCandidate>,
    #[serde(default, deserialize_with = "optional_text")]
    pub value: Option<String>,
}

impl ValidationEntry {
    pub fn classification(&self) -> ConfidenceClass {
        classify_confidence(self.confidence)
    }
}

/// PCS sub-score identifiers, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PcsComponent {
    Srm,
    Fr,
    St,
    Mb,
    Dq,
    Rp,
    Lh,
    Ha,
}

impl PcsComponent {
    pub const ALL: [PcsComponent; 8] = [
        PcsComponent::Srm,
        PcsComponent::Fr,
        PcsComponent::St,
        PcsComponent::Mb,
        PcsComponent::Dq,
        PcsComponent::Rp,
        PcsComponent::Lh,
        PcsComponent::Ha,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PcsComponent::Srm => "SRM",
            PcsComponent::Fr => "FR",
            PcsComponent::St => "ST",
            PcsComponent::Mb => "MB",
            PcsComponent::Dq => "DQ",
            PcsComponent::Rp => "RP",
            PcsComponent::Lh => "LH",
            PcsComponent::Ha => "HA",
        }
    }

    pub fn legend(&self) -> &'static str {
        match self {
            PcsComponent::Srm => "Source Reliability",
            PcsComponent::Fr => "Freshness",
            PcsComponent::St => "Stability",
            PcsComponent::Mb => "Mismatch Burden",
            PcsComponent::Dq => "Doc Quality",
            PcsComponent::Rp => "Responsiveness",
            PcsComponent::Lh => "License Health",
            PcsComponent::Ha => "History",
        }
    }
}

/// The eight PCS sub-scores, each 0-100. Out-of-range values are clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PcsComponents {
    #[serde(default, deserialize_with = "clamped_score")]
    pub srm: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub fr: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub st: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub mb: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub dq: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub rp: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub lh: f64,
    #[serde(default, deserialize_with = "clamped_score")]
    pub ha: f64,
}

impl PcsComponents {
    pub fn get(&self, component: PcsComponent) -> f64 {
        match component {
            PcsComponent::Srm => self.srm,
            PcsComponent::Fr => self.fr,
            PcsComponent::St => self.st,
            PcsComponent::Mb => self.mb,
            PcsComponent::Dq => self.dq,
            PcsComponent::Rp => self.rp,
            PcsComponent::Lh => self.lh,
            PcsComponent::Ha => self.ha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PcsComponent, f64)> + '_ {
        PcsComponent::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcsBreakdown {
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: PcsComponents,
}

/// Drift classification. Unrecognized labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriftBucket {
    High,
    Medium,
    Low,
    Other(String),
}

impl DriftBucket {
    pub fn as_str(&self) -> &str {
        match self {
            DriftBucket::High => "High",
            DriftBucket::Medium => "Medium",
            DriftBucket::Low => "Low",
            DriftBucket::Other(label) => label,
        }
    }
}

impl From<String> for DriftBucket {
    fn from(label: String) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "high" => DriftBucket::High,
            "medium" => DriftBucket::Medium,
            "low" => DriftBucket::Low,
            _ => DriftBucket::Other(label),
        }
    }
}

impl From<DriftBucket> for String {
    fn from(bucket: DriftBucket) -> Self {
        bucket.as_str().to_string()
    }
}

impl fmt::Display for DriftBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftInfo {
    pub bucket: DriftBucket,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
}

/// Optional enrichment summary attached to the details payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub affiliations: Vec<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub secondary_specialties: Vec<String>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.certifications.is_empty()
            && self.affiliations.is_empty()
            && self.education.is_none()
            && self.secondary_specialties.is_empty()
    }
}

/// Aggregate payload of `GET /providers/{id}/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDetail {
    pub provider: ProviderRecord,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation: OrderedMap<ValidationEntry>,
    #[serde(default)]
    pub pcs: Option<PcsBreakdown>,
    #[serde(default)]
    pub drift: Option<DriftInfo>,
    #[serde(default)]
    pub enrichment: Option<Enrichment>,
}

/// Extracted document for a provider; `exists == false` when none is on file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrRecord {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl OcrRecord {
    pub fn missing() -> Self {
        Self::default()
    }
}

/// Historical per-field validation record (`GET /providers/{id}/qa`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub field_name: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourceCandidate>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_normalize_string_and_object_shapes() {
        let entry: ValidationEntry = serde_json::from_str(
            r#"{"confidence": 0.8, "sources": ["npi", {"source": "maps", "value": "12 Main St"}]}"#,
        )
        .unwrap();
        assert_eq!(
            entry.sources,
            vec![
                SourceCandidate::new("npi", None),
                SourceCandidate::new("maps", Some("12 Main St".to_string())),
            ]
        );
    }

    #[test]
    fn test_null_sources_become_empty() {
        let entry: ValidationEntry =
            serde_json::from_str(r#"{"confidence": 0.4, "sources": null}"#).unwrap();
        assert!(entry.sources.is_empty());
        assert_eq!(entry.classification(), ConfidenceClass::ManualReview);
    }

    #[test]
    fn test_numeric_candidate_value_is_text() {
        let candidate: SourceCandidate =
            serde_json::from_str(r#"{"source": "registry", "value": 5550100}"#).unwrap();
        assert_eq!(candidate.value.as_deref(), Some("5550100"));
    }

    #[test]
    fn test_field_value_resolves_typed_and_extra_fields() {
        let record: ProviderRecord = serde_json::from_str(
            r#"{"id": 7, "name": "Dr. Ada", "phone": "555-0100", "npi": 1234567890}"#,
        )
        .unwrap();
        assert_eq!(record.field_value("phone").as_deref(), Some("555-0100"));
        assert_eq!(record.field_value("npi").as_deref(), Some("1234567890"));
        assert_eq!(record.field_value("address"), None);
        assert_eq!(record.field_value("id").as_deref(), Some("7"));
    }

    #[test]
    fn test_drift_bucket_is_case_insensitive() {
        let bucket: DriftBucket = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(bucket, DriftBucket::High);
        let other: DriftBucket = serde_json::from_str(r#""Unknown""#).unwrap();
        assert_eq!(other.as_str(), "Unknown");
    }

    #[test]
    fn test_pcs_components_iterate_in_canonical_order() {
        let pcs: PcsBreakdown = serde_json::from_str(
            r#"{"score": 81.5, "band": "amber", "components": {"ha": 10, "srm": 90}}"#,
        )
        .unwrap();
        let codes: Vec<&str> = pcs.components.iter().map(|(c, _)| c.code()).collect();
        assert_eq!(codes, vec!["SRM", "FR", "ST", "MB", "DQ", "RP", "LH", "HA"]);
        assert_eq!(pcs.components.get(PcsComponent::Srm), 90.0);
        assert_eq!(pcs.components.get(PcsComponent::Fr), 0.0);
    }

    #[test]
    fn test_pcs_sub_scores_are_clamped() {
        let components: PcsComponents = serde_json::from_str(
            r#"{"srm": 140.2, "fr": -12, "st": null, "mb": 55.5}"#,
        )
        .unwrap();
        assert_eq!(components.get(PcsComponent::Srm), 100.0);
        assert_eq!(components.get(PcsComponent::Fr), 0.0);
        assert_eq!(components.get(PcsComponent::St), 0.0);
        assert_eq!(components.get(PcsComponent::Mb), 55.5);
    }

    #[test]
    fn test_summary_search_matches_name_specialty_and_id() {
        let summary: ProviderSummary = serde_json::from_str(
            r#"{"id": 42, "name": "Grace Hopper", "specialty": "Cardiology"}"#,
        )
        .unwrap();
        assert!(summary.matches("grace"));
        assert!(summary.matches("CARDIO"));
        assert!(summary.matches("42"));
        assert!(summary.matches("  "));
        assert!(!summary.matches("dermatology"));
    }
}
