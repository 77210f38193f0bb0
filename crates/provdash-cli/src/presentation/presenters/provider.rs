use provdash_runtime::{DetailState, Load};
use provdash_types::{
    ConfidenceClass, Enrichment, OcrRecord, ProviderDetail, ProviderId, ProviderSummary, QaRecord,
};

use super::widgets::{confidence_level, confidence_progress, drift_chip, pcs_badge, progress};
use crate::presentation::view_models::{
    CommandResultViewModel, EnrichmentViewModel, FieldExplanationViewModel, FieldRowViewModel,
    Guidance, OcrViewModel, PcsComponentViewModel, ProviderDetailViewModel, ProviderListViewModel,
    ProviderRowViewModel, QaRowViewModel, SectionViewModel, StatusBadge, StatusLevel,
};

pub fn provider_row(summary: &ProviderSummary) -> ProviderRowViewModel {
    ProviderRowViewModel {
        id: summary.id,
        name: summary.display_name().to_string(),
        specialty: summary.specialty.clone(),
        pcs: pcs_badge(summary.pcs, summary.pcs_band.as_deref()),
        drift: drift_chip(summary.drift_bucket.as_ref()),
    }
}

pub fn build_provider_list(
    providers: &[&ProviderSummary],
    total_count: usize,
    search: &str,
) -> ProviderListViewModel {
    ProviderListViewModel {
        search: (!search.is_empty()).then(|| search.to_string()),
        total_count,
        providers: providers.iter().map(|p| provider_row(p)).collect(),
    }
}

pub fn present_provider_list(
    providers: &[&ProviderSummary],
    total_count: usize,
    search: &str,
) -> CommandResultViewModel<ProviderListViewModel> {
    let content = build_provider_list(providers, total_count, search);
    let shown = content.providers.len();
    let mut result = CommandResultViewModel::new(content);

    if shown == 0 {
        result = result.with_badge(StatusBadge::info("No providers match"));
    } else {
        result = result.with_suggestion(
            Guidance::new("Inspect a provider").with_command("provdash show <ID>"),
        );
    }

    result
}

/// Detail screen model; `None` until the main detail payload has arrived.
pub fn build_provider_detail(state: &DetailState) -> Option<ProviderDetailViewModel> {
    let detail = state.detail.ready()?;
    Some(detail_view_model(detail, state))
}

fn detail_view_model(detail: &ProviderDetail, state: &DetailState) -> ProviderDetailViewModel {
    let record = &detail.provider;
    let fields = detail
        .validation
        .iter()
        .map(|(field, entry)| {
            let class = entry.classification();
            FieldRowViewModel {
                field: field.to_string(),
                value: record.field_value(field).or_else(|| entry.value.clone()),
                confidence: entry.confidence,
                status: class.label().to_string(),
                level: confidence_level(class),
                progress: confidence_progress(entry.confidence),
                sources: entry.sources.clone(),
                explaining: state.is_explaining(field),
                explanation: state.explanation(field).map(str::to_string),
            }
        })
        .collect();

    let (pcs, pcs_components) = match &detail.pcs {
        Some(breakdown) => (
            pcs_badge(Some(breakdown.score), breakdown.band.as_deref()),
            breakdown
                .components
                .iter()
                .map(|(component, score)| PcsComponentViewModel {
                    code: component.code().to_string(),
                    legend: component.legend().to_string(),
                    score,
                    progress: progress(score, 100.0, StatusLevel::Info),
                })
                .collect(),
        ),
        None => (pcs_badge(None, None), Vec::new()),
    };

    ProviderDetailViewModel {
        id: record.id,
        name: record.display_name().to_string(),
        specialty: record.specialty.clone(),
        phone: record.phone.clone(),
        address: record.address.clone(),
        license_no: record.license_no.clone(),
        license_expiry: record.license_expiry.clone(),
        pcs,
        pcs_components,
        drift: drift_chip(detail.drift.as_ref().map(|d| &d.bucket)),
        drift_explanation: detail
            .drift
            .as_ref()
            .map(|d| d.explanation.clone())
            .filter(|text| !text.is_empty()),
        fields,
        explain_error: state.explain_error().map(str::to_string),
        enrichment: detail
            .enrichment
            .as_ref()
            .filter(|e| !e.is_empty())
            .map(enrichment_view_model),
        ocr: section(&state.ocr, ocr_view_model),
        qa_history: match &state.qa_history {
            Load::Ready(_) => SectionViewModel::Ready(state.recent_qa().iter().map(qa_row).collect()),
            other => section(other, |_| Vec::new()),
        },
    }
}

fn section<T, U>(load: &Load<T>, map: impl FnOnce(&T) -> U) -> SectionViewModel<U> {
    match load {
        Load::Idle | Load::Loading => SectionViewModel::Loading,
        Load::Ready(value) => SectionViewModel::Ready(map(value)),
        Load::Failed(err) => SectionViewModel::Failed(err.to_string()),
    }
}

fn ocr_view_model(record: &OcrRecord) -> OcrViewModel {
    OcrViewModel {
        exists: record.exists,
        doc_type: record.doc_type.clone(),
        ocr_confidence: record.ocr_confidence,
        ocr_text: record.ocr_text.clone(),
    }
}

fn qa_row(record: &QaRecord) -> QaRowViewModel {
    let class: ConfidenceClass = provdash_types::classify_confidence(record.confidence);
    QaRowViewModel {
        field_name: record.field_name.clone(),
        confidence: record.confidence,
        status: class.label().to_string(),
        level: confidence_level(class),
        source_count: record.sources.len(),
        created_at: record.created_at.clone(),
    }
}

fn enrichment_view_model(enrichment: &Enrichment) -> EnrichmentViewModel {
    EnrichmentViewModel {
        summary: enrichment.summary.clone(),
        education: enrichment.education.clone(),
        certifications: enrichment.certifications.clone(),
        affiliations: enrichment.affiliations.clone(),
        secondary_specialties: enrichment.secondary_specialties.clone(),
    }
}

pub fn present_provider_detail(
    detail: ProviderDetailViewModel,
) -> CommandResultViewModel<ProviderDetailViewModel> {
    let id = detail.id;
    let needs_review = detail
        .fields
        .iter()
        .filter(|f| f.level != StatusLevel::Success)
        .count();
    let mut result = CommandResultViewModel::new(detail);

    if needs_review > 0 {
        result = result
            .with_badge(StatusBadge::warning(format!(
                "{needs_review} field(s) below the auto-update threshold"
            )))
            .with_suggestion(
                Guidance::new("Ask why a field was flagged")
                    .with_command(format!("provdash explain field {id} <FIELD>")),
            );
    }

    result
}

pub fn present_field_explanation(
    provider_id: ProviderId,
    field: &str,
    state: &DetailState,
    explanation: &str,
) -> CommandResultViewModel<FieldExplanationViewModel> {
    let entry = state
        .detail
        .ready()
        .and_then(|detail| detail.validation.get(field));
    let confidence = entry.map(|e| e.confidence).unwrap_or_default();
    let class = provdash_types::classify_confidence(confidence);

    CommandResultViewModel::new(FieldExplanationViewModel {
        provider_id,
        field: field.to_string(),
        confidence,
        status: class.label().to_string(),
        explanation: explanation.to_string(),
    })
}
