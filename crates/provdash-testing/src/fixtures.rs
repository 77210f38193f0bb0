//! Sample backend payloads.
//!
//! Payloads are kept as JSON so the fixtures go through the same
//! deserializers as real backend responses.

use provdash_types::{
    ManualReviewItem, OcrRecord, ProviderDetail, ProviderId, ProviderSummary, QaRecord, RunStats,
};

pub const STATS_JSON: &str = r#"{
    "latest_run": {
        "id": 12, "type": "daily", "count_processed": 20,
        "auto_updates": 14, "manual_reviews": 6,
        "started_at": "2026-10-15T02:00:00", "finished_at": "2026-10-15T02:04:31"
    },
    "avg_pcs": 72.4,
    "drift_distribution": {"High": 2, "Medium": 5, "Low": 13},
    "pcs_distribution": {"0-40": 1, "40-70": 6, "70-85": 9, "85-100": 4},
    "trend": [
        {"id": 6, "date": "2026-10-09", "auto_updates": 9, "manual_reviews": 11},
        {"id": 7, "date": "2026-10-10", "auto_updates": 10, "manual_reviews": 10},
        {"id": 8, "date": "2026-10-11", "auto_updates": 12, "manual_reviews": 8},
        {"id": 9, "date": "2026-10-12", "auto_updates": 11, "manual_reviews": 9},
        {"id": 10, "date": "2026-10-13", "auto_updates": 13, "manual_reviews": 7},
        {"id": 11, "date": "2026-10-14", "auto_updates": 15, "manual_reviews": 5},
        {"id": 12, "date": "2026-10-15", "auto_updates": 14, "manual_reviews": 6}
    ]
}"#;

pub const PROVIDERS_JSON: &str = r#"[
    {"id": 42, "external_id": "1003000126", "name": "Dr. Grace Hopper", "specialty": "Cardiology",
     "phone": "555-0100", "address": "1 Navy Way", "pcs": 82.4, "pcs_band": "amber",
     "drift_score": 0.71, "drift_bucket": "High"},
    {"id": 43, "external_id": "1003000134", "name": "Dr. Alan Turing", "specialty": "Neurology",
     "phone": "555-0142", "address": "2 Bletchley Rd", "pcs": 91.0, "pcs_band": "green",
     "drift_score": 0.12, "drift_bucket": "Low"},
    {"id": 44, "external_id": null, "name": "Dr. Ada Lovelace", "specialty": "Pediatrics",
     "phone": null, "address": null, "pcs": null, "pcs_band": null,
     "drift_score": null, "drift_bucket": null}
]"#;

pub const REVIEWS_JSON: &str = r#"[
    {"id": 1, "provider_id": 42, "field_name": "phone", "current_value": "555-0100",
     "suggested_value": "555-0199", "reason": "NPI registry disagrees", "status": "pending",
     "created_at": "2026-10-15T02:03:00"},
    {"id": 2, "provider_id": 43, "field_name": "address", "current_value": "2 Bletchley Rd",
     "suggested_value": "2 Bletchley Park", "reason": "Maps listing differs", "status": "pending",
     "created_at": "2026-10-15T02:03:10"},
    {"id": 3, "provider_id": 44, "field_name": "license_no", "current_value": null,
     "suggested_value": "MD-4471", "reason": "Missing license", "status": "approved",
     "created_at": "2026-10-14T02:03:10"}
]"#;

pub const DETAIL_42_JSON: &str = r#"{
    "provider": {
        "id": 42, "name": "Dr. Grace Hopper", "phone": "555-0100", "address": "1 Navy Way",
        "specialty": "Cardiology", "license_no": "MD-1906", "license_expiry": "2026-12-09"
    },
    "validation": {
        "phone": {"confidence": 0.55, "sources": [{"source": "npi", "value": "555-0199"}, {"source": "maps", "value": "555-0100"}]},
        "address": {"confidence": 0.93, "sources": ["npi", "maps"]},
        "license_no": {"confidence": 0.7, "sources": [{"source": "state_board", "value": "MD-1906"}]}
    },
    "pcs": {
        "score": 82.4, "band": "amber",
        "components": {"srm": 88, "fr": 74, "st": 90, "mb": 65, "dq": 80, "rp": 92, "lh": 71, "ha": 85}
    },
    "drift": {"score": 0.71, "bucket": "High", "explanation": "License expires within 60 days."},
    "enrichment": {
        "summary": "Board-certified cardiologist.",
        "certifications": ["ABIM Cardiology"],
        "affiliations": ["Naval Medical Center"],
        "education": "Yale School of Medicine",
        "secondary_specialties": []
    }
}"#;

pub const DETAIL_43_JSON: &str = r#"{
    "provider": {
        "id": 43, "name": "Dr. Alan Turing", "phone": "555-0142", "address": "2 Bletchley Rd",
        "specialty": "Neurology", "license_no": "MD-1912", "license_expiry": "2028-06-23"
    },
    "validation": {
        "address": {"confidence": 0.48, "sources": [{"source": "maps", "value": "2 Bletchley Park"}]}
    },
    "pcs": {
        "score": 91.0, "band": "green",
        "components": {"srm": 95, "fr": 90, "st": 92, "mb": 88, "dq": 90, "rp": 85, "lh": 98, "ha": 90}
    },
    "drift": {"score": 0.12, "bucket": "Low", "explanation": "Recently verified."}
}"#;

pub const OCR_42_JSON: &str = r#"{
    "exists": true, "doc_type": "license", "ocr_confidence": 0.88,
    "ocr_text": "STATE MEDICAL BOARD\nLicense MD-1906\nExpires 2026-12-09",
    "path": "docs/42/license.png"
}"#;

pub const QA_42_JSON: &str = r#"[
    {"field_name": "phone", "confidence": 0.55, "sources": ["npi", "maps"], "created_at": "2026-10-15T02:03:00"},
    {"field_name": "address", "confidence": 0.93, "sources": ["npi"], "created_at": "2026-10-15T02:03:00"},
    {"field_name": "phone", "confidence": 0.61, "sources": ["npi"], "created_at": "2026-10-14T02:03:00"}
]"#;

fn parse<T: serde::de::DeserializeOwned>(name: &str, json: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("fixture {name} does not parse: {e}"))
}

pub fn stats() -> RunStats {
    parse("stats", STATS_JSON)
}

pub fn providers() -> Vec<ProviderSummary> {
    parse("providers", PROVIDERS_JSON)
}

/// All review items, including one that is no longer pending.
pub fn review_items() -> Vec<ManualReviewItem> {
    parse("reviews", REVIEWS_JSON)
}

pub fn detail(id: ProviderId) -> Option<ProviderDetail> {
    match id {
        42 => Some(parse("detail 42", DETAIL_42_JSON)),
        43 => Some(parse("detail 43", DETAIL_43_JSON)),
        _ => None,
    }
}

pub fn ocr(id: ProviderId) -> OcrRecord {
    match id {
        42 => parse("ocr 42", OCR_42_JSON),
        _ => OcrRecord::missing(),
    }
}

pub fn qa_history(id: ProviderId) -> Vec<QaRecord> {
    match id {
        42 => parse("qa 42", QA_42_JSON),
        _ => Vec::new(),
    }
}
