use provdash_types::{ConfidenceClass, Distribution, DriftBucket, classify_confidence};

use crate::presentation::view_models::{
    BarViewModel, DriftChipViewModel, PcsBadgeViewModel, ProgressViewModel, StatusLevel,
};

/// Bars in backend order, scaled to the largest count. A floor of one keeps
/// all-zero distributions at zero width.
pub fn distribution_to_bars(distribution: &Distribution) -> Vec<BarViewModel> {
    let max = distribution.values().copied().max().unwrap_or(0).max(1);
    distribution
        .iter()
        .map(|(label, &count)| BarViewModel {
            label: label.to_string(),
            count,
            fraction: count as f64 / max as f64,
        })
        .collect()
}

pub fn pcs_badge(score: Option<f64>, band: Option<&str>) -> PcsBadgeViewModel {
    let level = match band.map(str::to_ascii_lowercase).as_deref() {
        _ if score.is_none() => StatusLevel::Info,
        Some("green") => StatusLevel::Success,
        Some("amber") | Some("yellow") => StatusLevel::Warning,
        Some("red") => StatusLevel::Error,
        _ => StatusLevel::Info,
    };
    PcsBadgeViewModel {
        score,
        band: band.map(str::to_string),
        level,
    }
}

pub fn drift_chip(bucket: Option<&DriftBucket>) -> DriftChipViewModel {
    let level = match bucket {
        Some(DriftBucket::High) => StatusLevel::Error,
        Some(DriftBucket::Medium) => StatusLevel::Warning,
        Some(DriftBucket::Low) => StatusLevel::Success,
        Some(DriftBucket::Other(_)) | None => StatusLevel::Info,
    };
    DriftChipViewModel {
        bucket: bucket.map(|b| b.as_str().to_string()),
        level,
    }
}

/// `value / max` clamped to [0, 1]; NaN and non-positive `max` give 0.
pub fn progress(value: f64, max: f64, level: StatusLevel) -> ProgressViewModel {
    let fraction = if max > 0.0 { value / max } else { 0.0 };
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    ProgressViewModel { fraction, level }
}

pub fn confidence_level(class: ConfidenceClass) -> StatusLevel {
    match class {
        ConfidenceClass::AutoUpdated => StatusLevel::Success,
        ConfidenceClass::ManualReview => StatusLevel::Warning,
    }
}

pub fn confidence_progress(confidence: f64) -> ProgressViewModel {
    progress(confidence, 1.0, confidence_level(classify_confidence(confidence)))
}
