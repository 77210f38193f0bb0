//! Domain types shared by the provdash client, runtime and CLI.
//!
//! Every payload the backend returns is deserialized into one of these
//! types. Shape irregularities in the wire format (string-or-object
//! candidates, `null` collections) are normalized here so nothing above
//! this crate has to branch on JSON shape.

pub mod decision;
pub mod explain;
pub mod ordered;
pub mod provider;
pub mod review;
pub mod stats;
mod serde_util;

pub use decision::{AUTO_UPDATE_THRESHOLD, ConfidenceClass, Decision, classify_confidence};
pub use explain::{ExplainRequest, ExplainResponse};
pub use ordered::{Distribution, OrderedMap};
pub use provider::{
    DriftBucket, DriftInfo, Enrichment, OcrRecord, PcsBreakdown, PcsComponent, PcsComponents,
    ProviderDetail, ProviderId, ProviderRecord, ProviderSummary, QaRecord, SourceCandidate,
    ValidationEntry,
};
pub use review::{Ack, ManualReviewItem, ReviewAction, ReviewItemId, ReviewStatus};
pub use stats::{BatchKind, BatchRun, RunStats, RunSummary, TrendPoint, parse_backend_timestamp};
