use std::future::Future;

use provdash_types::{
    Ack, BatchKind, BatchRun, ExplainRequest, ExplainResponse, ManualReviewItem, OcrRecord,
    ProviderDetail, ProviderId, ProviderSummary, QaRecord, ReviewAction, ReviewItemId, RunStats,
};

use crate::error::ApiResult;
use crate::report::Report;

/// Operations the dashboard needs from the validation backend.
///
/// Implemented by [`ApiClient`](crate::ApiClient) over HTTP and by the
/// scripted fake in `provdash-testing`. Futures are `Send` so the executor
/// can hand them to `tokio::spawn`.
pub trait Backend: Send + Sync + 'static {
    fn fetch_stats(&self) -> impl Future<Output = ApiResult<RunStats>> + Send;

    fn fetch_providers(&self) -> impl Future<Output = ApiResult<Vec<ProviderSummary>>> + Send;

    /// Every review item the backend knows about, whatever its status.
    fn fetch_pending_reviews(
        &self,
    ) -> impl Future<Output = ApiResult<Vec<ManualReviewItem>>> + Send;

    fn fetch_provider_detail(
        &self,
        id: ProviderId,
    ) -> impl Future<Output = ApiResult<ProviderDetail>> + Send;

    fn fetch_ocr(&self, id: ProviderId) -> impl Future<Output = ApiResult<OcrRecord>> + Send;

    fn fetch_qa_history(
        &self,
        id: ProviderId,
    ) -> impl Future<Output = ApiResult<Vec<QaRecord>>> + Send;

    /// Resolves once the backend has finished the run.
    fn run_batch(&self, kind: BatchKind) -> impl Future<Output = ApiResult<BatchRun>> + Send;

    fn download_report(&self) -> impl Future<Output = ApiResult<Report>> + Send;

    fn submit_review_action(
        &self,
        id: ReviewItemId,
        action: &ReviewAction,
    ) -> impl Future<Output = ApiResult<Ack>> + Send;

    fn explain(
        &self,
        request: &ExplainRequest,
    ) -> impl Future<Output = ApiResult<ExplainResponse>> + Send;

    fn health(&self) -> impl Future<Output = ApiResult<Ack>> + Send;
}
