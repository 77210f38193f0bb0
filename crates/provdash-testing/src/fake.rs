//! Scripted in-memory backend.
//!
//! Serves fixture data by default, records every call, and can be told to
//! fail or stall specific endpoints. Review actions mutate the stored
//! queue the way the real backend would, so a reload after an action sees
//! the new status.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use provdash_client::{ApiError, ApiResult, Backend, Report};
use provdash_types::{
    Ack, BatchKind, BatchRun, ExplainRequest, ExplainResponse, ManualReviewItem, OcrRecord,
    ProviderDetail, ProviderId, ProviderSummary, QaRecord, ReviewAction, ReviewItemId, RunStats,
};

use crate::fixtures;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stats,
    Providers,
    Reviews,
    Detail,
    Ocr,
    Qa,
    Batch,
    Report,
    ReviewAction,
    Explain,
    Health,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Stats,
    Providers,
    Reviews,
    Detail(ProviderId),
    Ocr(ProviderId),
    Qa(ProviderId),
    Batch(BatchKind),
    Report,
    Review(ReviewItemId, ReviewAction),
    Explain(ExplainRequest),
    Health,
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::Stats => Endpoint::Stats,
            Call::Providers => Endpoint::Providers,
            Call::Reviews => Endpoint::Reviews,
            Call::Detail(_) => Endpoint::Detail,
            Call::Ocr(_) => Endpoint::Ocr,
            Call::Qa(_) => Endpoint::Qa,
            Call::Batch(_) => Endpoint::Batch,
            Call::Report => Endpoint::Report,
            Call::Review(..) => Endpoint::ReviewAction,
            Call::Explain(_) => Endpoint::Explain,
            Call::Health => Endpoint::Health,
        }
    }

    fn key(&self) -> Option<i64> {
        match self {
            Call::Detail(id) | Call::Ocr(id) | Call::Qa(id) | Call::Review(id, _) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct FakeState {
    stats: RunStats,
    providers: Vec<ProviderSummary>,
    reviews: Vec<ManualReviewItem>,
    details: HashMap<ProviderId, ProviderDetail>,
    ocr: HashMap<ProviderId, OcrRecord>,
    qa: HashMap<ProviderId, Vec<QaRecord>>,
    report: Report,
    failures: HashMap<(Endpoint, Option<i64>), ApiError>,
    explain_failures: HashMap<String, ApiError>,
    delays: HashMap<(Endpoint, Option<i64>), Duration>,
    calls: Vec<Call>,
}

pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    /// Backend preloaded with the sample fixtures.
    pub fn new() -> Self {
        let mut details = HashMap::new();
        let mut ocr = HashMap::new();
        let mut qa = HashMap::new();
        for provider in fixtures::providers() {
            if let Some(detail) = fixtures::detail(provider.id) {
                details.insert(provider.id, detail);
            }
            ocr.insert(provider.id, fixtures::ocr(provider.id));
            qa.insert(provider.id, fixtures::qa_history(provider.id));
        }
        Self {
            state: Mutex::new(FakeState {
                stats: fixtures::stats(),
                providers: fixtures::providers(),
                reviews: fixtures::review_items(),
                details,
                ocr,
                qa,
                report: Report::new(b"%PDF-1.4\n% provdash fixture\n".to_vec(), None),
                failures: HashMap::new(),
                explain_failures: HashMap::new(),
                delays: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// Backend with no data at all.
    pub fn empty() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.lock();
            state.stats = RunStats::default();
            state.providers.clear();
            state.reviews.clear();
            state.details.clear();
            state.ocr.clear();
            state.qa.clear();
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake backend state poisoned")
    }

    pub fn with_reviews(self, reviews: Vec<ManualReviewItem>) -> Self {
        self.lock().reviews = reviews;
        self
    }

    pub fn with_providers(self, providers: Vec<ProviderSummary>) -> Self {
        self.lock().providers = providers;
        self
    }

    pub fn with_stats(self, stats: RunStats) -> Self {
        self.lock().stats = stats;
        self
    }

    /// Fail every call to `endpoint`.
    pub fn failing(self, endpoint: Endpoint, err: ApiError) -> Self {
        self.lock().failures.insert((endpoint, None), err);
        self
    }

    /// Fail calls to `endpoint` for one provider or review item id.
    pub fn failing_for(self, endpoint: Endpoint, id: i64, err: ApiError) -> Self {
        self.lock().failures.insert((endpoint, Some(id)), err);
        self
    }

    /// Fail explanations requested for `field`.
    pub fn failing_explain(self, field: &str, err: ApiError) -> Self {
        self.lock().explain_failures.insert(field.to_string(), err);
        self
    }

    /// Delay calls to `endpoint` for one id before answering.
    pub fn delayed_for(self, endpoint: Endpoint, id: i64, delay: Duration) -> Self {
        self.lock().delays.insert((endpoint, Some(id)), delay);
        self
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.failures.clear();
        state.explain_failures.clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    /// Current review items as the backend sees them.
    pub fn review_items(&self) -> Vec<ManualReviewItem> {
        self.lock().reviews.clone()
    }

    /// Record the call and look up its scripted failure and delay.
    fn record(&self, call: Call) -> (Option<ApiError>, Option<Duration>) {
        let mut state = self.lock();
        let endpoint = call.endpoint();
        let key = call.key();
        let failure = state
            .failures
            .get(&(endpoint, key))
            .or_else(|| state.failures.get(&(endpoint, None)))
            .cloned()
            .or_else(|| match &call {
                Call::Explain(request) => state.explain_failures.get(&request.field).cloned(),
                _ => None,
            });
        let delay = state.delays.get(&(endpoint, key)).copied();
        state.calls.push(call);
        (failure, delay)
    }

    async fn enter(&self, call: Call) -> ApiResult<()> {
        let (failure, delay) = self.record(call);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Server {
        status: 404,
        body: format!("{what} not found"),
    }
}

impl Backend for FakeBackend {
    async fn fetch_stats(&self) -> ApiResult<RunStats> {
        self.enter(Call::Stats).await?;
        Ok(self.lock().stats.clone())
    }

    async fn fetch_providers(&self) -> ApiResult<Vec<ProviderSummary>> {
        self.enter(Call::Providers).await?;
        Ok(self.lock().providers.clone())
    }

    async fn fetch_pending_reviews(&self) -> ApiResult<Vec<ManualReviewItem>> {
        self.enter(Call::Reviews).await?;
        Ok(self.lock().reviews.clone())
    }

    async fn fetch_provider_detail(&self, id: ProviderId) -> ApiResult<ProviderDetail> {
        self.enter(Call::Detail(id)).await?;
        self.lock()
            .details
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("Provider"))
    }

    async fn fetch_ocr(&self, id: ProviderId) -> ApiResult<OcrRecord> {
        self.enter(Call::Ocr(id)).await?;
        Ok(self.lock().ocr.get(&id).cloned().unwrap_or_else(OcrRecord::missing))
    }

    async fn fetch_qa_history(&self, id: ProviderId) -> ApiResult<Vec<QaRecord>> {
        self.enter(Call::Qa(id)).await?;
        Ok(self.lock().qa.get(&id).cloned().unwrap_or_default())
    }

    async fn run_batch(&self, kind: BatchKind) -> ApiResult<BatchRun> {
        self.enter(Call::Batch(kind)).await?;
        let mut state = self.lock();
        let pending = state.reviews.iter().filter(|r| r.status.is_pending()).count() as u64;
        let processed = state.providers.len() as u64;
        let run = BatchRun {
            id: state.stats.latest_run.id.map(|id| id + 1).or(Some(1)),
            run_type: Some(kind.as_str().to_string()),
            count_processed: processed,
            auto_updates: processed.saturating_sub(pending),
            manual_reviews: pending,
            started_at: Some("2026-10-16T02:00:00".to_string()),
            finished_at: Some("2026-10-16T02:03:00".to_string()),
        };
        state.stats.latest_run = run.clone();
        Ok(run)
    }

    async fn download_report(&self) -> ApiResult<Report> {
        self.enter(Call::Report).await?;
        Ok(self.lock().report.clone())
    }

    async fn submit_review_action(&self, id: ReviewItemId, action: &ReviewAction) -> ApiResult<Ack> {
        self.enter(Call::Review(id, action.clone())).await?;
        let mut state = self.lock();
        let item = state
            .reviews
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found("Review item"))?;
        item.status = action.resulting_status();
        if let Some(value) = action.override_value() {
            item.current_value = Some(value.to_string());
        }
        Ok(Ack {
            status: Some("ok".to_string()),
        })
    }

    async fn explain(&self, request: &ExplainRequest) -> ApiResult<ExplainResponse> {
        self.enter(Call::Explain(request.clone())).await?;
        Ok(ExplainResponse {
            explanation: format!(
                "{} was marked {} at confidence {:.2}.",
                request.field,
                request.decision.as_str(),
                request.confidence
            ),
        })
    }

    async fn health(&self) -> ApiResult<Ack> {
        self.enter(Call::Health).await?;
        Ok(Ack {
            status: Some("ok".to_string()),
        })
    }
}
