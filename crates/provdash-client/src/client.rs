//! HTTP client for the validation backend.

use std::time::Duration;

use provdash_types::{
    Ack, BatchKind, BatchRun, ExplainRequest, ExplainResponse, ManualReviewItem, OcrRecord,
    ProviderDetail, ProviderId, ProviderSummary, QaRecord, ReviewAction, ReviewItemId, RunStats,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::{ApiError, ApiResult};
use crate::report::Report;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LONG_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied to every request unless overridden.
    pub timeout: Duration,
    /// Batch runs and report downloads.
    pub long_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            long_timeout: DEFAULT_LONG_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    long_timeout: Duration,
}

impl ApiClient {
    /// `base_url` is like `http://127.0.0.1:8000`; a trailing slash is dropped.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("provdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            long_timeout: config.long_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), body);
        warn!(status = status.as_u16(), error = %err, "backend request failed");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.send(self.http.get(&url)).await?;
        Self::decode(response).await
    }

    async fn get_report(&self, path: &str) -> ApiResult<Report> {
        let url = self.url(path);
        debug!(url = %url, "GET report");
        let response = self
            .send(self.http.get(&url).timeout(self.long_timeout))
            .await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok(Report::new(bytes.to_vec(), content_type))
    }
}

impl Backend for ApiClient {
    async fn fetch_stats(&self) -> ApiResult<RunStats> {
        self.get_json("/stats").await
    }

    async fn fetch_providers(&self) -> ApiResult<Vec<ProviderSummary>> {
        let providers: Vec<ProviderSummary> = self.get_json("/providers").await?;
        debug!(count = providers.len(), "fetched providers");
        Ok(providers)
    }

    async fn fetch_pending_reviews(&self) -> ApiResult<Vec<ManualReviewItem>> {
        self.get_json("/manual-review").await
    }

    async fn fetch_provider_detail(&self, id: ProviderId) -> ApiResult<ProviderDetail> {
        self.get_json(&format!("/providers/{id}/details")).await
    }

    async fn fetch_ocr(&self, id: ProviderId) -> ApiResult<OcrRecord> {
        self.get_json(&format!("/providers/{id}/ocr")).await
    }

    async fn fetch_qa_history(&self, id: ProviderId) -> ApiResult<Vec<QaRecord>> {
        self.get_json(&format!("/providers/{id}/qa")).await
    }

    async fn run_batch(&self, kind: BatchKind) -> ApiResult<BatchRun> {
        let url = self.url("/run-batch");
        info!(url = %url, kind = %kind, "starting batch run");
        let request = self
            .http
            .post(&url)
            .query(&[("type", kind.as_str())])
            .timeout(self.long_timeout);
        let run: BatchRun = Self::decode(self.send(request).await?).await?;
        info!(
            processed = run.count_processed,
            auto_updates = run.auto_updates,
            manual_reviews = run.manual_reviews,
            "batch run complete"
        );
        Ok(run)
    }

    async fn download_report(&self) -> ApiResult<Report> {
        match self.get_report("/reports/latest").await {
            Err(ApiError::Server { status: 404, .. }) => {
                debug!("no /reports/latest, trying /reports/pdf");
                self.get_report("/reports/pdf").await
            }
            other => other,
        }
    }

    async fn submit_review_action(&self, id: ReviewItemId, action: &ReviewAction) -> ApiResult<Ack> {
        let url = self.url(&format!("/manual-review/{id}/{}", action.verb()));
        info!(url = %url, item = id, action = action.verb(), "submitting review action");
        let mut request = self.http.post(&url);
        if let Some(value) = action.override_value() {
            request = request.query(&[("value", value)]);
        }
        let response = self.send(request).await?;
        // Some deployments answer with an empty body.
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Ack::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn explain(&self, request: &ExplainRequest) -> ApiResult<ExplainResponse> {
        let url = self.url("/explain");
        debug!(url = %url, field = %request.field, "requesting explanation");
        let response = self.send(self.http.post(&url).json(request)).await?;
        Self::decode(response).await
    }

    async fn health(&self) -> ApiResult<Ack> {
        self.get_json("/health").await
    }
}
