//! Application store: the single owner of dashboard state.
//!
//! Views read [`AppState`] and turn input into [`Action`]s. The store
//! answers with [`Effect`]s describing I/O to perform; the executor runs
//! them and feeds the outcome back as [`Event`]s. All mutation happens in
//! `dispatch` and `apply`.

use std::fmt;
use std::path::PathBuf;

use provdash_client::ApiResult;
use provdash_types::{
    Ack, BatchKind, BatchRun, ExplainRequest, ExplainResponse, ManualReviewItem, OcrRecord,
    ProviderDetail, ProviderId, ProviderSummary, QaRecord, ReviewAction, ReviewItemId, RunStats,
};
use tracing::{debug, info, warn};

use crate::Result;
use crate::detail::DetailState;
use crate::review::{ACTION_FAILED_MESSAGE, ReviewState};

pub const BATCH_COMPLETE_MESSAGE: &str = "Batch run complete!";

const MAX_NOTICES: usize = 5;
const MAX_HISTORY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Providers,
    Detail(ProviderId),
    ManualReview,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Providers => "Providers",
            View::Detail(_) => "Provider Detail",
            View::ManualReview => "Manual Review",
        }
    }
}

/// User intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(View),
    SelectProvider(ProviderId),
    Back,
    SetSearch(String),
    Reload,
    ExplainField(String),
    ExplainItem(ReviewItemId),
    Review {
        id: ReviewItemId,
        action: ReviewAction,
    },
    /// Result of the override prompt; `None` when the prompt was cancelled.
    SubmitOverride {
        id: ReviewItemId,
        value: Option<String>,
    },
    RequestBatch(BatchKind),
    ConfirmPending,
    CancelPending,
    DownloadReport,
    DismissNotices,
}

/// I/O the store wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Stats, providers and the review queue, concurrently. `seq` orders
    /// overlapping reloads.
    ReloadAll { seq: u64 },
    /// Detail, OCR and QA history for one provider, independently.
    LoadProvider(ProviderId),
    ExplainField {
        provider_id: ProviderId,
        request: ExplainRequest,
    },
    ExplainItem {
        id: ReviewItemId,
        request: ExplainRequest,
    },
    SubmitReview {
        id: ReviewItemId,
        action: ReviewAction,
    },
    RunBatch(BatchKind),
    DownloadReport,
}

/// Completed I/O.
#[derive(Debug)]
pub enum Event {
    Reloaded {
        seq: u64,
        stats: ApiResult<RunStats>,
        providers: ApiResult<Vec<ProviderSummary>>,
        reviews: ApiResult<Vec<ManualReviewItem>>,
    },
    DetailLoaded {
        provider_id: ProviderId,
        result: ApiResult<ProviderDetail>,
    },
    OcrLoaded {
        provider_id: ProviderId,
        result: ApiResult<OcrRecord>,
    },
    QaLoaded {
        provider_id: ProviderId,
        result: ApiResult<Vec<QaRecord>>,
    },
    FieldExplained {
        provider_id: ProviderId,
        field: String,
        result: ApiResult<ExplainResponse>,
    },
    ItemExplained {
        id: ReviewItemId,
        result: ApiResult<ExplainResponse>,
    },
    ReviewSubmitted {
        id: ReviewItemId,
        action: ReviewAction,
        result: ApiResult<Ack>,
    },
    BatchFinished(ApiResult<BatchRun>),
    ReportSaved(Result<PathBuf>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Action waiting for the user to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    RunBatch(BatchKind),
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confirmation::RunBatch(kind) => write!(
                f,
                "Run a {kind} batch now? Scoring the full directory can take several minutes."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub view: View,
    history: Vec<View>,
    pub stats: Option<RunStats>,
    pub providers: Vec<ProviderSummary>,
    /// Only items whose status is pending.
    pub pending_reviews: Vec<ManualReviewItem>,
    pub reloading: bool,
    /// Sequence number of the newest reload issued.
    reload_seq: u64,
    /// Sequence number of the newest reload applied.
    applied_reload: u64,
    pub search: String,
    pub detail: Option<DetailState>,
    pub review: ReviewState,
    pub notices: Vec<Notice>,
    pub pending_confirmation: Option<Confirmation>,
    pub batch_running: bool,
    pub report_downloading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Dashboard,
            history: Vec::new(),
            stats: None,
            providers: Vec::new(),
            pending_reviews: Vec::new(),
            reloading: false,
            reload_seq: 0,
            applied_reload: 0,
            search: String::new(),
            detail: None,
            review: ReviewState::default(),
            notices: Vec::new(),
            pending_confirmation: None,
            batch_running: false,
            report_downloading: false,
        }
    }
}

impl AppState {
    /// Providers matching the search filter, in backend order.
    pub fn filtered_providers(&self) -> Vec<&ProviderSummary> {
        self.providers
            .iter()
            .filter(|p| p.matches(&self.search))
            .collect()
    }

    pub fn provider(&self, id: ProviderId) -> Option<&ProviderSummary> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn pending_item(&self, id: ReviewItemId) -> Option<&ManualReviewItem> {
        self.pending_reviews.iter().find(|item| item.id == id)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Detail state of the provider currently on screen.
    pub fn current_detail(&self) -> Option<&DetailState> {
        match self.view {
            View::Detail(id) => self.detail.as_ref().filter(|d| d.provider_id == id),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn reload(&mut self) -> Vec<Effect> {
        self.dispatch(Action::Reload)
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Navigate(View::Detail(id)) | Action::SelectProvider(id) => {
                self.select_provider(id)
            }
            Action::Navigate(view) => {
                self.navigate(view);
                Vec::new()
            }
            Action::Back => self.back(),
            Action::SetSearch(query) => {
                self.state.search = query;
                Vec::new()
            }
            Action::Reload => {
                self.state.reload_seq += 1;
                self.state.reloading = true;
                vec![Effect::ReloadAll {
                    seq: self.state.reload_seq,
                }]
            }
            Action::ExplainField(field) => self.explain_field(&field),
            Action::ExplainItem(id) => self.explain_item(id),
            Action::Review { id, action } => self.submit_review(id, action),
            Action::SubmitOverride { id, value } => {
                match value.as_deref().and_then(ReviewAction::override_with) {
                    Some(action) => self.submit_review(id, action),
                    None => {
                        debug!(item = id, "override cancelled or empty; nothing sent");
                        Vec::new()
                    }
                }
            }
            Action::RequestBatch(kind) => {
                if self.state.batch_running {
                    self.notify(Notice::info("A batch run is already in progress."));
                } else {
                    self.state.pending_confirmation = Some(Confirmation::RunBatch(kind));
                }
                Vec::new()
            }
            Action::ConfirmPending => match self.state.pending_confirmation.take() {
                Some(Confirmation::RunBatch(kind)) => {
                    self.state.batch_running = true;
                    self.notify(Notice::info(format!("Running {kind} batch...")));
                    vec![Effect::RunBatch(kind)]
                }
                None => Vec::new(),
            },
            Action::CancelPending => {
                self.state.pending_confirmation = None;
                Vec::new()
            }
            Action::DownloadReport => {
                if self.state.report_downloading {
                    return Vec::new();
                }
                self.state.report_downloading = true;
                vec![Effect::DownloadReport]
            }
            Action::DismissNotices => {
                self.state.notices.clear();
                if let Some(detail) = self.state.detail.as_mut() {
                    detail.dismiss_explain_error();
                }
                Vec::new()
            }
        }
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Reloaded {
                seq,
                stats,
                providers,
                reviews,
            } => {
                self.apply_reload(seq, stats, providers, reviews);
                Vec::new()
            }
            Event::DetailLoaded {
                provider_id,
                result,
            } => {
                if let Some(detail) = self.detail_for(provider_id, "detail") {
                    if let Err(err) = &result {
                        warn!(provider_id, error = %err, "failed to load provider detail");
                    }
                    detail.detail.settle(result);
                }
                Vec::new()
            }
            Event::OcrLoaded {
                provider_id,
                result,
            } => {
                if let Some(detail) = self.detail_for(provider_id, "ocr") {
                    detail.ocr.settle(result);
                }
                Vec::new()
            }
            Event::QaLoaded {
                provider_id,
                result,
            } => {
                if let Some(detail) = self.detail_for(provider_id, "qa history") {
                    detail.qa_history.settle(result);
                }
                Vec::new()
            }
            Event::FieldExplained {
                provider_id,
                field,
                result,
            } => {
                if let Err(err) = &result {
                    warn!(provider_id, field = %field, error = %err, "explanation failed");
                }
                if let Some(detail) = self.detail_for(provider_id, "explanation") {
                    detail.finish_explain(&field, result.map(|r| r.explanation));
                }
                Vec::new()
            }
            Event::ItemExplained { id, result } => {
                if let Err(err) = &result {
                    warn!(item = id, error = %err, "item explanation failed");
                }
                if !self
                    .state
                    .review
                    .finish_explain(id, result.map(|r| r.explanation))
                {
                    debug!(item = id, "dropping explanation for item no longer shown");
                }
                Vec::new()
            }
            Event::ReviewSubmitted { id, action, result } => {
                self.state.review.finish_submit(id);
                match result {
                    Ok(_) => {
                        info!(item = id, action = %action, "review action accepted");
                        self.notify(Notice::success(format!("Item #{id}: {action}")));
                        self.reload()
                    }
                    Err(err) => {
                        warn!(item = id, action = %action, error = %err, "review action failed");
                        self.notify(Notice::error(ACTION_FAILED_MESSAGE));
                        Vec::new()
                    }
                }
            }
            Event::BatchFinished(result) => {
                self.state.batch_running = false;
                match result {
                    Ok(run) => {
                        info!(processed = run.count_processed, "batch run finished");
                        self.notify(Notice::success(BATCH_COMPLETE_MESSAGE));
                        self.reload()
                    }
                    Err(err) => {
                        warn!(error = %err, "batch run failed");
                        self.notify(Notice::error(format!("Batch run failed: {err}")));
                        Vec::new()
                    }
                }
            }
            Event::ReportSaved(result) => {
                self.state.report_downloading = false;
                match result {
                    Ok(path) => {
                        self.notify(Notice::success(format!("Report saved to {}", path.display())))
                    }
                    Err(err) => {
                        warn!(error = %err, "report download failed");
                        self.notify(Notice::error(format!("Failed to download report: {err}")));
                    }
                }
                Vec::new()
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.state.notices.push(notice);
        if self.state.notices.len() > MAX_NOTICES {
            self.state.notices.remove(0);
        }
    }

    fn apply_reload(
        &mut self,
        seq: u64,
        stats: ApiResult<RunStats>,
        providers: ApiResult<Vec<ProviderSummary>>,
        reviews: ApiResult<Vec<ManualReviewItem>>,
    ) {
        // A newer snapshot is already on screen.
        if seq < self.state.applied_reload {
            debug!(seq, applied = self.state.applied_reload, "dropping stale reload");
            return;
        }
        self.state.applied_reload = seq;
        if seq >= self.state.reload_seq {
            self.state.reloading = false;
        }

        match stats {
            Ok(stats) => self.state.stats = Some(stats),
            Err(err) => {
                warn!(error = %err, "failed to reload stats");
                self.notify(Notice::error(format!("Failed to load stats: {err}")));
            }
        }

        match providers {
            Ok(providers) => self.state.providers = providers,
            Err(err) => {
                warn!(error = %err, "failed to reload providers");
                self.notify(Notice::error(format!("Failed to load providers: {err}")));
            }
        }

        match reviews {
            Ok(items) => {
                let pending: Vec<ManualReviewItem> =
                    items.into_iter().filter(|item| item.status.is_pending()).collect();
                self.state.review.retain_items(&pending);
                self.state.pending_reviews = pending;
            }
            Err(err) => {
                warn!(error = %err, "failed to reload manual review queue");
                self.notify(Notice::error(format!("Failed to load review queue: {err}")));
            }
        }
    }

    fn detail_for(&mut self, provider_id: ProviderId, what: &str) -> Option<&mut DetailState> {
        let current = self.state.detail.as_ref().map(|d| d.provider_id);
        if current != Some(provider_id) {
            debug!(provider_id, ?current, what, "dropping late result for unselected provider");
            return None;
        }
        self.state.detail.as_mut()
    }

    fn leave_current_view(&mut self) {
        match self.state.view {
            View::Detail(_) => self.state.detail = None,
            View::ManualReview => self.state.review.clear_explanations(),
            View::Dashboard | View::Providers => {}
        }
    }

    fn push_history(&mut self, view: View) {
        self.state.history.push(view);
        if self.state.history.len() > MAX_HISTORY {
            self.state.history.remove(0);
        }
    }

    fn navigate(&mut self, next: View) {
        if self.state.view == next {
            return;
        }
        self.leave_current_view();
        let previous = self.state.view;
        self.push_history(previous);
        self.state.view = next;
    }

    fn select_provider(&mut self, id: ProviderId) -> Vec<Effect> {
        match self.state.view {
            // Moving between providers replaces the detail entry.
            View::Detail(_) => self.leave_current_view(),
            _ => self.navigate(View::Detail(id)),
        }
        self.state.view = View::Detail(id);
        self.state.detail = Some(DetailState::loading(id));
        vec![Effect::LoadProvider(id)]
    }

    fn back(&mut self) -> Vec<Effect> {
        let Some(previous) = self.state.history.pop() else {
            self.navigate(View::Dashboard);
            self.state.history.clear();
            return Vec::new();
        };
        self.leave_current_view();
        self.state.view = previous;
        match previous {
            View::Detail(id) => {
                self.state.detail = Some(DetailState::loading(id));
                vec![Effect::LoadProvider(id)]
            }
            _ => Vec::new(),
        }
    }

    fn explain_field(&mut self, field: &str) -> Vec<Effect> {
        let View::Detail(provider_id) = self.state.view else {
            return Vec::new();
        };
        let Some(detail) = self.state.detail.as_mut() else {
            return Vec::new();
        };
        match detail.begin_explain(field) {
            Some(request) => vec![Effect::ExplainField {
                provider_id,
                request,
            }],
            None => {
                debug!(provider_id, field, "explain request ignored");
                Vec::new()
            }
        }
    }

    fn explain_item(&mut self, id: ReviewItemId) -> Vec<Effect> {
        let Some(item) = self.state.pending_reviews.iter().find(|item| item.id == id) else {
            return Vec::new();
        };
        match self.state.review.begin_explain(item) {
            Some(request) => vec![Effect::ExplainItem { id, request }],
            None => Vec::new(),
        }
    }

    fn submit_review(&mut self, id: ReviewItemId, action: ReviewAction) -> Vec<Effect> {
        let action = match action {
            ReviewAction::Override(value) => match ReviewAction::override_with(&value) {
                Some(action) => action,
                None => return Vec::new(),
            },
            other => other,
        };
        if self.state.pending_item(id).is_none() {
            debug!(item = id, "review action for an item not in the queue");
            return Vec::new();
        }
        if !self.state.review.begin_submit(id) {
            return Vec::new();
        }
        vec![Effect::SubmitReview { id, action }]
    }
}
