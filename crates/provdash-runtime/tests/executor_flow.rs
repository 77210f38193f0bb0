//! Store + executor against the scripted fake backend.

use std::sync::Arc;
use std::time::Duration;

use provdash_client::ApiError;
use provdash_runtime::{Action, Effect, Event, Executor, Store, reload_all, run_until_idle};
use provdash_testing::{Endpoint, FakeBackend};
use provdash_types::{BatchKind, ReviewAction, ReviewStatus};
use tempfile::TempDir;
use tokio::sync::mpsc::{self, UnboundedReceiver};

struct Harness {
    store: Store,
    executor: Executor<FakeBackend>,
    events: UnboundedReceiver<Event>,
    _reports: TempDir,
}

impl Harness {
    fn new(backend: FakeBackend) -> Self {
        let reports = TempDir::new().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(),
            executor: Executor::new(Arc::new(backend), tx, reports.path().join("out")),
            events: rx,
            _reports: reports,
        }
    }

    async fn run(&mut self, effects: Vec<Effect>) {
        run_until_idle(&mut self.store, &self.executor, &mut self.events, effects).await;
    }

    async fn dispatch(&mut self, action: Action) {
        let effects = self.store.dispatch(action);
        self.run(effects).await;
    }

    fn backend(&self) -> &FakeBackend {
        self.executor.backend()
    }
}

#[tokio::test]
async fn test_reload_fetches_all_three_collections() {
    let backend = FakeBackend::new();
    match reload_all(&backend, 7).await {
        Event::Reloaded {
            seq,
            stats,
            providers,
            reviews,
        } => {
            assert_eq!(seq, 7);
            assert!(stats.is_ok());
            assert_eq!(providers.unwrap().len(), 3);
            assert_eq!(reviews.unwrap().len(), 3);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(backend.count(Endpoint::Stats), 1);
    assert_eq!(backend.count(Endpoint::Providers), 1);
    assert_eq!(backend.count(Endpoint::Reviews), 1);
}

#[tokio::test]
async fn test_one_failing_collection_does_not_block_the_others() {
    let mut h = Harness::new(FakeBackend::new().failing(Endpoint::Stats, ApiError::RateLimited));
    let effects = h.store.reload();
    h.run(effects).await;

    let state = h.store.state();
    assert!(state.stats.is_none());
    assert_eq!(state.providers.len(), 3);
    assert_eq!(state.pending_reviews.len(), 2);
    assert_eq!(state.notices.len(), 1);
}

#[tokio::test]
async fn test_approve_removes_only_that_item() {
    let mut h = Harness::new(FakeBackend::new());
    let effects = h.store.reload();
    h.run(effects).await;

    h.dispatch(Action::Review {
        id: 1,
        action: ReviewAction::Approve,
    })
    .await;

    let ids: Vec<i64> = h.store.state().pending_reviews.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2]);
    // One reload at start, one after the action.
    assert_eq!(h.backend().count(Endpoint::Reviews), 2);

    let statuses: Vec<(i64, ReviewStatus)> = h
        .backend()
        .review_items()
        .iter()
        .map(|i| (i.id, i.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (1, ReviewStatus::Approved),
            (2, ReviewStatus::Pending),
            (3, ReviewStatus::Approved)
        ]
    );
}

#[tokio::test]
async fn test_cancelled_override_issues_no_request() {
    let mut h = Harness::new(FakeBackend::new());
    let effects = h.store.reload();
    h.run(effects).await;

    h.dispatch(Action::SubmitOverride { id: 2, value: None }).await;
    h.dispatch(Action::SubmitOverride {
        id: 2,
        value: Some(String::new()),
    })
    .await;

    assert_eq!(h.backend().count(Endpoint::ReviewAction), 0);
    assert_eq!(h.store.state().pending_reviews.len(), 2);
}

#[tokio::test]
async fn test_failed_action_is_not_retried() {
    let backend = FakeBackend::new().failing_for(
        Endpoint::ReviewAction,
        2,
        ApiError::Server {
            status: 409,
            body: "conflict".to_string(),
        },
    );
    let mut h = Harness::new(backend);
    let effects = h.store.reload();
    h.run(effects).await;

    h.dispatch(Action::Review {
        id: 2,
        action: ReviewAction::Reject,
    })
    .await;

    assert_eq!(h.backend().count(Endpoint::ReviewAction), 1);
    assert_eq!(h.backend().count(Endpoint::Reviews), 1);
    assert_eq!(h.store.state().pending_reviews.len(), 2);
}

#[tokio::test]
async fn test_slow_detail_for_previous_provider_is_discarded() {
    let backend =
        FakeBackend::new().delayed_for(Endpoint::Detail, 42, Duration::from_millis(150));
    let mut h = Harness::new(backend);

    let mut effects = h.store.dispatch(Action::SelectProvider(42));
    effects.extend(h.store.dispatch(Action::SelectProvider(43)));
    h.run(effects).await;

    let detail = h.store.state().current_detail().unwrap();
    assert_eq!(detail.provider_id, 43);
    assert_eq!(detail.detail.ready().unwrap().provider.id, 43);
    assert!(detail.ocr.ready().is_some());
    assert_eq!(h.backend().count(Endpoint::Detail), 2);
}

#[tokio::test]
async fn test_rate_limited_field_explanation() {
    let backend = FakeBackend::new().failing_explain("address", ApiError::RateLimited);
    let mut h = Harness::new(backend);
    h.dispatch(Action::SelectProvider(42)).await;

    h.dispatch(Action::ExplainField("phone".to_string())).await;
    h.dispatch(Action::ExplainField("address".to_string())).await;

    let detail = h.store.state().current_detail().unwrap();
    assert_eq!(
        detail.explanation("phone"),
        Some("phone was marked manual_review at confidence 0.55.")
    );
    assert_eq!(detail.explanation("address"), None);
    assert_eq!(
        detail.explain_error(),
        Some("Rate limit exceeded. Please wait.")
    );
}

#[tokio::test]
async fn test_confirmed_batch_runs_and_reloads() {
    let mut h = Harness::new(FakeBackend::new());
    h.dispatch(Action::RequestBatch(BatchKind::Weekly)).await;
    assert_eq!(h.backend().count(Endpoint::Batch), 0);

    h.dispatch(Action::ConfirmPending).await;
    assert_eq!(h.backend().count(Endpoint::Batch), 1);
    assert_eq!(h.backend().count(Endpoint::Stats), 1);
    let stats = h.store.state().stats.as_ref().unwrap();
    assert_eq!(stats.latest_run.run_type.as_deref(), Some("weekly"));
}

#[tokio::test]
async fn test_report_download_writes_dated_file() {
    let mut h = Harness::new(FakeBackend::new());
    h.dispatch(Action::DownloadReport).await;

    let notice = h.store.state().latest_notice().unwrap();
    assert!(notice.text.starts_with("Report saved to "), "{}", notice.text);
    assert!(notice.text.contains("validation_report_"));
    assert!(!h.store.state().report_downloading);
}
