//! HTTP wrapper around [`FakeBackend`] for end-to-end CLI tests.
//!
//! The server runs on its own thread and runtime so blocking tests
//! (e.g. `assert_cmd`) can talk to it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use provdash_client::{ApiError, ApiResult, Backend};
use provdash_types::{BatchKind, ExplainRequest, ReviewAction};
use serde::Serialize;
use tokio::sync::oneshot;

use crate::fake::FakeBackend;

type Shared = Arc<FakeBackend>;

fn respond<T: Serialize>(result: ApiResult<T>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ApiError) -> Response {
    match err {
        ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded").into_response(),
        ApiError::Server { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        }
        ApiError::Network(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg).into_response(),
        ApiError::Decode(msg) => (StatusCode::OK, format!("not json: {msg}")).into_response(),
    }
}

async fn review(
    State(backend): State<Shared>,
    Path((id, verb)): Path<(i64, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let action = match verb.as_str() {
        "approve" => Some(ReviewAction::Approve),
        "reject" => Some(ReviewAction::Reject),
        "override" => params
            .get("value")
            .and_then(|value| ReviewAction::override_with(value)),
        _ => None,
    };
    match action {
        Some(action) => respond(backend.submit_review_action(id, &action).await),
        None => (StatusCode::UNPROCESSABLE_ENTITY, "invalid review action").into_response(),
    }
}

async fn run_batch(
    State(backend): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let kind = match params.get("type").map(String::as_str) {
        None | Some("daily") => BatchKind::Daily,
        Some("weekly") => BatchKind::Weekly,
        Some("full") => BatchKind::Full,
        Some(_) => return (StatusCode::UNPROCESSABLE_ENTITY, "unknown batch type").into_response(),
    };
    respond(backend.run_batch(kind).await)
}

async fn report(State(backend): State<Shared>) -> Response {
    match backend.download_report().await {
        Ok(report) => ([(header::CONTENT_TYPE, report.content_type)], report.bytes).into_response(),
        Err(err) => error_response(err),
    }
}

async fn explain(State(backend): State<Shared>, Json(request): Json<ExplainRequest>) -> Response {
    respond(backend.explain(&request).await)
}

pub fn router(backend: Shared) -> Router {
    Router::new()
        .route("/health", get(|State(b): State<Shared>| async move { respond(b.health().await) }))
        .route("/stats", get(|State(b): State<Shared>| async move { respond(b.fetch_stats().await) }))
        .route(
            "/providers",
            get(|State(b): State<Shared>| async move { respond(b.fetch_providers().await) }),
        )
        .route(
            "/providers/:id/details",
            get(|State(b): State<Shared>, Path(id): Path<i64>| async move {
                respond(b.fetch_provider_detail(id).await)
            }),
        )
        .route(
            "/providers/:id/ocr",
            get(|State(b): State<Shared>, Path(id): Path<i64>| async move {
                respond(b.fetch_ocr(id).await)
            }),
        )
        .route(
            "/providers/:id/qa",
            get(|State(b): State<Shared>, Path(id): Path<i64>| async move {
                respond(b.fetch_qa_history(id).await)
            }),
        )
        .route(
            "/manual-review",
            get(|State(b): State<Shared>| async move { respond(b.fetch_pending_reviews().await) }),
        )
        .route("/manual-review/:id/:verb", post(review))
        .route("/run-batch", post(run_batch))
        .route("/reports/latest", get(report))
        .route("/explain", post(explain))
        .with_state(backend)
}

/// Fixture backend listening on an ephemeral localhost port.
pub struct FixtureServer {
    addr: SocketAddr,
    backend: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FixtureServer {
    pub fn start(backend: FakeBackend) -> Self {
        let backend = Arc::new(backend);
        let app = router(Arc::clone(&backend));
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("Failed to build fixture server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind fixture server");
                addr_tx
                    .send(listener.local_addr().expect("listener has no address"))
                    .expect("test thread went away");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("fixture server failed");
            });
        });

        let addr = addr_rx.recv().expect("fixture server did not start");
        Self {
            addr,
            backend,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn backend(&self) -> &FakeBackend {
        &self.backend
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
