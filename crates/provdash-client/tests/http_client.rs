//! `ApiClient` against an in-process backend bound to an ephemeral port.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use provdash_client::{ApiClient, ApiError, Backend, ClientConfig, FailureKind};
use provdash_types::{
    BatchKind, Decision, DriftBucket, ExplainRequest, ReviewAction, ReviewStatus,
};
use serde_json::{Value, json};

async fn details(Path(id): Path<i64>) -> Response {
    if id == 404 {
        return (StatusCode::NOT_FOUND, "Provider not found").into_response();
    }
    Json(json!({
        "provider": {"id": id, "name": "Dr. Ada", "phone": "555-0100"},
        "validation": {"phone": {"confidence": 0.8, "sources": ["npi"]}},
        "pcs": null,
        "drift": {"score": 0.2, "bucket": "Low", "explanation": "Stable."}
    }))
    .into_response()
}

async fn ocr(Path(id): Path<i64>) -> Response {
    if id == 13 {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }
    Json(json!({"exists": false})).into_response()
}

async fn review(
    Path((id, verb)): Path<(i64, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "db locked").into_response();
    }
    let value = params.get("value").cloned().unwrap_or_default();
    Json(json!({"status": format!("{verb}:{value}")})).into_response()
}

async fn explain(Json(body): Json<Value>) -> Response {
    match body["field"].as_str() {
        Some("rate") => (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response(),
        Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, "llm down").into_response(),
        Some(field) => Json(json!({
            "explanation": format!("{field} decided as {}", body["decision"].as_str().unwrap_or("?"))
        }))
        .into_response(),
        None => (StatusCode::UNPROCESSABLE_ENTITY, "missing field").into_response(),
    }
}

async fn run_batch(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "id": 7,
        "type": params.get("type").cloned().unwrap_or_default(),
        "count_processed": 10,
        "auto_updates": 6,
        "manual_reviews": 4,
        "started_at": "2026-03-02T08:00:00",
        "finished_at": "2026-03-02T08:05:00"
    }))
}

// Written out by hand: `json!` would sort the distribution keys.
const STATS_BODY: &str = r#"{
    "latest_run": {"id": 1, "type": "daily", "count_processed": 20},
    "avg_pcs": 71.5,
    "drift_distribution": {"High": 2, "Medium": 5, "Low": 13},
    "pcs_distribution": {"0-40": 1, "40-70": 4, "70-100": 15},
    "trend": []
}"#;

fn router() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/stats",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], STATS_BODY) }),
        )
        .route(
            "/providers",
            get(|| async {
                Json(json!([
                    {"id": 42, "name": "Dr. Ada", "drift_bucket": "High", "pcs": 64.0},
                    {"id": 43, "name": "Dr. Bob", "drift_bucket": null, "pcs": null}
                ]))
            }),
        )
        .route(
            "/manual-review",
            get(|| async {
                Json(json!([
                    {"id": 1, "provider_id": 42, "field_name": "phone", "status": "pending"},
                    {"id": 2, "provider_id": 43, "field_name": "address", "status": "approved"}
                ]))
            }),
        )
        .route("/providers/:id/details", get(details))
        .route("/providers/:id/ocr", get(ocr))
        .route("/providers/:id/qa", get(|| async { Json(json!([])) }))
        .route("/manual-review/:id/:verb", post(review))
        .route("/explain", post(explain))
        .route("/run-batch", post(run_batch))
        .route(
            "/reports/latest",
            get(|| async { (StatusCode::NOT_FOUND, "no report") }),
        )
        .route(
            "/reports/pdf",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 body".to_vec()) }),
        )
}

async fn spawn_backend() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    ApiClient::new(ClientConfig::with_base_url(format!("http://{addr}/"))).unwrap()
}

fn explain_request(field: &str) -> ExplainRequest {
    ExplainRequest {
        field: field.to_string(),
        current_value: Some("555-0100".to_string()),
        candidates: vec![],
        chosen_value: Some("555-0100".to_string()),
        confidence: 0.5,
        decision: Decision::ManualReview,
    }
}

#[tokio::test]
async fn test_collections_decode() {
    let client = spawn_backend().await;

    let stats = client.fetch_stats().await.unwrap();
    let buckets: Vec<&str> = stats.drift_distribution.keys().collect();
    assert_eq!(buckets, vec!["High", "Medium", "Low"]);
    let ranges: Vec<&str> = stats.pcs_distribution.keys().collect();
    assert_eq!(ranges, vec!["0-40", "40-70", "70-100"]);
    assert_eq!(stats.avg_pcs, Some(71.5));

    let providers = client.fetch_providers().await.unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0].drift_bucket, Some(DriftBucket::High));

    // Filtering by status is left to the caller.
    let reviews = client.fetch_pending_reviews().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[1].status, ReviewStatus::Approved);

    assert_eq!(client.health().await.unwrap().status.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_provider_detail_endpoints() {
    let client = spawn_backend().await;

    let detail = client.fetch_provider_detail(42).await.unwrap();
    assert_eq!(detail.provider.id, 42);
    assert!(detail.validation.contains_key("phone"));

    let ocr = client.fetch_ocr(42).await.unwrap();
    assert!(!ocr.exists);

    assert!(client.fetch_qa_history(42).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_not_found_is_server_error() {
    let client = spawn_backend().await;
    let err = client.fetch_provider_detail(404).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            body: "Provider not found".to_string()
        }
    );
    assert_eq!(err.kind(), FailureKind::ServerError);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let client = spawn_backend().await;
    let err = client.fetch_ocr(13).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_explain_classifies_rate_limit() {
    let client = spawn_backend().await;

    let ok = client.explain(&explain_request("phone")).await.unwrap();
    assert_eq!(ok.explanation, "phone decided as manual_review");

    let limited = client.explain(&explain_request("rate")).await.unwrap_err();
    assert_eq!(limited, ApiError::RateLimited);
    assert_eq!(limited.kind(), FailureKind::RateLimited);

    let failed = client.explain(&explain_request("boom")).await.unwrap_err();
    assert_eq!(failed.kind(), FailureKind::ServerError);
}

#[tokio::test]
async fn test_override_value_is_url_encoded() {
    let client = spawn_backend().await;

    let action = ReviewAction::override_with("12 Main St & 3rd/Apt #4").unwrap();
    let ack = client.submit_review_action(9, &action).await.unwrap();
    assert_eq!(ack.status.as_deref(), Some("override:12 Main St & 3rd/Apt #4"));

    let ack = client
        .submit_review_action(9, &ReviewAction::Approve)
        .await
        .unwrap();
    assert_eq!(ack.status.as_deref(), Some("approve:"));

    let err = client
        .submit_review_action(500, &ReviewAction::Reject)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_run_batch_sends_kind() {
    let client = spawn_backend().await;
    let run = client.run_batch(BatchKind::Weekly).await.unwrap();
    assert_eq!(run.run_type.as_deref(), Some("weekly"));
    assert_eq!(run.count_processed, 10);
}

#[tokio::test]
async fn test_report_falls_back_to_pdf_route() {
    let client = spawn_backend().await;
    let report = client.download_report().await.unwrap();
    assert!(report.is_pdf());
    assert_eq!(report.bytes, b"%PDF-1.4 body".to_vec());
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(ClientConfig::with_base_url(format!("http://{addr}"))).unwrap();
    let err = client.fetch_stats().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NetworkFailure);
}
