//! Health Check API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, guild_create, TestApp};

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new(&["leon3to"]);

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

/// Test liveness probe endpoint
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new(&[]);

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");
}

/// Readiness reports the watch list and the cached guilds
#[tokio::test]
async fn test_readiness_probe_reports_components() {
    let app = TestApp::new(&["leon3to", "cl4upy"]);
    app.send_event(guild_create()).await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["watch_registry"]["watched_handles"], 2);
    assert_eq!(json["checks"]["roster"]["guilds"], 1);
}

/// An empty watch list keeps the service up but degraded
#[tokio::test]
async fn test_readiness_degraded_without_watch_list() {
    let app = TestApp::new(&[]);

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "degraded");
}

#[tokio::test]
async fn test_metrics_endpoint_is_text() {
    let app = TestApp::new(&["leon3to"]);

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}
