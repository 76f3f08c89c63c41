mod common;

use axum::http::StatusCode;
use common::TestApp;
use registry_service::config::RegistryConfig;
use registry_service::services::init_metrics;
use registry_service::startup::Application;
use std::sync::Once;

static INIT_METRICS: Once = Once::new();

fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics();
    });
}

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::spawn();

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Health Information System API is running"
    );
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "registry-service");
    assert_eq!(response.body["store"], "memory");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn();

    let response = app.get("/ready").await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::spawn();

    let response = app.get("/health").await;

    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    ensure_metrics_initialized();
    let app = TestApp::spawn();

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response
        .headers
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn application_serves_on_a_bound_port() {
    let app = Application::build(RegistryConfig::for_memory_store())
        .await
        .expect("Failed to build application");
    let port = app.port();
    let store = app.store();
    assert_ne!(port, 0);
    assert_eq!(store.backend_name(), "memory");

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    let mut response = None;
    for _ in 0..50 {
        if let Ok(r) = client.get(&url).send().await {
            response = Some(r);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    let response = response.expect("Server never became reachable");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}
