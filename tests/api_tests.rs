//! Integration tests for the HTTP API
//!
//! Boots the real axum router on an ephemeral port and drives it with a
//! plain HTTP client against a wiremock site.

use linkscout::api;
use linkscout::config::Config;
use linkscout::crawler::Controller;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_api() -> SocketAddr {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 5;
    let controller = Arc::new(Controller::new(config).unwrap());

    let app = api::router(controller);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_full_scan_over_api() {
    let site = MockServer::start().await;
    let base = site.uri();

    // Delay keeps the run active long enough to observe the conflict
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><body><a href="/files/report.pdf">Report</a></body></html>"#,
                )
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_string("%PDF-1.4"))
        .mount(&site)
        .await;

    let addr = spawn_api().await;
    let http = reqwest::Client::new();

    // Health endpoint answers
    let health = http
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);

    // Start a scan
    let start = http
        .post(format!("http://{}/api/v1/start", addr))
        .json(&json!({
            "site": format!("{}/", base),
            "target": format!("{}/files/report.pdf", base),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(start.status(), 204);

    // A second start while active is a conflict
    let conflict = http
        .post(format!("http://{}/api/v1/start", addr))
        .json(&json!({
            "site": format!("{}/", base),
            "target": format!("{}/files/report.pdf", base),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(conflict.status(), 409);

    // Poll status until the run completes
    let mut waited = Duration::ZERO;
    loop {
        let status: Value = http
            .get(format!("http://{}/api/v1/status", addr))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if status["active"] == json!(false) && status["pages_processed"].as_u64().unwrap() > 0 {
            assert!(status["pages_discovered"].as_u64().unwrap() >= 2);
            break;
        }
        assert!(waited < Duration::from_secs(5), "scan never finished");
        tokio::time::sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }

    // Results are available after the run
    let results: Value = http
        .get(format!("http://{}/api/v1/results", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let records = results.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["method"], json!("exact-link"));
    assert_eq!(records[0]["page"], json!(format!("{}/", base)));

    // Stop is idempotent even when nothing runs
    let stop = http
        .post(format!("http://{}/api/v1/stop", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(stop.status(), 200);
}

#[tokio::test]
async fn test_malformed_start_is_rejected() {
    let addr = spawn_api().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("http://{}/api/v1/start", addr))
        .json(&json!({ "site": "not a url", "target": "also not a url" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("URL"));

    // No run was started
    let status: Value = http
        .get(format!("http://{}/api/v1/status", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["active"], json!(false));
}
