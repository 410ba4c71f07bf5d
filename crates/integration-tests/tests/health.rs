mod harness;

use harness::config::ConfigBuilder;
use harness::mock_gemini::MockGemini;
use harness::server::TestServer;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let mock = MockGemini::start().await.unwrap();
    let config = ConfigBuilder::new().with_upstream(&mock.base_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let config = ConfigBuilder::new().without_health().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn status_reports_model_and_credential() {
    let config = ConfigBuilder::new().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/api/tryon")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "online");
    assert_eq!(body["model"], "gemini-2.5-flash-image");
    assert_eq!(body["credentialConfigured"], true);
}

#[tokio::test]
async fn status_without_credential_still_answers() {
    let config = ConfigBuilder::new().without_credential().build();
    let server = TestServer::start(config).await.unwrap();

    let body: Value = server
        .client()
        .get(server.url("/api/tryon"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["credentialConfigured"], false);
}

#[tokio::test]
async fn preflight_returns_empty_ok() {
    let config = ConfigBuilder::new().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/api/tryon"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_listed_origin() {
    let config = ConfigBuilder::new()
        .with_cors_origins(&["https://shop.example.com"])
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/api/tryon"))
        .header("origin", "https://shop.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "https://shop.example.com"
    );
    let methods = resp.headers()["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let config = ConfigBuilder::new().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().delete(server.url("/api/tryon")).send().await.unwrap();

    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["allow"], "GET, POST, OPTIONS");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Method not allowed");
}
