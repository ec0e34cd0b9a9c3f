//! E2E tests for liveness and metrics endpoints

mod common;

use common::TestServer;

#[tokio::test]
async fn test_ping() {
    let server = TestServer::new().await;

    let response = server.client.get(server.url("/ping")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;

    // Generate at least one counted request first
    server.client.get(server.url("/ping")).send().await.unwrap();

    let response = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("feedline_http_requests_total"));
}

#[tokio::test]
async fn test_metrics_endpoint_goes_through_cors_and_tracking() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/metrics"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("access-control-allow-origin"));

    let body = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"endpoint="/metrics""#));
}
