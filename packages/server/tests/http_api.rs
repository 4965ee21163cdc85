//! HTTP API integration tests.
//!
//! The relay only exposes a liveness endpoint over plain HTTP.

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn test_room_state_is_not_exposed_over_http() {
    // テスト項目: Room の状態を返す REST エンドポイントは存在しない
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    // テスト項目: 設定したオリジンには CORS ヘッダーが付与される
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.base_url()))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}
