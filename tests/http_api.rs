//! HTTP API integration tests.
//!
//! Tests for the REST endpoints (health check, room directory).

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // given:
    let server = TestServer::start(19080).await;
    let client = reqwest::Client::new();

    // when:
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then:
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_endpoint_lists_seeded_rooms() {
    // given:
    let server = TestServer::start(19081).await;
    let client = reqwest::Client::new();

    // when:
    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then: the two seeded rooms, both empty
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let rooms = body.as_array().expect("Response should be an array");
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0]["name"], "General");
    assert_eq!(rooms[0]["users"], serde_json::json!([]));
    assert_eq!(rooms[1]["name"], "Random");
    assert_eq!(rooms[1]["users"], serde_json::json!([]));
}
