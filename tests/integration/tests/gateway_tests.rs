//! Gateway Integration Tests
//!
//! Drive real WebSocket clients against a gateway bound to an ephemeral
//! port. The user store is in memory, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use family_core::UserId;
use integration_tests::{assert_json, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

// ============================================================================
// Presence Broadcast Tests
// ============================================================================

#[tokio::test]
async fn test_connect_announces_to_self_and_others() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    let member = unique_user_id("member");
    seed_members(&server.repo, &[&watcher, &member]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();
    let mut member_socket = server.connect_user(&member).await.unwrap();

    watcher_socket.expect_status(&member, true).await.unwrap();
    member_socket.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_disconnect_announces_offline() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    let member = unique_user_id("member");
    seed_members(&server.repo, &[&watcher, &member]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();
    let member_socket = server.connect_user(&member).await.unwrap();
    watcher_socket.expect_status(&member, true).await.unwrap();

    member_socket.close().await.unwrap();

    watcher_socket.expect_status(&member, false).await.unwrap();
    watcher_socket.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_connect_without_user_id_is_silent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    seed_members(&server.repo, &[&watcher]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();

    let anonymous = server.connect(None).await.unwrap();
    watcher_socket.expect_silence().await.unwrap();

    anonymous.close().await.unwrap();
    watcher_socket.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_malformed_user_id_is_silent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    seed_members(&server.repo, &[&watcher]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();

    let _bad = server.connect(Some("not%20valid")).await.unwrap();
    watcher_socket.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_replaced_connection_close_keeps_user_online() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    let member = unique_user_id("member");
    seed_members(&server.repo, &[&watcher, &member]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();

    let first = server.connect_user(&member).await.unwrap();
    watcher_socket.expect_status(&member, true).await.unwrap();
    let _second = server.connect_user(&member).await.unwrap();
    watcher_socket.expect_status(&member, true).await.unwrap();

    // The older socket is no longer the tracked one
    first.close().await.unwrap();
    watcher_socket.expect_silence().await.unwrap();

    let stored = server
        .repo
        .get(&UserId::parse(&member).unwrap())
        .expect("member is stored");
    assert!(stored.online_status);
}

#[tokio::test]
async fn test_unknown_user_still_broadcasts() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    seed_members(&server.repo, &[&watcher]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();

    let stranger = unique_user_id("stranger");
    let stranger_socket = server.connect_user(&stranger).await.unwrap();
    watcher_socket.expect_status(&stranger, true).await.unwrap();

    stranger_socket.close().await.unwrap();
    watcher_socket.expect_status(&stranger, false).await.unwrap();

    let writes = server.repo.presence_writes();
    let stranger_writes: Vec<_> = writes
        .iter()
        .filter(|w| w.user_id.as_str() == stranger)
        .collect();
    assert_eq!(stranger_writes.len(), 2);
    assert!(stranger_writes.iter().all(|w| !w.applied));
}

// ============================================================================
// Durable Presence Tests
// ============================================================================

#[tokio::test]
async fn test_presence_is_persisted_across_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let watcher = unique_user_id("watcher");
    let member = unique_user_id("member");
    seed_members(&server.repo, &[&watcher, &member]);

    let mut watcher_socket = server.connect_user(&watcher).await.unwrap();
    let member_socket = server.connect_user(&member).await.unwrap();
    watcher_socket.expect_status(&member, true).await.unwrap();

    let path = format!("/api/user/{member}/presence");
    let online: PresenceResponse =
        assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(online.user_id, member);
    assert!(online.online_status);
    assert!(online.last_seen.is_some());

    member_socket.close().await.unwrap();
    watcher_socket.expect_status(&member, false).await.unwrap();

    let offline: PresenceResponse =
        assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(!offline.online_status);

    let writes: Vec<_> = server
        .repo
        .presence_writes()
        .into_iter()
        .filter(|w| w.user_id.as_str() == member)
        .collect();
    assert_eq!(writes.len(), 2);
    assert!(writes[0].online);
    assert!(!writes[1].online);
    assert!(writes[1].last_seen >= writes[0].last_seen);
}

#[tokio::test]
async fn test_presence_of_unknown_user() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/user/nobody_here/presence").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_presence_with_malformed_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/user/bad%21id/presence").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.code, "INVALID_PATH_PARAMETER");
    assert!(!body.message.is_empty());
}
