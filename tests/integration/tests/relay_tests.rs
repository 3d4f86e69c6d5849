//! End-to-end tests for the alert relay
//!
//! Every test spawns its own relay on an ephemeral port with a pinned clock.

use std::time::Duration;

use integration_tests::*;
use relay_core::{AlertWindow, ClockTime};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// HTTP
// ============================================================================

#[tokio::test]
async fn test_ping() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;

    let response = server.get("/ping").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "pong");

    Ok(())
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;

    let response = server.get("/health").await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_alert_without_clients_is_accepted() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;

    let response = server.post_alert(&device_alert("door")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "alert accepted");

    Ok(())
}

// ============================================================================
// Gestures
// ============================================================================

#[tokio::test]
async fn test_new_client_without_gesture_gets_nothing() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;

    let mut client = server.connect().await?;
    client.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn test_gesture_fans_out_to_every_client_including_sender() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut sender = server.connect().await?;
    let mut other = server.connect().await?;

    sender.send_json(&gesture("wave")).await?;

    let expected = json!({"type": "gesture", "data": "wave"});
    assert_eq!(sender.recv_json().await?, expected);
    assert_eq!(other.recv_json().await?, expected);

    Ok(())
}

#[tokio::test]
async fn test_new_client_gets_last_gesture_replayed() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut first = server.connect().await?;

    first.send_json(&gesture("swipe_left")).await?;
    first.recv_json().await?;

    let mut late = server.connect().await?;
    assert_eq!(
        late.recv_json().await?,
        json!({"type": "gesture", "data": "swipe_left"})
    );
    late.expect_silence().await?;

    Ok(())
}

#[tokio::test]
async fn test_repeated_gesture_is_debounced() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut client = server.connect().await?;

    // Clock is frozen, so both repeats fall inside the cooldown
    client.send_json(&gesture("tap")).await?;
    client.send_json(&gesture("tap")).await?;

    assert_eq!(client.recv_json().await?["data"], "tap");
    client.expect_silence().await?;

    server.clock.advance(Duration::from_millis(800));
    client.send_json(&gesture("tap")).await?;
    assert_eq!(client.recv_json().await?["data"], "tap");

    Ok(())
}

#[tokio::test]
async fn test_different_gesture_is_not_debounced() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut client = server.connect().await?;

    client.send_json(&gesture("tap")).await?;
    client.send_json(&gesture("hold")).await?;

    assert_eq!(client.recv_json().await?["data"], "tap");
    assert_eq!(client.recv_json().await?["data"], "hold");

    Ok(())
}

#[tokio::test]
async fn test_binary_frame_is_routed() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut client = server.connect().await?;

    client
        .send_binary(gesture("pinch").to_string().into_bytes())
        .await?;

    assert_eq!(
        client.recv_json().await?,
        json!({"type": "gesture", "data": "pinch"})
    );

    Ok(())
}

#[tokio::test]
async fn test_malformed_frames_keep_connection_open() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut client = server.connect().await?;

    client.send_text("not json at all").await?;
    client.send_json(&json!({"type": "teleport", "data": 1})).await?;
    client.send_json(&json!({"type": "gesture", "data": 42})).await?;
    client.send_json(&json!({"data": "missing type"})).await?;
    client.expect_silence().await?;

    client.send_json(&gesture("still_here")).await?;
    assert_eq!(client.recv_json().await?["data"], "still_here");
    assert_eq!(server.connection_count(), 1);

    Ok(())
}

// ============================================================================
// Alerts and the alert window
// ============================================================================

#[tokio::test]
async fn test_alert_inside_window_is_broadcast() -> anyhow::Result<()> {
    let server = TestServer::start_at(10, 0).await?;
    let mut a = server.connect().await?;
    let mut b = server.connect().await?;

    let body = device_alert("hallway");
    let response = server.post_alert(&body).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "alert accepted");

    for client in [&mut a, &mut b] {
        let message = client.recv_json().await?;
        assert_eq!(message["type"], "alert");
        assert_eq!(message["data"], body);
        let timestamp = message["timestamp"]
            .as_str()
            .expect("timestamp should be a string");
        assert!(timestamp.starts_with("2026-10-16T10:00:00"));
        assert!(timestamp.ends_with('Z'));
    }

    Ok(())
}

#[tokio::test]
async fn test_set_alert_time_gates_alerts() -> anyhow::Result<()> {
    let server = TestServer::start_at(20, 0).await?;
    let mut client = server.connect().await?;

    client
        .send_json(&set_alert_time_strings("9", "0", "17", "30"))
        .await?;
    let expected = AlertWindow::new(ClockTime::new(9, 0)?, ClockTime::new(17, 30)?);
    eventually(|| server.state.relay().alert_window() == expected).await?;

    // 20:00 is outside 09:00-17:30
    let response = server.post_alert(&device_alert("garage")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "ignored: outside alert window");
    client.expect_silence().await?;

    server.clock.set_time_of_day(10, 0);
    let response = server.post_alert(&device_alert("garage")).await?;
    assert_eq!(response.text().await?, "alert accepted");

    let message = client.recv_json().await?;
    assert_eq!(message["type"], "alert");
    assert_eq!(message["data"], device_alert("garage"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_alert_time_keeps_previous_window() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut client = server.connect().await?;

    client.send_json(&set_alert_time(8, 0, 18, 0)).await?;
    let expected = AlertWindow::new(ClockTime::new(8, 0)?, ClockTime::new(18, 0)?);
    eventually(|| server.state.relay().alert_window() == expected).await?;

    client.send_json(&set_alert_time(25, 0, 18, 0)).await?;
    client
        .send_json(&set_alert_time_strings("eight", "0", "18", "0"))
        .await?;

    // A later valid frame proves the invalid ones were already processed
    client.send_json(&gesture("sync")).await?;
    client.recv_json().await?;
    assert_eq!(server.state.relay().alert_window(), expected);

    Ok(())
}

#[tokio::test]
async fn test_empty_alert_body_forwards_empty_object() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let mut client = server.connect().await?;

    let response = server.post_alert_raw("").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let message = client.recv_json().await?;
    assert_eq!(message["type"], "alert");
    assert_eq!(message["data"], json!({}));

    Ok(())
}

// ============================================================================
// Connection lifecycle
// ============================================================================

#[tokio::test]
async fn test_closed_client_is_removed_and_others_keep_receiving() -> anyhow::Result<()> {
    let server = TestServer::start_at(12, 0).await?;
    let leaving = server.connect().await?;
    let mut staying = server.connect().await?;
    assert_eq!(server.connection_count(), 2);

    leaving.close().await?;
    server.wait_for_connections(1).await?;

    server.post_alert(&device_alert("porch")).await?;
    assert_eq!(staying.recv_json().await?["type"], "alert");

    Ok(())
}
