//! Device-facing HTTP handlers

use crate::relay::AlertOutcome;
use crate::server::GatewayState;
use axum::{body::Bytes, extract::State, http::StatusCode};
use serde_json::Value;

/// Response text when an alert was fanned out
pub const ALERT_ACCEPTED: &str = "alert accepted";

/// Response text when an alert arrived outside the window
pub const ALERT_IGNORED: &str = "ignored: outside alert window";

/// Receive a device alert
///
/// POST /alert
///
/// Always answers 200 so the device never retries; the body says whether the
/// alert was forwarded.
pub async fn post_alert(State(state): State<GatewayState>, body: Bytes) -> (StatusCode, &'static str) {
    let data = parse_alert_body(&body);

    match state.relay().ingest_alert(data) {
        AlertOutcome::Forwarded { .. } => (StatusCode::OK, ALERT_ACCEPTED),
        AlertOutcome::OutsideWindow { .. } => (StatusCode::OK, ALERT_IGNORED),
    }
}

/// Liveness check
///
/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}

/// Decode an alert body, falling back to `{}` when it is empty or not JSON
pub fn parse_alert_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(serde_json::Map::new());
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, len = body.len(), "Alert body is not valid JSON, forwarding {{}}");
        Value::Object(serde_json::Map::new())
    })
}
