//! Gesture handler

use super::{HandlerError, HandlerResult, RouteOutcome};
use crate::connection::Connection;
use crate::relay::{GestureOutcome, Relay};
use serde_json::Value;

/// Handles `gesture` messages
pub struct GestureHandler;

impl GestureHandler {
    /// Debounce the gesture token and broadcast it if accepted
    pub fn handle(relay: &Relay, connection: &Connection, data: Value) -> HandlerResult<RouteOutcome> {
        let gesture = match data {
            Value::String(gesture) => gesture,
            other => {
                return Err(HandlerError::InvalidPayload(format!(
                    "gesture data must be a string, got {other}"
                )))
            }
        };

        tracing::debug!(
            session_id = %connection.session_id(),
            gesture = %gesture,
            "Gesture received"
        );

        Ok(match relay.submit_gesture(&gesture) {
            GestureOutcome::Broadcast(report) => RouteOutcome::GestureBroadcast(report),
            GestureOutcome::Suppressed => RouteOutcome::GestureSuppressed,
        })
    }
}
