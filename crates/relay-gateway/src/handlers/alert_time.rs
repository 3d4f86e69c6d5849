//! Alert window handler

use super::{HandlerResult, RouteOutcome};
use crate::connection::Connection;
use crate::protocol::AlertTimePayload;
use crate::relay::Relay;
use serde_json::Value;

/// Handles `set_alert_time` messages
pub struct AlertTimeHandler;

impl AlertTimeHandler {
    /// Validate the requested window and swap it in
    ///
    /// A payload with any bad field is rejected as a whole; the current window stays.
    pub fn handle(relay: &Relay, connection: &Connection, data: &Value) -> HandlerResult<RouteOutcome> {
        let window = AlertTimePayload::from_value(data)?.into_window()?;

        let previous = relay.set_alert_window(window);

        tracing::debug!(
            session_id = %connection.session_id(),
            %previous,
            %window,
            "Alert window set by client"
        );

        Ok(RouteOutcome::WindowUpdated(window))
    }
}
