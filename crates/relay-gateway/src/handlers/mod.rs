//! Message handlers
//!
//! Routes incoming client messages to a handler based on their `type`.

mod alert_time;
mod error;
mod gesture;

pub use alert_time::AlertTimeHandler;
pub use error::{HandlerError, HandlerResult};
pub use gesture::GestureHandler;

use crate::broadcast::BroadcastReport;
use crate::connection::Connection;
use crate::protocol::{ClientMessage, MessageKind};
use crate::relay::Relay;
use relay_core::AlertWindow;

/// What happened to a routed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// `set_alert_time` applied
    WindowUpdated(AlertWindow),
    /// Gesture accepted and fanned out
    GestureBroadcast(BroadcastReport),
    /// Gesture dropped by the debounce
    GestureSuppressed,
    /// Type this relay does not handle from clients
    Ignored(MessageKind),
}

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageRouter;

impl MessageRouter {
    /// Decode a text frame and handle it
    pub fn route(relay: &Relay, connection: &Connection, text: &str) -> HandlerResult<RouteOutcome> {
        let message = ClientMessage::from_json(text)?;

        tracing::trace!(
            session_id = %connection.session_id(),
            kind = %message.kind,
            "Received message"
        );

        Self::dispatch(relay, connection, message)
    }

    /// Handle an already decoded message
    pub fn dispatch(
        relay: &Relay,
        connection: &Connection,
        message: ClientMessage,
    ) -> HandlerResult<RouteOutcome> {
        match message.kind() {
            MessageKind::SetAlertTime => AlertTimeHandler::handle(relay, connection, &message.data),
            MessageKind::Gesture => GestureHandler::handle(relay, connection, message.data),
            other => {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    kind = %other,
                    "Ignoring message type"
                );
                Ok(RouteOutcome::Ignored(other))
            }
        }
    }
}
