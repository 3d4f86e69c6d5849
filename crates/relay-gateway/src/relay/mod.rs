//! Relay coordinator
//!
//! Owns the alert window, the gesture debounce state and the connection
//! registry. Every read or write of that state goes through `Relay`.

use crate::broadcast::{BroadcastReport, Broadcaster};
use crate::connection::{Connection, ConnectionRegistry, Frame};
use crate::protocol::ServerMessage;
use parking_lot::Mutex;
use relay_common::RelayConfig;
use relay_core::{AlertWindow, GestureState, SharedClock};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// State mutated by client messages, guarded by one lock
#[derive(Debug, Default)]
struct RelayState {
    window: AlertWindow,
    gesture: GestureState,
}

/// Result of submitting a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Accepted and fanned out
    Broadcast(BroadcastReport),
    /// Repeat of the last gesture inside the cooldown
    Suppressed,
}

/// Result of an inbound device alert
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// Inside the window and fanned out
    Forwarded {
        message: ServerMessage,
        report: BroadcastReport,
    },
    /// Outside the window, dropped
    OutsideWindow { window: AlertWindow },
}

impl AlertOutcome {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded { .. })
    }
}

/// The relay's single coordinating unit
///
/// The lock is only ever held for non-blocking work (`try_send` into bounded
/// queues), never across an `.await`.
pub struct Relay {
    state: Mutex<RelayState>,
    registry: Arc<ConnectionRegistry>,
    broadcaster: Broadcaster,
    clock: SharedClock,
    connection_buffer: usize,
}

impl Relay {
    /// Create a relay from configuration
    pub fn new(config: &RelayConfig, clock: SharedClock) -> Self {
        let registry = ConnectionRegistry::new_shared();

        Self {
            state: Mutex::new(RelayState {
                window: config.initial_window,
                gesture: GestureState::new(),
            }),
            broadcaster: Broadcaster::new(registry.clone()),
            registry,
            clock,
            connection_buffer: config.connection_buffer.max(1),
        }
    }

    /// Create a relay wrapped in Arc
    pub fn new_shared(config: &RelayConfig, clock: SharedClock) -> Arc<Self> {
        Arc::new(Self::new(config, clock))
    }

    /// Get the connection registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Accept a new connection
    ///
    /// Replays the last broadcast gesture to the new connection, then registers it.
    /// Both happen under the state lock so the replay can never overtake, or be
    /// overtaken by, a concurrent gesture broadcast.
    pub fn accept(&self) -> (Arc<Connection>, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(self.connection_buffer);

        let state = self.state.lock();
        let session_id = self.fresh_session_id(Connection::generate_session_id);
        let connection = Connection::new(session_id, tx);
        if let Some(last) = state.gesture.last_value() {
            let replayed = self
                .broadcaster
                .send_to(&connection, &ServerMessage::gesture(last));
            tracing::debug!(
                session_id = %connection.session_id(),
                gesture = %last,
                replayed,
                "Replayed last gesture to new connection"
            );
        }
        let registered = self.registry.add(connection.clone());
        drop(state);

        if !registered {
            tracing::error!(
                session_id = %connection.session_id(),
                "Connection was not registered and will receive no broadcasts"
            );
        }

        (connection, rx)
    }

    /// Draw session ids until one is not in the registry
    ///
    /// Must be called with the state lock held so no other `accept` can claim
    /// the id before it is registered.
    fn fresh_session_id(&self, mut generate: impl FnMut() -> String) -> String {
        let mut session_id = generate();
        while self.registry.has_session(&session_id) {
            tracing::warn!(session_id = %session_id, "Session id already in use, drawing another");
            session_id = generate();
        }
        session_id
    }

    /// Forget a connection; safe to call more than once
    pub fn disconnect(&self, session_id: &str) -> bool {
        self.registry.remove(session_id).is_some()
    }

    /// Debounce and broadcast a gesture
    pub fn submit_gesture(&self, value: &str) -> GestureOutcome {
        let now_ms = self.clock.now_millis();

        let mut state = self.state.lock();
        if !state.gesture.try_accept(value, now_ms) {
            tracing::trace!(gesture = %value, "Gesture suppressed by debounce");
            return GestureOutcome::Suppressed;
        }

        let report = self.broadcaster.broadcast(&ServerMessage::gesture(value));
        drop(state);

        tracing::info!(
            gesture = %value,
            delivered = report.delivered,
            failed = report.failed,
            "Gesture broadcast"
        );

        GestureOutcome::Broadcast(report)
    }

    /// Replace the alert window, returning the previous one
    pub fn set_alert_window(&self, window: AlertWindow) -> AlertWindow {
        let previous = std::mem::replace(&mut self.state.lock().window, window);

        tracing::info!(%previous, %window, "Alert window updated");

        previous
    }

    /// Current alert window
    pub fn alert_window(&self) -> AlertWindow {
        self.state.lock().window
    }

    /// Last broadcast gesture, if any
    pub fn last_gesture(&self) -> Option<String> {
        self.state.lock().gesture.last_value().map(str::to_string)
    }

    /// Gate a device alert on the window and fan it out
    pub fn ingest_alert(&self, data: Value) -> AlertOutcome {
        let window = self.alert_window();
        let local_time = self.clock.local_time();

        if !window.contains(local_time) {
            tracing::info!(%window, %local_time, "Alert outside window, ignored");
            return AlertOutcome::OutsideWindow { window };
        }

        let message = ServerMessage::alert(data, self.clock.now());
        let report = self.broadcaster.broadcast(&message);

        tracing::info!(
            delivered = report.delivered,
            failed = report.failed,
            "Alert forwarded"
        );

        AlertOutcome::Forwarded { message, report }
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("state", &*self.state.lock())
            .field("registry", &self.registry)
            .field("connection_buffer", &self.connection_buffer)
            .finish()
    }
}
