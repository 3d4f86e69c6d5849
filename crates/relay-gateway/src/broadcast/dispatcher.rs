//! Broadcast dispatcher
//!
//! Serializes a message once and queues the same frame on every open connection.

use crate::connection::{Connection, ConnectionRegistry, Frame};
use crate::protocol::ServerMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Outcome of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the frame was queued on
    pub delivered: usize,
    /// Open connections whose queue was full or went away mid-broadcast
    pub failed: usize,
}

/// Sends messages to every open connection in a registry
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
    /// Broadcasts performed so far
    broadcasts: AtomicU64,
}

impl Broadcaster {
    /// Create a broadcaster over a registry
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            registry,
            broadcasts: AtomicU64::new(0),
        }
    }

    /// Get the registry this broadcaster fans out to
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Number of broadcasts performed
    pub fn broadcast_count(&self) -> u64 {
        self.broadcasts.load(Ordering::Relaxed)
    }

    /// Send `message` to every open connection
    ///
    /// Never waits on a recipient. A failure on one connection is counted and
    /// the loop moves on; the connection itself is left for its socket task to remove.
    pub fn broadcast(&self, message: &ServerMessage) -> BroadcastReport {
        let Some(frame) = encode(message) else {
            return BroadcastReport::default();
        };

        self.broadcasts.fetch_add(1, Ordering::Relaxed);

        let mut report = BroadcastReport::default();
        self.registry.for_each(|connection| {
            if send_frame(connection, frame.clone()) {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        });

        tracing::debug!(
            kind = %message.kind(),
            delivered = report.delivered,
            failed = report.failed,
            "Message broadcast to all connections"
        );

        report
    }

    /// Send `message` to a single connection
    pub fn send_to(&self, connection: &Connection, message: &ServerMessage) -> bool {
        encode(message).is_some_and(|frame| send_frame(connection, frame))
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("registry", &self.registry)
            .field("broadcasts", &self.broadcast_count())
            .finish()
    }
}

fn encode(message: &ServerMessage) -> Option<Frame> {
    match message.to_json() {
        Ok(json) => Some(Frame::from(json)),
        Err(e) => {
            tracing::error!(kind = %message.kind(), error = %e, "Failed to serialize message");
            None
        }
    }
}

fn send_frame(connection: &Connection, frame: Frame) -> bool {
    match connection.try_send(frame) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                session_id = %connection.session_id(),
                error = %e,
                "Failed to queue message for connection"
            );
            false
        }
    }
}
