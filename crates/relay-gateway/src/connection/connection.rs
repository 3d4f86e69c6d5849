//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its outbound queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A serialized outbound message, shared between all recipients of a broadcast
pub type Frame = Arc<str>;

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Queue drained by the socket's send task
    sender: mpsc::Sender<Frame>,

    /// Frames queued so far
    frames_queued: AtomicU64,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(session_id: String, sender: mpsc::Sender<Frame>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            sender,
            frames_queued: AtomicU64::new(0),
            created_at: Instant::now(),
        })
    }

    /// Generate a new session ID
    pub fn generate_session_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Queue a frame without waiting
    ///
    /// Fails if the queue is full (slow reader) or the socket task is gone.
    pub fn try_send(&self, frame: Frame) -> Result<(), mpsc::error::TrySendError<Frame>> {
        self.sender.try_send(frame)?;
        self.frames_queued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Number of frames queued to this connection
    pub fn frames_queued(&self) -> u64 {
        self.frames_queued.load(Ordering::Relaxed)
    }

    /// Check if the socket side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Check if the connection still accepts frames
    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("frames_queued", &self.frames_queued())
            .field("open", &self.is_open())
            .finish()
    }
}
