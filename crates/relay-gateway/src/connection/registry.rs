//! Connection registry
//!
//! Holds every live WebSocket connection using DashMap for thread-safe access.

use super::Connection;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Set of live connections keyed by session ID
///
/// A connection is present from the moment its socket is accepted until its
/// socket task reports close or error. Iteration works on a snapshot so
/// connections can come and go while a broadcast is running.
pub struct ConnectionRegistry {
    connections: DashMap<String, Arc<Connection>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create an empty registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a connection
    ///
    /// Returns `false` and leaves the registry untouched if the session ID is already taken.
    pub fn add(&self, connection: Arc<Connection>) -> bool {
        let session_id = connection.session_id().to_string();

        match self.connections.entry(session_id) {
            Entry::Occupied(entry) => {
                tracing::warn!(session_id = %entry.key(), "Duplicate session ID, connection not added");
                false
            }
            Entry::Vacant(entry) => {
                tracing::debug!(session_id = %entry.key(), "Connection added");
                entry.insert(connection);
                true
            }
        }
    }

    /// Remove a connection
    ///
    /// Idempotent: removing an absent session is a no-op. Returns the removed connection.
    pub fn remove(&self, session_id: &str) -> Option<Arc<Connection>> {
        let removed = self.connections.remove(session_id).map(|(_, conn)| conn);

        if removed.is_some() {
            tracing::debug!(session_id = %session_id, "Connection removed");
        }

        removed
    }

    /// Get a connection by session ID
    pub fn get(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Check if a session exists
    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }

    /// Get the total number of registered connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Copy out every registered connection
    pub fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.connections.iter().map(|r| r.value().clone()).collect()
    }

    /// Call `f` on every registered connection that is still open
    ///
    /// Works on a snapshot; closed connections are skipped, not removed.
    /// Returns the number of connections visited.
    pub fn for_each<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&Arc<Connection>),
    {
        let mut visited = 0;

        for connection in self.snapshot() {
            if connection.is_closed() {
                tracing::trace!(
                    session_id = %connection.session_id(),
                    "Skipping closed connection"
                );
                continue;
            }
            f(&connection);
            visited += 1;
        }

        visited
    }

    /// Get all session IDs
    pub fn all_sessions(&self) -> Vec<String> {
        self.connections.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .finish()
    }
}
