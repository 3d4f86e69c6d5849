//! Connection management
//!
//! Tracks live WebSocket connections and their outbound queues.

mod connection;
mod registry;

pub use connection::{Connection, Frame};
pub use registry::ConnectionRegistry;
