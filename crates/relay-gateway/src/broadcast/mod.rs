//! Event broadcasting
//!
//! Fans a serialized message out to every open connection.

mod dispatcher;

pub use dispatcher::{BroadcastReport, Broadcaster};
