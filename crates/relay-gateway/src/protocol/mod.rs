//! Relay protocol definitions
//!
//! Defines the JSON envelopes exchanged over the WebSocket connection.

mod alert_time;
mod message_kind;
mod messages;

pub use alert_time::AlertTimePayload;
pub use message_kind::MessageKind;
pub use messages::{ClientMessage, ServerMessage};
