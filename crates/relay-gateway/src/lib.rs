//! # relay-gateway
//!
//! WebSocket gateway relaying device alerts and client gestures to every
//! connected client.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod relay;
pub mod server;

pub use relay::{AlertOutcome, GestureOutcome, Relay};
pub use server::{create_app, run, run_server, GatewayState};
