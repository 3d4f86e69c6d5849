//! Relay message format
//!
//! Every frame is a JSON object tagged by `type`.

use super::MessageKind;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message received from a client
///
/// Only the envelope is decoded here; `data` is interpreted by the handler
/// for the given `type`, so an unknown type or a bad payload never fails the
/// whole frame. A missing or non-string `type` is kept as-is and classified
/// as unknown.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    /// Raw `type` tag, `null` when absent
    #[serde(rename = "type", default)]
    pub kind: Value,

    /// Payload, `null` when absent
    #[serde(default)]
    pub data: Value,
}

impl ClientMessage {
    /// Classify the `type` tag
    pub fn kind(&self) -> MessageKind {
        match &self.kind {
            Value::String(tag) => MessageKind::from(tag.as_str()),
            other => MessageKind::Unknown(other.to_string()),
        }
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A message pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// `{"type":"gesture","data":"<token>"}`
    Gesture { data: String },

    /// `{"type":"alert","data":<opaque>,"timestamp":"<ISO-8601>"}`
    Alert { data: Value, timestamp: String },
}

impl ServerMessage {
    /// Create a gesture message
    #[must_use]
    pub fn gesture(value: impl Into<String>) -> Self {
        Self::Gesture { data: value.into() }
    }

    /// Create an alert message stamped with `at` (UTC, millisecond precision)
    #[must_use]
    pub fn alert(data: Value, at: DateTime<Utc>) -> Self {
        Self::Alert {
            data,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Gesture { .. } => MessageKind::Gesture,
            Self::Alert { .. } => MessageKind::Alert,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
