//! Envelope `type` values

use std::fmt;

/// The `type` tag of an envelope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Gesture token (client -> server, server -> client)
    Gesture,
    /// Device alert (server -> client)
    Alert,
    /// Alert window update (client -> server)
    SetAlertTime,
    /// Any tag this relay does not know about
    Unknown(String),
}

impl MessageKind {
    /// Get the wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gesture => "gesture",
            Self::Alert => "alert",
            Self::SetAlertTime => "set_alert_time",
            Self::Unknown(name) => name,
        }
    }

    /// Check if clients are allowed to send this kind
    #[must_use]
    pub fn is_client_kind(&self) -> bool {
        matches!(self, Self::Gesture | Self::SetAlertTime)
    }
}

impl From<&str> for MessageKind {
    fn from(value: &str) -> Self {
        match value {
            "gesture" => Self::Gesture,
            "alert" => Self::Alert,
            "set_alert_time" => Self::SetAlertTime,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
