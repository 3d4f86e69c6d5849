//! `set_alert_time` payload
//!
//! `{"startHour":H,"startMin":M,"endHour":H,"endMin":M}` where each field is a
//! JSON integer or a string holding one (`"9"`, `" 17 "`).

use relay_core::{AlertWindow, DomainError};
use serde_json::Value;

/// Decoded `set_alert_time` fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTimePayload {
    pub start_hour: i64,
    pub start_min: i64,
    pub end_hour: i64,
    pub end_min: i64,
}

impl AlertTimePayload {
    /// Decode the four fields from a message payload
    ///
    /// Any missing or non-integer field fails the whole payload.
    pub fn from_value(data: &Value) -> Result<Self, DomainError> {
        if !data.is_object() {
            return Err(DomainError::invalid_field("data", "expected an object"));
        }

        Ok(Self {
            start_hour: integer_field(data, "startHour")?,
            start_min: integer_field(data, "startMin")?,
            end_hour: integer_field(data, "endHour")?,
            end_min: integer_field(data, "endMin")?,
        })
    }

    /// Validate ranges and build the window
    pub fn into_window(self) -> Result<AlertWindow, DomainError> {
        AlertWindow::from_parts(self.start_hour, self.start_min, self.end_hour, self.end_min)
    }
}

fn integer_field(data: &Value, field: &'static str) -> Result<i64, DomainError> {
    match data.get(field) {
        None | Some(Value::Null) => Err(DomainError::invalid_field(field, "missing")),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| DomainError::invalid_field(field, format!("not an integer: {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| DomainError::invalid_field(field, format!("not an integer: {s:?}"))),
        Some(other) => Err(DomainError::invalid_field(
            field,
            format!("unexpected value: {other}"),
        )),
    }
}
