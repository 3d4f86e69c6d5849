//! Test fixtures
//!
//! Reusable client messages and alert bodies.

use serde_json::{json, Value};

/// `{"type":"gesture","data":<token>}`
pub fn gesture(token: &str) -> Value {
    json!({"type": "gesture", "data": token})
}

/// `set_alert_time` with integer fields
pub fn set_alert_time(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Value {
    json!({
        "type": "set_alert_time",
        "data": {
            "startHour": start_hour,
            "startMin": start_min,
            "endHour": end_hour,
            "endMin": end_min,
        }
    })
}

/// `set_alert_time` with every field sent as a string, the way browser forms do
pub fn set_alert_time_strings(start_hour: &str, start_min: &str, end_hour: &str, end_min: &str) -> Value {
    json!({
        "type": "set_alert_time",
        "data": {
            "startHour": start_hour,
            "startMin": start_min,
            "endHour": end_hour,
            "endMin": end_min,
        }
    })
}

/// A device alert body
pub fn device_alert(sensor: &str) -> Value {
    json!({"sensor": sensor, "event": "motion", "level": 2})
}
