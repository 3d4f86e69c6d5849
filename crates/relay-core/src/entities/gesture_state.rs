//! Gesture debounce state
//!
//! Remembers the last broadcast gesture so rapid repeats of the same value
//! can be suppressed, and so new clients can be brought up to date.

/// Cooldown during which a repeat of the last gesture is suppressed
pub const GESTURE_DEBOUNCE_MS: i64 = 800;

/// Last broadcast gesture and when it went out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureState {
    last_value: Option<String>,
    last_broadcast_at_ms: i64,
}

impl GestureState {
    /// Create an empty state (no gesture broadcast yet)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last broadcast gesture, if any
    pub fn last_value(&self) -> Option<&str> {
        self.last_value.as_deref()
    }

    /// Unix timestamp in milliseconds of the last broadcast
    pub fn last_broadcast_at_ms(&self) -> i64 {
        self.last_broadcast_at_ms
    }

    /// Decide whether `value` observed at `now_ms` should be broadcast
    ///
    /// Returns `false` only for a repeat of the last value inside the cooldown.
    pub fn should_broadcast(&self, value: &str, now_ms: i64) -> bool {
        let is_repeat = self.last_value.as_deref() == Some(value);
        !(is_repeat && now_ms.saturating_sub(self.last_broadcast_at_ms) < GESTURE_DEBOUNCE_MS)
    }

    /// Record `value` as broadcast at `now_ms`
    pub fn record(&mut self, value: impl Into<String>, now_ms: i64) {
        self.last_value = Some(value.into());
        self.last_broadcast_at_ms = now_ms;
    }

    /// Check and record in one step; returns whether the gesture was accepted
    pub fn try_accept(&mut self, value: &str, now_ms: i64) -> bool {
        if !self.should_broadcast(value, now_ms) {
            return false;
        }
        self.record(value, now_ms);
        true
    }
}
