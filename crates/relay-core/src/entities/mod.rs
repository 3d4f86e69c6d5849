//! Domain entities

mod alert_window;
mod gesture_state;

pub use alert_window::{is_within_window, AlertWindow, ClockTime, MINUTES_PER_DAY};
pub use gesture_state::{GestureState, GESTURE_DEBOUNCE_MS};
