//! # relay-core
//!
//! Domain layer for the alert relay: the alert time window, the gesture debounce
//! state and the clock abstraction they are evaluated against.
//! This crate has zero dependencies on infrastructure (web framework, sockets, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    is_within_window, AlertWindow, ClockTime, GestureState, GESTURE_DEBOUNCE_MS, MINUTES_PER_DAY,
};
pub use error::DomainError;
pub use traits::{Clock, ManualClock, SharedClock, SystemClock};
