//! Domain traits

mod clock;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
