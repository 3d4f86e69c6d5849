//! Clock abstraction
//!
//! The alert window is evaluated against local wall-clock time and gestures are
//! debounced against Unix milliseconds. Both come from a `Clock` so tests can pin them.

use chrono::{DateTime, Local, NaiveTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Source of the current time
pub trait Clock: Send + Sync + 'static {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current local wall-clock time of day
    fn local_time(&self) -> NaiveTime;

    /// Current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Shared clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Clock backed by the system time and the host's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a shared system clock
    #[must_use]
    pub fn shared() -> SharedClock {
        Arc::new(Self)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Manually driven clock
///
/// Local time is the UTC time of day of the stored instant.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a shared clock frozen at `now`
    #[must_use]
    pub fn shared(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self::new(now))
    }

    /// Set the current instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// Move the clock to `hour:minute` on the same day
    pub fn set_time_of_day(&self, hour: u32, minute: u32) {
        let mut now = self.now.lock();
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            *now = now.date_naive().and_time(time).and_utc();
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        if let Ok(delta) = chrono::Duration::from_std(by) {
            *now += delta;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn local_time(&self) -> NaiveTime {
        self.now.lock().time()
    }
}
