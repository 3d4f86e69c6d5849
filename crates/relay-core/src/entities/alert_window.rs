//! Alert window entity
//!
//! The time-of-day interval during which device alerts are forwarded to clients.

use crate::error::DomainError;
use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A validated wall-clock time with minute precision (`HH:MM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a clock time, validating `hour` in 0-23 and `minute` in 0-59
    pub fn new(hour: i64, minute: i64) -> Result<Self, DomainError> {
        let hour = u8::try_from(hour)
            .ok()
            .filter(|h| *h < 24)
            .ok_or(DomainError::InvalidHour(hour))?;
        let minute = u8::try_from(minute)
            .ok()
            .filter(|m| *m < 60)
            .ok_or(DomainError::InvalidMinute(minute))?;

        Ok(Self { hour, minute })
    }

    /// Build from a minute-of-day value, wrapping values past midnight
    #[must_use]
    pub fn from_minute_of_day(minute_of_day: u16) -> Self {
        let minute_of_day = minute_of_day % MINUTES_PER_DAY;
        Self {
            hour: (minute_of_day / 60) as u8,
            minute: (minute_of_day % 60) as u8,
        }
    }

    /// Truncate a `NaiveTime` to minute precision
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// `hour * 60 + minute`
    pub fn minute_of_day(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidClockTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: i64 = hour.parse().map_err(|_| invalid())?;
        let minute: i64 = minute.parse().map_err(|_| invalid())?;

        Self::new(hour, minute)
    }
}

/// The configured alert window, stored as minute-of-day bounds
///
/// The interval is half-open: `start` is included, `end` is excluded.
/// A window whose start is after its end wraps past midnight
/// (`22:00-06:00` covers the night). Equal bounds describe an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertWindow {
    start_minute: u16,
    end_minute: u16,
}

impl AlertWindow {
    /// Create a window from two validated clock times
    #[must_use]
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start_minute: start.minute_of_day(),
            end_minute: end.minute_of_day(),
        }
    }

    /// Create a window from raw hour/minute fields, validating each one
    pub fn from_parts(
        start_hour: i64,
        start_min: i64,
        end_hour: i64,
        end_min: i64,
    ) -> Result<Self, DomainError> {
        let start = ClockTime::new(start_hour, start_min)?;
        let end = ClockTime::new(end_hour, end_min)?;
        Ok(Self::new(start, end))
    }

    pub fn start(&self) -> ClockTime {
        ClockTime::from_minute_of_day(self.start_minute)
    }

    pub fn end(&self) -> ClockTime {
        ClockTime::from_minute_of_day(self.end_minute)
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    /// Whether the window crosses midnight
    pub fn wraps_midnight(&self) -> bool {
        self.start_minute > self.end_minute
    }

    /// Check whether a minute-of-day falls inside the window
    pub fn contains_minute(&self, minute_of_day: u16) -> bool {
        if self.wraps_midnight() {
            minute_of_day >= self.start_minute || minute_of_day < self.end_minute
        } else {
            self.start_minute <= minute_of_day && minute_of_day < self.end_minute
        }
    }

    /// Check whether a wall-clock time falls inside the window (seconds are ignored)
    pub fn contains(&self, now: NaiveTime) -> bool {
        self.contains_minute(ClockTime::from_time(now).minute_of_day())
    }
}

impl Default for AlertWindow {
    /// `00:00-23:59`, the window a freshly started relay uses
    fn default() -> Self {
        Self {
            start_minute: 0,
            end_minute: MINUTES_PER_DAY - 1,
        }
    }
}

impl fmt::Display for AlertWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}

/// Decide whether `now` (local wall-clock time) falls inside `window`
pub fn is_within_window(now: NaiveTime, window: &AlertWindow) -> bool {
    window.contains(now)
}
