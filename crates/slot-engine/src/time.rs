//! Minute-resolution time-of-day offsets.
//!
//! Appointments, working hours and slots all live on one axis measured in
//! minutes since midnight. Offsets past 24:00 are representable (an appointment
//! may run past midnight); they are shown with the hour wrapped to a wall clock.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;

/// An offset from midnight, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(i64);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub const fn from_minutes(minutes: i64) -> Self {
        TimeOfDay(minutes)
    }

    /// Build an offset from an hour and minute. No range check is applied, so
    /// `hm(24, 0)` is the end of the day.
    pub const fn hm(hour: i64, minute: i64) -> Self {
        TimeOfDay(hour * MINUTES_PER_HOUR + minute)
    }

    /// Convert a span since midnight. Only whole, non-negative minute counts are
    /// accepted; nothing is rounded.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` for a negative or sub-minute offset.
    pub fn try_from_duration(offset: Duration) -> Result<Self> {
        let minutes = offset.num_minutes();
        if offset < Duration::zero() || Duration::minutes(minutes) != offset {
            return Err(SlotError::InvalidArgument(format!(
                "time offset {} is not a whole number of minutes since midnight",
                describe_offset(offset)
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    pub const fn minutes(self) -> i64 {
        self.0
    }

    pub fn to_duration(self) -> Duration {
        Duration::minutes(self.0)
    }

    /// Shift forward by `minutes`, saturating instead of overflowing.
    pub const fn add_minutes(self, minutes: i64) -> Self {
        TimeOfDay(self.0.saturating_add(minutes))
    }

    /// Parse `"HH:MM"`. Hours may be 0..=24 (24 only as `24:00`), minutes 0..=59.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTime(format!("'{}' (expected HH:MM)", s));

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: i64 = h.parse().map_err(|_| invalid())?;
        let minute: i64 = m.parse().map_err(|_| invalid())?;

        if !(0..MINUTES_PER_HOUR).contains(&minute) || !(0..=HOURS_PER_DAY).contains(&hour) {
            return Err(invalid());
        }
        if hour == HOURS_PER_DAY && minute != 0 {
            return Err(invalid());
        }
        Ok(TimeOfDay::hm(hour, minute))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.rem_euclid(HOURS_PER_DAY * MINUTES_PER_HOUR);
        write!(
            f,
            "{:02}:{:02}",
            total / MINUTES_PER_HOUR,
            total % MINUTES_PER_HOUR
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<Duration> for TimeOfDay {
    type Error = SlotError;

    fn try_from(offset: Duration) -> Result<Self> {
        TimeOfDay::try_from_duration(offset)
    }
}

/// Render a raw offset for error messages, keeping seconds and sign so the
/// value shown is the value supplied.
pub fn describe_offset(offset: Duration) -> String {
    let secs = offset.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if s == 0 {
        format!("{}{:02}:{:02}", sign, h, m)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, h, m, s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}
