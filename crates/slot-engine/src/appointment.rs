//! Booked appointments and the working window they must fall into.
//!
//! Both are half-open intervals on the [`TimeOfDay`] axis. Two intervals overlap
//! when `a.start < b.end && b.start < a.end`; touching at a boundary is not an
//! overlap.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// An existing booking: a start offset plus a length in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub start: TimeOfDay,
    pub duration_minutes: i64,
}

impl Appointment {
    pub fn new(start: TimeOfDay, duration_minutes: i64) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    /// Exclusive end of the appointment.
    pub fn end(&self) -> TimeOfDay {
        self.start.add_minutes(self.duration_minutes)
    }

    /// Whether this appointment intersects `[start, end)`.
    pub fn overlaps(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start < end && start < self.end()
    }

    /// Zip parallel start-time and duration sequences into appointments.
    ///
    /// # Errors
    /// - `SlotError::ArrayMismatch` if the two slices differ in length.
    /// - `SlotError::InvalidArgument` if a start time is negative or not a whole
    ///   number of minutes.
    pub fn from_parallel(start_times: &[Duration], durations: &[i64]) -> Result<Vec<Appointment>> {
        ensure_parallel(start_times, durations)?;

        start_times
            .iter()
            .zip(durations)
            .map(|(start, minutes)| {
                Ok(Appointment::new(
                    TimeOfDay::try_from_duration(*start)?,
                    *minutes,
                ))
            })
            .collect()
    }
}

/// Both sequences describe one appointment per index, so their lengths must agree.
pub fn ensure_parallel(start_times: &[Duration], durations: &[i64]) -> Result<()> {
    if start_times.len() != durations.len() {
        return Err(SlotError::ArrayMismatch {
            start_times: start_times.len(),
            durations: durations.len(),
        });
    }
    Ok(())
}

/// The daily range in which availability is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingWindow {
    pub begin: TimeOfDay,
    pub end: TimeOfDay,
}

impl WorkingWindow {
    pub fn new(begin: TimeOfDay, end: TimeOfDay) -> Self {
        Self { begin, end }
    }

    /// Span of the window, or `None` if it does not fit in an `i64`.
    pub fn checked_length_minutes(&self) -> Option<i64> {
        self.end.minutes().checked_sub(self.begin.minutes())
    }

    pub fn length_minutes(&self) -> i64 {
        self.end.minutes().saturating_sub(self.begin.minutes())
    }

    /// Whether an appointment starting at `start` begins inside working hours.
    /// Both boundaries are inclusive, so an appointment may start exactly at
    /// closing time.
    pub fn admits_start(&self, start: TimeOfDay) -> bool {
        self.begin <= start && start <= self.end
    }
}
