//! Bookable output slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// A free `[start, end)` interval of exactly one consultation length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl AvailableSlot {
    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes() - self.start.minutes()
    }
}

/// Formats as `HH:MM-HH:MM`.
impl fmt::Display for AvailableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
