//! Working-hours configuration for the `slots` CLI.
//!
//! Values are resolved flag-first: a command-line flag wins over the TOML
//! config file, which wins over the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::{TimeOfDay, WorkingWindow};

pub const DEFAULT_BEGIN: TimeOfDay = TimeOfDay::hm(9, 0);
pub const DEFAULT_END: TimeOfDay = TimeOfDay::hm(17, 0);
pub const DEFAULT_CONSULTATION_MINUTES: i64 = 30;

/// Contents of a schedule config file. Every key is optional.
///
/// ```toml
/// begin = "08:30"
/// end = "16:00"
/// consultation_minutes = 45
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    pub begin: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub consultation_minutes: Option<i64>,
}

impl ScheduleConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay command-line values on top of this file's values.
    pub fn merge(self, flags: ScheduleConfig) -> ScheduleConfig {
        ScheduleConfig {
            begin: flags.begin.or(self.begin),
            end: flags.end.or(self.end),
            consultation_minutes: flags.consultation_minutes.or(self.consultation_minutes),
        }
    }

    pub fn window(&self) -> WorkingWindow {
        WorkingWindow::new(
            self.begin.unwrap_or(DEFAULT_BEGIN),
            self.end.unwrap_or(DEFAULT_END),
        )
    }

    pub fn consultation_minutes(&self) -> i64 {
        self.consultation_minutes.unwrap_or(DEFAULT_CONSULTATION_MINUTES)
    }
}
