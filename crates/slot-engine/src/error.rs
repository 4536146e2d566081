//! Error types for slot-engine operations.

use thiserror::Error;

/// Errors raised while validating availability inputs.
///
/// Validation is eager: the first violation found is returned before any
/// candidate slot is computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A required input sequence was not supplied.
    #[error("Missing input: {0}")]
    NullInput(&'static str),

    /// The parallel start-time and duration sequences differ in length.
    #[error("Array length mismatch: {start_times} start times but {durations} durations")]
    ArrayMismatch { start_times: usize, durations: usize },

    /// A numeric argument had an unusable value (e.g. a zero slot length).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The working window is inverted, or an appointment starts outside it.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A time-of-day string could not be parsed as `HH:MM`.
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
