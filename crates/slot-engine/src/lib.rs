//! # slot-engine
//!
//! Bookable-slot computation for appointment scheduling.
//!
//! Given the appointments already booked in a working day, the engine cuts the
//! working hours into fixed-length consultation slots and returns the ones no
//! appointment touches, formatted as `HH:MM-HH:MM`.
//!
//! ```rust
//! use chrono::Duration;
//! use slot_engine::compute_available_periods;
//!
//! let starts = [Duration::hours(10)];
//! let durations = [60];
//! let slots = compute_available_periods(
//!     Some(&starts[..]),
//!     Some(&durations[..]),
//!     Duration::hours(9),
//!     Duration::hours(12),
//!     60,
//! )
//! .unwrap();
//! assert_eq!(slots, vec!["09:00-10:00", "11:00-12:00"]);
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] — validation and slot partitioning
//! - [`appointment`] — `Appointment` and `WorkingWindow` intervals
//! - [`slot`] — `AvailableSlot` output type
//! - [`time`] — minute-resolution `TimeOfDay` and `HH:MM` parsing
//! - [`error`] — Error types

pub mod appointment;
pub mod calculator;
pub mod error;
pub mod slot;
pub mod time;

pub use appointment::{Appointment, WorkingWindow};
pub use calculator::{available_slots, compute_available_periods, first_available_slot};
pub use error::SlotError;
pub use slot::AvailableSlot;
pub use time::TimeOfDay;
