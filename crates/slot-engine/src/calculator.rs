//! Compute bookable slots from existing appointments.
//!
//! The working window is cut into consecutive slots of one consultation length,
//! starting at the window's beginning. A trailing remainder shorter than a full
//! slot is dropped. Every slot that overlaps an appointment is discarded and the
//! rest are returned in chronological order.

use chrono::Duration;
use tracing::{debug, trace};

use crate::appointment::{ensure_parallel, Appointment, WorkingWindow};
use crate::error::{Result, SlotError};
use crate::slot::AvailableSlot;
use crate::time::{describe_offset, TimeOfDay};

/// Compute available periods from parallel start-time and duration sequences.
///
/// Start times are offsets since midnight; durations and `consultation_minutes`
/// are in minutes. Each returned string has the form `HH:MM-HH:MM`.
///
/// Range checks run on the offsets exactly as supplied. Offsets are never
/// rounded: once the ranges are known to be valid, any offset that is not a
/// whole number of minutes is rejected.
///
/// # Errors
/// Checked in this order, the first failure is returned:
/// - `SlotError::NullInput` if `start_times` or `durations` is `None`.
/// - `SlotError::ArrayMismatch` if their lengths differ.
/// - `SlotError::InvalidArgument` if `consultation_minutes <= 0`.
/// - `SlotError::OutOfRange` if `begin` is before midnight or `begin >= end`.
/// - Per appointment: `SlotError::OutOfRange` if it starts before `begin` or
///   after `end`, then `SlotError::InvalidArgument` if its duration is negative.
/// - `SlotError::InvalidArgument` if `begin`, `end` or a start time has a
///   sub-minute part.
pub fn compute_available_periods(
    start_times: Option<&[Duration]>,
    durations: Option<&[i64]>,
    begin: Duration,
    end: Duration,
    consultation_minutes: i64,
) -> Result<Vec<String>> {
    let start_times = start_times.ok_or(SlotError::NullInput("start_times"))?;
    let durations = durations.ok_or(SlotError::NullInput("durations"))?;
    ensure_parallel(start_times, durations)?;
    check_consultation(consultation_minutes)?;

    if begin < Duration::zero() {
        return Err(SlotError::OutOfRange(format!(
            "working hours begin at {}, before midnight",
            describe_offset(begin)
        )));
    }
    if begin >= end {
        return Err(window_inverted(describe_offset(begin), describe_offset(end)));
    }
    for (index, (start, minutes)) in start_times.iter().zip(durations).enumerate() {
        if *start < begin || *start > end {
            return Err(start_outside(
                index,
                describe_offset(*start),
                describe_offset(begin),
                describe_offset(end),
            ));
        }
        check_duration(index, *minutes)?;
    }

    let window = WorkingWindow::new(
        TimeOfDay::try_from_duration(begin)?,
        TimeOfDay::try_from_duration(end)?,
    );
    let appointments = Appointment::from_parallel(start_times, durations)?;
    let slots = available_slots(&appointments, window, consultation_minutes)?;

    Ok(slots.iter().map(ToString::to_string).collect())
}

/// Compute the free slots of `window` given a list of appointments.
///
/// # Errors
/// - `SlotError::InvalidArgument` if `consultation_minutes <= 0`.
/// - `SlotError::OutOfRange` if the window is empty, inverted, starts before
///   midnight, or an appointment starts outside it.
/// - `SlotError::InvalidArgument` if an appointment has a negative duration.
pub fn available_slots(
    appointments: &[Appointment],
    window: WorkingWindow,
    consultation_minutes: i64,
) -> Result<Vec<AvailableSlot>> {
    validate(appointments, window, consultation_minutes)?;

    let mut candidates = 0usize;
    let free: Vec<AvailableSlot> = candidate_slots(window, consultation_minutes)
        .inspect(|_| candidates += 1)
        .filter(|slot| {
            let busy = is_booked(appointments, slot);
            if busy {
                trace!(slot = %slot, "slot occupied");
            }
            !busy
        })
        .collect();

    debug!(
        begin = %window.begin,
        end = %window.end,
        consultation_minutes,
        appointments = appointments.len(),
        candidates,
        free = free.len(),
        "computed available slots"
    );

    Ok(free)
}

/// Return the earliest free slot, if any. Stops at the first free candidate.
///
/// Validation is identical to [`available_slots`].
pub fn first_available_slot(
    appointments: &[Appointment],
    window: WorkingWindow,
    consultation_minutes: i64,
) -> Result<Option<AvailableSlot>> {
    validate(appointments, window, consultation_minutes)?;

    Ok(candidate_slots(window, consultation_minutes).find(|slot| !is_booked(appointments, slot)))
}

fn is_booked(appointments: &[Appointment], slot: &AvailableSlot) -> bool {
    appointments
        .iter()
        .any(|appt| appt.overlaps(slot.start, slot.end))
}

fn validate(
    appointments: &[Appointment],
    window: WorkingWindow,
    consultation_minutes: i64,
) -> Result<()> {
    check_consultation(consultation_minutes)?;

    if window.begin < TimeOfDay::MIDNIGHT {
        return Err(SlotError::OutOfRange(format!(
            "working hours begin at {} minutes, before midnight",
            window.begin.minutes()
        )));
    }
    if window.begin >= window.end {
        return Err(window_inverted(window.begin.to_string(), window.end.to_string()));
    }
    if window.checked_length_minutes().is_none() {
        return Err(SlotError::OutOfRange(format!(
            "working hours {}-{} span more minutes than can be represented",
            window.begin, window.end
        )));
    }

    for (index, appt) in appointments.iter().enumerate() {
        if !window.admits_start(appt.start) {
            return Err(start_outside(
                index,
                appt.start.to_string(),
                window.begin.to_string(),
                window.end.to_string(),
            ));
        }
        check_duration(index, appt.duration_minutes)?;
    }

    Ok(())
}

fn check_consultation(consultation_minutes: i64) -> Result<()> {
    if consultation_minutes <= 0 {
        return Err(SlotError::InvalidArgument(format!(
            "consultation time must be positive, got {} minutes",
            consultation_minutes
        )));
    }
    Ok(())
}

fn check_duration(index: usize, minutes: i64) -> Result<()> {
    if minutes < 0 {
        return Err(SlotError::InvalidArgument(format!(
            "appointment {} has negative duration {} minutes",
            index, minutes
        )));
    }
    Ok(())
}

fn window_inverted(begin: String, end: String) -> SlotError {
    SlotError::OutOfRange(format!("working hours begin at {} but end at {}", begin, end))
}

fn start_outside(index: usize, start: String, begin: String, end: String) -> SlotError {
    SlotError::OutOfRange(format!(
        "appointment {} starts at {}, outside working hours {}-{}",
        index, start, begin, end
    ))
}

/// Lazily partition the window into whole slots. Assumes a validated window
/// and a positive slot length, so `begin + i * len` never passes `end`.
fn candidate_slots(
    window: WorkingWindow,
    consultation_minutes: i64,
) -> impl Iterator<Item = AvailableSlot> {
    let count = window.length_minutes() / consultation_minutes;

    (0..count).map(move |i| {
        let start = window.begin.add_minutes(i * consultation_minutes);
        AvailableSlot {
            start,
            end: start.add_minutes(consultation_minutes),
        }
    })
}
