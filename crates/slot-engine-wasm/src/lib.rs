//! WASM bindings for slot-engine.
//!
//! Exposes free-slot computation to JavaScript via `wasm-bindgen`. Sequences are
//! passed as JSON strings, times of day as `"HH:MM"` strings and minute counts
//! as `u32` so JavaScript can pass plain numbers.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::{Deserialize, Serialize};
use slot_engine::{Appointment, AvailableSlot, SlotError, TimeOfDay, WorkingWindow};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    label: String,
}

impl From<&AvailableSlot> for SlotDto {
    fn from(s: &AvailableSlot) -> Self {
        Self {
            start: s.start.to_string(),
            end: s.end.to_string(),
            label: s.to_string(),
        }
    }
}

/// One appointment as sent from JavaScript.
#[derive(Deserialize)]
struct AppointmentInput {
    start: String,
    duration_minutes: i64,
}

// ---------------------------------------------------------------------------
// Helpers (plain `String` errors so they are testable off-wasm)
// ---------------------------------------------------------------------------

fn engine_err(e: SlotError) -> String {
    e.to_string()
}

fn parse_time(s: &str) -> Result<TimeOfDay, String> {
    TimeOfDay::parse(s).map_err(engine_err)
}

fn parse_appointments_json(json: &str) -> Result<Vec<Appointment>, String> {
    let inputs: Vec<AppointmentInput> = serde_json::from_str(json)
        .map_err(|e| format!("Invalid appointments JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| Ok(Appointment::new(parse_time(&input.start)?, input.duration_minutes)))
        .collect()
}

/// Parse an optional JSON array; `null` maps to `None`.
fn parse_optional_array<T: for<'de> Deserialize<'de>>(
    json: &str,
    what: &str,
) -> Result<Option<Vec<T>>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn compute_periods_impl(
    start_times_json: &str,
    durations_json: &str,
    begin: &str,
    end: &str,
    consultation_minutes: i64,
) -> Result<String, String> {
    let start_times: Option<Vec<String>> = parse_optional_array(start_times_json, "start times")?;
    let durations: Option<Vec<i64>> = parse_optional_array(durations_json, "durations")?;

    let offsets = start_times
        .map(|times| {
            times
                .iter()
                .map(|t| parse_time(t).map(TimeOfDay::to_duration))
                .collect::<Result<Vec<_>, String>>()
        })
        .transpose()?;

    let periods = slot_engine::compute_available_periods(
        offsets.as_deref(),
        durations.as_deref(),
        parse_time(begin)?.to_duration(),
        parse_time(end)?.to_duration(),
        consultation_minutes,
    )
    .map_err(engine_err)?;

    to_json(&periods)
}

fn available_slots_impl(
    appointments_json: &str,
    begin: &str,
    end: &str,
    consultation_minutes: i64,
) -> Result<String, String> {
    let appointments = parse_appointments_json(appointments_json)?;
    let window = WorkingWindow::new(parse_time(begin)?, parse_time(end)?);

    let slots = slot_engine::available_slots(&appointments, window, consultation_minutes)
        .map_err(engine_err)?;

    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    to_json(&dtos)
}

fn first_slot_impl(
    appointments_json: &str,
    begin: &str,
    end: &str,
    consultation_minutes: i64,
) -> Result<String, String> {
    let appointments = parse_appointments_json(appointments_json)?;
    let window = WorkingWindow::new(parse_time(begin)?, parse_time(end)?);

    let slot = slot_engine::first_available_slot(&appointments, window, consultation_minutes)
        .map_err(engine_err)?;

    to_json(&slot.as_ref().map(SlotDto::from))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute available periods from parallel arrays.
///
/// `start_times_json` is a JSON array of `"HH:MM"` strings (or `null`),
/// `durations_json` a JSON array of minute counts (or `null`). Returns a JSON
/// array of `"HH:MM-HH:MM"` strings.
#[wasm_bindgen(js_name = "computeAvailablePeriods")]
pub fn compute_available_periods(
    start_times_json: &str,
    durations_json: &str,
    begin: &str,
    end: &str,
    consultation_minutes: u32,
) -> Result<String, JsValue> {
    compute_periods_impl(
        start_times_json,
        durations_json,
        begin,
        end,
        consultation_minutes.into(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Compute free slots from a JSON array of `{start, duration_minutes}` objects.
///
/// Returns a JSON array of `{start, end, label}` objects.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    appointments_json: &str,
    begin: &str,
    end: &str,
    consultation_minutes: u32,
) -> Result<String, JsValue> {
    available_slots_impl(appointments_json, begin, end, consultation_minutes.into())
        .map_err(|e| JsValue::from_str(&e))
}

/// Find the earliest free slot. Returns a `{start, end, label}` JSON object,
/// or `null` when the day is fully booked.
#[wasm_bindgen(js_name = "firstAvailableSlot")]
pub fn first_available_slot(
    appointments_json: &str,
    begin: &str,
    end: &str,
    consultation_minutes: u32,
) -> Result<String, JsValue> {
    first_slot_impl(appointments_json, begin, end, consultation_minutes.into())
        .map_err(|e| JsValue::from_str(&e))
}
