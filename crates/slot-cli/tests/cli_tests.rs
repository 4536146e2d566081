//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the `available`
//! and `first` subcommands through the actual binary, including stdin piping,
//! file I/O, config files and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// available
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_stdin_lists_default_day() {
    let output = slots()
        .arg("available")
        .write_stdin("")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "09:00-09:30");
    assert_eq!(lines[15], "16:30-17:00");
}

#[test]
fn records_file_removes_booked_slots() {
    slots()
        .args(["available", "-i", &fixture("day.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:30-10:00\n10:30-11:00\n"))
        .stdout(predicate::str::contains("10:00-10:30").not())
        .stdout(predicate::str::contains("13:30-14:00").not())
        .stdout(predicate::str::contains("12:30-13:00\n14:00-14:30\n"));
}

#[test]
fn parallel_form_with_full_day_booking_prints_nothing() {
    slots()
        .args(["available", "-i", &fixture("parallel.json")])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn flags_set_hours_and_slot_length() {
    slots()
        .args(["available", "--begin", "08:00", "--end", "10:00", "--consultation", "45"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("08:00-08:45\n08:45-09:30\n");
}

#[test]
fn config_file_supplies_hours() {
    slots()
        .args(["available", "-c", &fixture("schedule.toml")])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("08:00-08:45\n08:45-09:30\n");
}

#[test]
fn flags_override_config_file() {
    slots()
        .args([
            "available",
            "-c",
            &fixture("schedule.toml"),
            "--consultation",
            "60",
        ])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("08:00-09:00\n09:00-10:00\n");
}

#[test]
fn json_format_prints_array() {
    let output = slots()
        .args(["available", "--begin", "09:00", "--end", "10:00", "--format", "json"])
        .write_stdin("[]")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: Vec<String> = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed, vec!["09:00-09:30", "09:30-10:00"]);
}

#[test]
fn output_file_receives_slots() {
    let output_path = std::env::temp_dir().join("slots-test-available-output.txt");
    let _ = std::fs::remove_file(&output_path);

    slots()
        .args(["available", "--begin", "09:00", "--end", "09:30", "-o"])
        .arg(&output_path)
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert_eq!(content, "09:00-09:30\n");
    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// first
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn first_prints_earliest_free_slot() {
    slots()
        .arg("first")
        .write_stdin(r#"[{"start":"09:00","duration_minutes":60}]"#)
        .assert()
        .success()
        .stdout("10:00-10:30\n");
}

#[test]
fn first_on_booked_day_prints_nothing() {
    slots()
        .args(["first", "-i", &fixture("parallel.json")])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn appointment_before_opening_fails() {
    slots()
        .arg("available")
        .write_stdin(r#"[{"start":"08:00","duration_minutes":30}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Out of range"));
}

#[test]
fn mismatched_parallel_arrays_fail() {
    slots()
        .arg("available")
        .write_stdin(r#"{"start_times":["09:00"],"durations":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Array length mismatch"));
}

#[test]
fn null_start_times_fail() {
    slots()
        .arg("available")
        .write_stdin(r#"{"start_times":null,"durations":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input: start_times"));
}

#[test]
fn zero_consultation_fails() {
    slots()
        .args(["available", "--consultation", "0"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn inverted_hours_fail() {
    slots()
        .args(["available", "--begin", "18:00", "--end", "09:00"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Out of range"));
}

#[test]
fn malformed_time_flag_is_rejected_by_parser() {
    slots()
        .args(["available", "--begin", "9am"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time of day"));
}

#[test]
fn malformed_json_fails() {
    slots()
        .arg("available")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse appointments JSON"));
}

#[test]
fn bad_record_time_reports_the_time_error() {
    slots()
        .arg("available")
        .write_stdin(r#"[{"start":"25:00","duration_minutes":30}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid appointments input"))
        .stderr(predicate::str::contains("Invalid time of day: '25:00'"));
}

#[test]
fn bad_parallel_time_reports_the_time_error() {
    slots()
        .arg("available")
        .write_stdin(r#"{"start_times":["9h"],"durations":[30]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time of day: '9h'"));
}

#[test]
fn scalar_input_is_rejected() {
    slots()
        .arg("available")
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected an array or an object, got a number"));
}

#[test]
fn missing_input_file_fails() {
    slots()
        .args(["available", "-i", "/nonexistent/day.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn verbose_flag_logs_to_stderr() {
    slots()
        .args(["-vv", "available"])
        .write_stdin("[]")
        .assert()
        .success()
        .stderr(predicate::str::contains("computed available slots"));
}
