//! `slots` CLI — compute bookable consultation slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Appointments as records (stdin → stdout), default hours 09:00-17:00, 30 min slots
//! echo '[{"start":"10:00","duration_minutes":30}]' | slots available
//!
//! # Parallel start-time / duration arrays, custom hours and slot length
//! slots available -i day.json --begin 08:00 --end 12:00 --consultation 45
//!
//! # Working hours from a TOML file, JSON output
//! slots available -i day.json -c schedule.toml --format json
//!
//! # Earliest free slot only
//! slots first -i day.json
//! ```

mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use slot_engine::{Appointment, AvailableSlot, SlotError, TimeOfDay};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::ScheduleConfig;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Compute free consultation slots within working hours"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List every free slot in the working day
    Available(ScheduleArgs),
    /// Print the earliest free slot (nothing if the day is fully booked)
    First(ScheduleArgs),
}

#[derive(Args)]
struct ScheduleArgs {
    /// Input JSON file with appointments (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// TOML file with `begin`, `end` and `consultation_minutes`
    #[arg(short, long)]
    config: Option<String>,
    /// Start of working hours (HH:MM)
    #[arg(long, value_parser = parse_time)]
    begin: Option<TimeOfDay>,
    /// End of working hours (HH:MM)
    #[arg(long, value_parser = parse_time)]
    end: Option<TimeOfDay>,
    /// Slot length in minutes
    #[arg(long, allow_hyphen_values = true)]
    consultation: Option<i64>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One `HH:MM-HH:MM` slot per line
    Text,
    /// JSON array of `HH:MM-HH:MM` strings
    Json,
}

/// Legacy payload: `{"start_times": ["HH:MM", ...], "durations": [N, ...]}`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ParallelInput {
    start_times: Option<Vec<TimeOfDay>>,
    durations: Option<Vec<i64>>,
}

impl ParallelInput {
    fn into_appointments(self) -> slot_engine::error::Result<Vec<Appointment>> {
        let start_times = self.start_times.ok_or(SlotError::NullInput("start_times"))?;
        let durations = self.durations.ok_or(SlotError::NullInput("durations"))?;
        let offsets: Vec<_> = start_times.iter().map(|t| t.to_duration()).collect();
        Appointment::from_parallel(&offsets, &durations)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Available(args) => {
            let (appointments, schedule) = load_request(&args)?;
            let slots = slot_engine::available_slots(
                &appointments,
                schedule.window(),
                schedule.consultation_minutes(),
            )
            .context("Failed to compute available slots")?;
            info!(count = slots.len(), "free slots found");
            write_output(args.output.as_deref(), &render(&slots, args.format)?)?;
        }
        Commands::First(args) => {
            let (appointments, schedule) = load_request(&args)?;
            let slot = slot_engine::first_available_slot(
                &appointments,
                schedule.window(),
                schedule.consultation_minutes(),
            )
            .context("Failed to compute first available slot")?;
            let slots: Vec<AvailableSlot> = slot.into_iter().collect();
            write_output(args.output.as_deref(), &render(&slots, args.format)?)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Read appointments and resolve working hours for one invocation.
fn load_request(args: &ScheduleArgs) -> Result<(Vec<Appointment>, ScheduleConfig)> {
    let raw = read_input(args.input.as_deref())?;
    let appointments = parse_appointments(&raw)?;

    let file = match args.config.as_deref() {
        Some(path) => ScheduleConfig::load(path)?,
        None => ScheduleConfig::default(),
    };
    let schedule = file.merge(ScheduleConfig {
        begin: args.begin,
        end: args.end,
        consultation_minutes: args.consultation,
    });

    let window = schedule.window();
    debug!(
        appointments = appointments.len(),
        begin = %window.begin,
        end = %window.end,
        consultation_minutes = schedule.consultation_minutes(),
        "request loaded"
    );
    Ok((appointments, schedule))
}

/// Blank input means an empty day. An array holds `{start, duration_minutes}`
/// records, an object holds the parallel `start_times`/`durations` form.
fn parse_appointments(raw: &str) -> Result<Vec<Appointment>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(raw).context("Failed to parse appointments JSON")?;
    match value {
        Value::Array(_) => serde_json::from_value(value).context("Invalid appointments input"),
        Value::Object(_) => {
            let parallel: ParallelInput =
                serde_json::from_value(value).context("Invalid appointments input")?;
            parallel
                .into_appointments()
                .context("Invalid appointments input")
        }
        other => bail!(
            "Invalid appointments input: expected an array or an object, got {}",
            kind_of(&other)
        ),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn render(slots: &[AvailableSlot], format: Format) -> Result<String> {
    let labels: Vec<String> = slots.iter().map(ToString::to_string).collect();
    match format {
        Format::Text => Ok(labels.iter().map(|l| format!("{}\n", l)).collect()),
        Format::Json => Ok(format!("{}\n", serde_json::to_string(&labels)?)),
    }
}

fn parse_time(s: &str) -> std::result::Result<TimeOfDay, String> {
    TimeOfDay::parse(s).map_err(|e| e.to_string())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }
    io::read_to_string(io::stdin().lock()).context("Failed to read appointments from stdin")
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    if let Some(path) = path {
        return fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()));
    }
    io::stdout()
        .lock()
        .write_all(content.as_bytes())
        .context("Failed to write slots to stdout")
}
