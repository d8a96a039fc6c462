//! `reservo-slots` CLI — compute reservation time options from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Start times for a day, occupied times as the API returns them (stdin)
//! echo '[["10:00:00","11:00:00"]]' | reservo-slots starts
//!
//! # End times for a chosen start, from a file, as JSON
//! reservo-slots ends --start 14:00 -i occupied.json --json
//!
//! # Duration between two times
//! reservo-slots duration --start 09:30 --end 11:00
//!
//! # Full picker flow against a bookings file
//! reservo-slots pick --bookings bookings.json --rooms 1,2 --date 2026-10-20 --start 14:00
//!
//! # Hourly grid, diagnostics on stderr
//! RUST_LOG=debug reservo-slots --step 60 starts -i occupied.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use slot_engine::occupancy::RoomId;
use slot_engine::{EndTimes, SlotConfig, SlotPicker, StaticOccupancy, TimeOfDay};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "reservo-slots",
    version,
    about = "Reservation time-slot availability CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (step_minutes, daytime window)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Candidate step in minutes; overrides the config file
    #[arg(long, global = true)]
    step: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// List valid start times
    Starts {
        /// Occupied times JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print a JSON array instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// List valid end times for a start time
    Ends {
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// Occupied times JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print a JSON array instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// Print the duration between two times
    Duration {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Run the picker against a bookings file
    Pick {
        /// Bookings JSON: [{eventId, roomIds, date, startTime, duration}]
        #[arg(long)]
        bookings: String,
        /// Comma-separated room ids
        #[arg(long, value_delimiter = ',', required = true)]
        rooms: Vec<RoomId>,
        /// Day (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Event being edited; its own booking is ignored
        #[arg(long)]
        exclude_event: Option<u64>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.step)?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Starts { input, json } => {
            let occupied = read_occupied(input.as_deref())?;
            let starts = config.grid()?.start_times(&occupied);
            if starts.is_empty() {
                eprintln!("No start times available on this day");
            }
            print_times(&starts, json)?;
        }
        Commands::Ends { start, input, json } => {
            let start = parse_time(&start)?;
            let occupied = read_occupied(input.as_deref())?;
            let ends = config.grid()?.end_times(start, &occupied);
            if ends.is_empty() {
                eprintln!("No available end times due to scheduling conflicts");
            }
            print_times(&ends, json)?;
        }
        Commands::Duration { start, end } => {
            let start = parse_time(&start)?;
            let end = parse_time(&end)?;
            let minutes = slot_engine::duration_minutes(start, end)
                .with_context(|| format!("End {} is not after start {}", end, start))?;
            println!("{}", slot_engine::format_duration(u32::from(minutes)));
        }
        Commands::Pick {
            bookings,
            rooms,
            date,
            exclude_event,
            start,
            end,
        } => {
            let raw = std::fs::read_to_string(&bookings)
                .with_context(|| format!("Failed to read file: {}", bookings))?;
            let source: StaticOccupancy =
                serde_json::from_str(&raw).context("Failed to parse bookings JSON")?;
            pick(config, &source, rooms, date, exclude_event, start, end)?;
        }
    }

    Ok(())
}

/// Walk the picker through rooms, day, start and end, printing each stage.
fn pick(
    config: SlotConfig,
    source: &StaticOccupancy,
    rooms: Vec<RoomId>,
    date: NaiveDate,
    exclude_event: Option<u64>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let mut picker = SlotPicker::new(config)?;
    if let Some(event_id) = exclude_event {
        picker = picker.excluding(event_id);
    }
    picker.select_day(date);
    picker.select_rooms(rooms);
    picker.refresh(source);

    let blocked = picker.blocked_labels();
    if blocked.is_empty() {
        println!("Unavailable: none");
    } else {
        println!("Unavailable: {}", blocked.join(", "));
    }
    println!("Start times: {}", join_times(&picker.start_times()));

    let Some(start) = start else {
        return Ok(());
    };
    picker.select_start(parse_time(&start)?)?;
    match picker.end_times() {
        EndTimes::Available(ends) => println!("End times: {}", join_times(&ends)),
        EndTimes::Exhausted => println!("No available end times due to scheduling conflicts"),
        EndTimes::NoStart => {}
    }

    if let Some(end) = end {
        picker.select_end(parse_time(&end)?)?;
        if let Some(summary) = picker.summary() {
            println!("Duration: {}", summary.duration_text);
            println!("Selected: {} {}-{}", summary.date, summary.start, summary.end);
        }
    }
    Ok(())
}

fn load_config(path: Option<&str>, step: Option<u16>) -> Result<SlotConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            SlotConfig::from_json(&raw).with_context(|| format!("Invalid config file: {}", path))?
        }
        None => SlotConfig::default(),
    };
    if let Some(step) = step {
        config.step_minutes = step;
    }
    config.validate()?;
    Ok(config)
}

fn parse_time(s: &str) -> Result<TimeOfDay> {
    TimeOfDay::parse(s).with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

fn read_occupied(path: Option<&str>) -> Result<Vec<slot_engine::OccupiedInterval>> {
    let json = read_input(path)?;
    slot_engine::parse_occupied_json(&json).context("Occupied times must be a JSON array")
}

fn print_times(times: &[TimeOfDay], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(times)?);
    } else {
        for t in times {
            println!("{}", t);
        }
    }
    Ok(())
}

fn join_times(times: &[TimeOfDay]) -> String {
    if times.is_empty() {
        return "none".to_string();
    }
    times.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
