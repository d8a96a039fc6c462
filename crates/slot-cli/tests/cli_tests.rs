//! Integration tests for the `reservo-slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise each subcommand through
//! the actual binary, including stdin input, fixture files, config loading and
//! error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn cmd() -> Command {
    Command::cargo_bin("reservo-slots").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// starts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn starts_from_stdin() {
    let output = cmd()
        .arg("starts")
        .write_stdin(r#"[["10:00:00","11:00:00"]]"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 92);
    assert!(lines.contains(&"09:45"));
    assert!(!lines.contains(&"10:00"));
    assert!(lines.contains(&"11:00"));
}

#[test]
fn starts_from_file_as_json_skips_bad_entries() {
    let output = cmd()
        .args(["starts", "--json", "-i", &fixture("occupied.json")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let times: Vec<String> = serde_json::from_slice(&output).unwrap();

    assert_eq!(times.len(), 88);
    assert!(times.contains(&"18:00".to_string()));
    assert!(!times.contains(&"15:30".to_string()));
}

#[test]
fn starts_on_full_day_reports_none() {
    cmd()
        .arg("starts")
        .write_stdin(r#"["00:00-24:00"]"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No start times available"));
}

#[test]
fn starts_with_hourly_config() {
    let output = cmd()
        .args(["--config", &fixture("hourly.json"), "starts", "-i", &fixture("occupied.json")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 22);
}

#[test]
fn step_flag_overrides_config() {
    cmd()
        .args(["--step", "30", "starts"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("00:30\n"))
        .stdout(predicate::str::contains("00:15").not());
}

#[test]
fn invalid_step_is_rejected() {
    cmd()
        .args(["--step", "7", "starts"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not divide the day"));
}

#[test]
fn non_array_input_is_an_error() {
    cmd()
        .arg("starts")
        .write_stdin(r#"{"occupied": []}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

// ─────────────────────────────────────────────────────────────────────────────
// ends
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn ends_stop_at_next_block() {
    cmd()
        .args(["ends", "--start", "14:00", "-i", &fixture("occupied.json")])
        .assert()
        .success()
        .stdout("14:15\n14:30\n14:45\n15:00\n");
}

#[test]
fn ends_reach_midnight() {
    cmd()
        .args(["ends", "--start", "23:30", "--json"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("[\"23:45\",\"24:00\"]\n");
}

#[test]
fn ends_with_no_room_report_conflict() {
    cmd()
        .args(["ends", "--start", "10:00"])
        .write_stdin(r#"["10:05:00-11:00:00"]"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("No available end times"));
}

#[test]
fn ends_with_bad_start_fails() {
    cmd()
        .args(["ends", "--start", "25:00"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time '25:00'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// duration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn duration_is_formatted() {
    cmd()
        .args(["duration", "--start", "09:30", "--end", "11:00"])
        .assert()
        .success()
        .stdout("1 hour and 30 minutes\n");
}

#[test]
fn backwards_duration_fails() {
    cmd()
        .args(["duration", "--start", "11:00", "--end", "09:30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not after start"));
}

// ─────────────────────────────────────────────────────────────────────────────
// pick
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn pick_lists_blocked_times_for_selected_rooms() {
    cmd()
        .args(["pick", "--bookings", &fixture("bookings.json"), "--rooms", "2", "--date", "2026-10-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unavailable: 10:00-11:00, 15:00-16:00"))
        .stdout(predicate::str::contains("12:00").and(predicate::str::contains("Start times:")));
}

#[test]
fn pick_excluding_edited_event() {
    cmd()
        .args([
            "pick",
            "--bookings",
            &fixture("bookings.json"),
            "--rooms",
            "1,2",
            "--date",
            "2026-10-20",
            "--exclude-event",
            "1",
            "--start",
            "10:00",
            "--end",
            "11:30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unavailable: 15:00-16:00"))
        .stdout(predicate::str::contains("End times: 10:15"))
        .stdout(predicate::str::contains("Duration: 1 hour and 30 minutes"))
        .stdout(predicate::str::contains("Selected: 2026-10-20 10:00-11:30"));
}

#[test]
fn pick_rejects_occupied_start() {
    cmd()
        .args([
            "pick",
            "--bookings",
            &fixture("bookings.json"),
            "--rooms",
            "1",
            "--date",
            "2026-10-20",
            "--start",
            "10:30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start time 10:30 is not available"));
}

#[test]
fn pick_on_free_day() {
    cmd()
        .args(["pick", "--bookings", &fixture("bookings.json"), "--rooms", "3", "--date", "2026-10-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unavailable: none"));
}
