//! WASM bindings for slot-engine.
//!
//! Exposes start/end time options and duration helpers to the browser client
//! via `wasm-bindgen`. Occupied times and results cross the boundary as JSON
//! strings, in the same shapes the reservation API returns.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::{OccupiedEntry, OccupiedInterval, SlotConfig, SlotGrid, TimeOfDay};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TimeOptionDto {
    time: String,
    daytime: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EndOptionsDto {
    options: Vec<TimeOptionDto>,
    /// True when a start is given but nothing fits after it.
    no_available_end: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the occupied-times JSON array. Unrecognized elements are skipped.
fn parse_occupied(json: &str) -> Result<Vec<OccupiedInterval>, JsValue> {
    slot_engine::parse_occupied_json(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid occupied times JSON: {}", e)))
}

fn parse_time(s: &str) -> Result<TimeOfDay, JsValue> {
    TimeOfDay::parse(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_config(json: Option<String>) -> Result<SlotConfig, JsValue> {
    match json {
        Some(json) => SlotConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(SlotConfig::default()),
    }
}

fn grid(config: &SlotConfig) -> Result<SlotGrid, JsValue> {
    config.grid().map_err(|e| JsValue::from_str(&e.to_string()))
}

fn options(times: Vec<TimeOfDay>, config: &SlotConfig) -> Vec<TimeOptionDto> {
    times
        .into_iter()
        .map(|t| TimeOptionDto {
            time: t.to_string(),
            daytime: t.is_daytime(&config.daytime),
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Valid start times for a day.
///
/// `occupied_json` is an array of `["HH:MM", "HH:MM"]` pairs and/or
/// `"HH:MM-HH:MM"` strings. `config_json` optionally overrides the grid step
/// and daytime window. Returns a JSON array of `{time, daytime}` objects.
#[wasm_bindgen(js_name = "availableStartTimes")]
pub fn available_start_times(occupied_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let occupied = parse_occupied(occupied_json)?;
    let config = parse_config(config_json)?;
    let starts = grid(&config)?.start_times(&occupied);
    to_json(&options(starts, &config))
}

/// Valid end times for `start`.
///
/// Returns `{options: [{time, daytime}], noAvailableEnd}`.
#[wasm_bindgen(js_name = "availableEndTimes")]
pub fn available_end_times(
    occupied_json: &str,
    start: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let occupied = parse_occupied(occupied_json)?;
    let config = parse_config(config_json)?;
    let start = parse_time(start)?;
    let ends = grid(&config)?.end_times(start, &occupied);
    let dto = EndOptionsDto {
        no_available_end: ends.is_empty(),
        options: options(ends, &config),
    };
    to_json(&dto)
}

/// Minutes between `start` and `end`. Errors unless `start < end`.
#[wasm_bindgen(js_name = "durationMinutes")]
pub fn duration_minutes(start: &str, end: &str) -> Result<u32, JsValue> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    slot_engine::duration_minutes(start, end)
        .map(u32::from)
        .ok_or_else(|| JsValue::from_str(&format!("End {} is not after start {}", end, start)))
}

/// English rendering of a duration, e.g. `"2 hours and 15 minutes"`.
#[wasm_bindgen(js_name = "formatDuration")]
pub fn format_duration(minutes: u32) -> String {
    slot_engine::format_duration(minutes)
}

/// `HH:MM-HH:MM` labels for the unavailable-times list. Entries that cannot be
/// normalized are passed through as-is.
#[wasm_bindgen(js_name = "blockedTimeLabels")]
pub fn blocked_time_labels(occupied_json: &str) -> Result<String, JsValue> {
    let entries: Vec<OccupiedEntry> = serde_json::from_str(occupied_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid occupied times JSON: {}", e)))?;
    let labels: Vec<String> = entries.iter().map(OccupiedEntry::label).collect();
    to_json(&labels)
}
