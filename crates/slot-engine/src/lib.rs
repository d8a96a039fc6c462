//! # slot-engine
//!
//! Time-slot availability for the Reservo reservation client.
//!
//! Given the blocks during which the selected rooms are already booked on a
//! day, the engine derives which quarter-hour start times can be offered and,
//! for a chosen start, which end times keep the new booking clear of every
//! existing one. It is pure and synchronous; fetching the occupied blocks is
//! left to the caller.
//!
//! ```rust
//! use slot_engine::{available_end_times, available_start_times, OccupiedEntry, TimeOfDay};
//!
//! let occupied = slot_engine::normalize(&[OccupiedEntry::pair("15:00:00", "16:00:00")]);
//! let start: TimeOfDay = "14:00".parse().unwrap();
//!
//! assert!(available_start_times(&occupied).contains(&start));
//! let ends = available_end_times(start, &occupied);
//! assert_eq!(ends.first().unwrap().to_string(), "14:15");
//! assert!(!ends.iter().any(|t| t.to_string() == "15:30"));
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `TimeOfDay`, minute precision with a `24:00` end boundary
//! - [`interval`] — wire shapes of occupied blocks and their normalization
//! - [`slots`] — start/end candidate generation on a time grid
//! - [`picker`] — selection state of the date/time picker
//! - [`occupancy`] — occupied-times query contract and last-write-wins tickets
//! - [`duration`] — booking length and its English rendering
//! - [`catalog`] — event listing filters and sort orders
//! - [`config`] — grid step and daytime window
//! - [`error`] — Error types

pub mod catalog;
pub mod config;
pub mod duration;
pub mod error;
pub mod interval;
pub mod occupancy;
pub mod picker;
pub mod slots;
pub mod time;

pub use catalog::{browse, EventFilter, EventStatus, EventSummary, SortOrder};
pub use config::{DaytimeWindow, SlotConfig};
pub use duration::{duration_minutes, format_duration};
pub use error::{PickerError, SlotError};
pub use interval::{normalize, parse_occupied_json, OccupiedEntry, OccupiedInterval};
pub use occupancy::{Booking, OccupancyQuery, OccupancySource, RequestTicket, StaticOccupancy};
pub use picker::{EndTimes, PendingFetch, SelectionSummary, SlotPicker};
pub use slots::{available_end_times, available_start_times, SlotGrid};
pub use time::TimeOfDay;
