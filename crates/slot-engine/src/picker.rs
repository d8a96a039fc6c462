//! Selection state of the date/time picker.
//!
//! A [`SlotPicker`] holds the chosen rooms, day, start and end, plus the
//! occupied intervals for that day. Candidate lists are re-derived from scratch
//! on every read; nothing is cached between input changes.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SlotConfig;
use crate::duration::{duration_minutes, end_after, format_duration};
use crate::error::{PickerError, Result};
use crate::interval::{normalize, OccupiedEntry, OccupiedInterval};
use crate::occupancy::{EventId, OccupancyQuery, OccupancySource, RequestTicket, RequestTracker, RoomId};
use crate::slots::SlotGrid;
use crate::time::TimeOfDay;

/// End-time options for the current start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndTimes {
    /// No start time is selected yet.
    NoStart,
    /// Valid end times, ascending.
    Available(Vec<TimeOfDay>),
    /// A start is selected but every candidate end conflicts with a booking.
    Exhausted,
}

/// A query the caller should run, tagged with the ticket to hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: RequestTicket,
    pub query: OccupancyQuery,
}

/// A completed selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u16,
    pub duration_text: String,
}

#[derive(Debug, Clone)]
pub struct SlotPicker {
    config: SlotConfig,
    grid: SlotGrid,
    rooms: BTreeSet<RoomId>,
    exclude_event_id: Option<EventId>,
    day: Option<NaiveDate>,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
    entries: Vec<OccupiedEntry>,
    occupied: Vec<OccupiedInterval>,
    tracker: RequestTracker,
}

impl SlotPicker {
    /// # Errors
    /// Returns `SlotError::InvalidConfig` if the config does not validate.
    pub fn new(config: SlotConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        Ok(Self {
            config,
            grid,
            rooms: BTreeSet::new(),
            exclude_event_id: None,
            day: None,
            start: None,
            end: None,
            entries: Vec::new(),
            occupied: Vec::new(),
            tracker: RequestTracker::default(),
        })
    }

    /// Pre-populate from an existing event being edited.
    ///
    /// The event's own booking is excluded from every occupancy query. The
    /// initial end is `start + duration`, left unset when that passes `24:00`.
    pub fn editing(self, event_id: EventId, date: NaiveDate, start: TimeOfDay, duration: u32) -> Self {
        let mut picker = self.excluding(event_id);
        picker.day = Some(date);
        picker.start = Some(start);
        picker.end = end_after(start, duration);
        if picker.end.is_none() {
            warn!(%start, duration, "existing booking does not end on the same day, leaving end unset");
        }
        picker
    }

    /// Leave `event_id`'s own booking out of every occupancy query.
    pub fn excluding(mut self, event_id: EventId) -> Self {
        self.exclude_event_id = Some(event_id);
        self
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    pub fn start(&self) -> Option<TimeOfDay> {
        self.start
    }

    pub fn end(&self) -> Option<TimeOfDay> {
        self.end
    }

    pub fn rooms(&self) -> &BTreeSet<RoomId> {
        &self.rooms
    }

    pub fn occupied(&self) -> &[OccupiedInterval] {
        &self.occupied
    }

    /// Replace the room selection. Returns the occupancy query to run, if a
    /// day is already chosen and at least one room is selected.
    ///
    /// A different room set drops the previous rooms' occupancy right away and
    /// supersedes outstanding queries.
    pub fn select_rooms(&mut self, rooms: impl IntoIterator<Item = RoomId>) -> Option<PendingFetch> {
        let rooms: BTreeSet<RoomId> = rooms.into_iter().collect();
        if rooms != self.rooms {
            self.rooms = rooms;
            self.tracker.supersede();
            self.set_occupancy(Vec::new());
        }
        self.request_occupancy()
    }

    /// Choose a day. Clears start, end and the previous day's occupancy.
    pub fn select_day(&mut self, date: NaiveDate) -> Option<PendingFetch> {
        self.day = Some(date);
        self.start = None;
        self.end = None;
        self.entries.clear();
        self.occupied.clear();
        self.tracker.supersede();
        self.request_occupancy()
    }

    /// Issue a query for the current rooms and day. Any earlier query is
    /// superseded.
    pub fn request_occupancy(&mut self) -> Option<PendingFetch> {
        let date = self.day?;
        if self.rooms.is_empty() {
            return None;
        }
        let ticket = self.tracker.issue();
        Some(PendingFetch {
            ticket,
            query: OccupancyQuery {
                room_ids: self.rooms.clone(),
                date,
                exclude_event_id: self.exclude_event_id,
            },
        })
    }

    /// Apply a fetch result. Results for superseded tickets are dropped and
    /// `false` is returned.
    ///
    /// An end that the new occupancy makes invalid is cleared.
    pub fn apply_occupancy(&mut self, ticket: RequestTicket, entries: Vec<OccupiedEntry>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(?ticket, latest = ?self.tracker.latest(), "dropping superseded occupancy result");
            return false;
        }
        self.set_occupancy(entries);
        true
    }

    /// Run the current query against `source` and apply the result.
    ///
    /// On a source error the previous occupancy stays in place.
    pub fn refresh<S: OccupancySource>(&mut self, source: &S) -> bool {
        let Some(pending) = self.request_occupancy() else {
            return false;
        };
        match source.occupied_times(&pending.query) {
            Ok(entries) => self.apply_occupancy(pending.ticket, entries),
            Err(err) => {
                warn!(error = %err, "failed to load occupied times");
                false
            }
        }
    }

    fn set_occupancy(&mut self, entries: Vec<OccupiedEntry>) {
        self.occupied = normalize(&entries);
        self.entries = entries;

        // The start is the user's choice and stays; if nothing fits after it
        // any more, end_times() reports Exhausted.
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if !self.grid.end_times(start, &self.occupied).contains(&end) {
                debug!(%start, %end, "selected end no longer available, clearing it");
                self.end = None;
            }
        }
    }

    /// Valid start times for the current occupancy, ascending.
    pub fn start_times(&self) -> Vec<TimeOfDay> {
        self.grid.start_times(&self.occupied)
    }

    /// Valid end times for the current start.
    pub fn end_times(&self) -> EndTimes {
        let Some(start) = self.start else {
            return EndTimes::NoStart;
        };
        let ends = self.grid.end_times(start, &self.occupied);
        if ends.is_empty() {
            EndTimes::Exhausted
        } else {
            EndTimes::Available(ends)
        }
    }

    /// Choose a start time. Any previously chosen end is cleared.
    ///
    /// # Errors
    /// `NoDaySelected` before a day is chosen, `UnavailableStart` when `start`
    /// is not among [`Self::start_times`].
    pub fn select_start(&mut self, start: TimeOfDay) -> std::result::Result<(), PickerError> {
        if self.day.is_none() {
            return Err(PickerError::NoDaySelected);
        }
        if !self.start_times().contains(&start) {
            return Err(PickerError::UnavailableStart(start));
        }
        self.start = Some(start);
        self.end = None;
        Ok(())
    }

    /// Choose an end time and return the resulting duration in minutes.
    ///
    /// # Errors
    /// `NoStartSelected` without a start, `UnavailableEnd` when `end` is not a
    /// valid end for the current start.
    pub fn select_end(&mut self, end: TimeOfDay) -> std::result::Result<u16, PickerError> {
        let start = self.start.ok_or(PickerError::NoStartSelected)?;
        if !self.grid.end_times(start, &self.occupied).contains(&end) {
            return Err(PickerError::UnavailableEnd { start, end });
        }
        let minutes = duration_minutes(start, end).ok_or(PickerError::UnavailableEnd { start, end })?;
        self.end = Some(end);
        Ok(minutes)
    }

    /// The completed selection, once day, start and end are all chosen.
    pub fn summary(&self) -> Option<SelectionSummary> {
        let date = self.day?;
        let start = self.start?;
        let end = self.end?;
        let minutes = duration_minutes(start, end)?;
        Some(SelectionSummary {
            date,
            start,
            end,
            duration_minutes: minutes,
            duration_text: format_duration(u32::from(minutes)),
        })
    }

    /// Labels for the "unavailable times" list, in the order received.
    pub fn blocked_labels(&self) -> Vec<String> {
        self.entries.iter().map(OccupiedEntry::label).collect()
    }

    pub fn is_daytime(&self, t: TimeOfDay) -> bool {
        t.is_daytime(&self.config.daytime)
    }

    /// Discard the selection. Outstanding queries are superseded; rooms and
    /// the edited event are forgotten.
    pub fn reset(&mut self) {
        self.tracker.supersede();
        self.rooms.clear();
        self.exclude_event_id = None;
        self.day = None;
        self.start = None;
        self.end = None;
        self.entries.clear();
        self.occupied.clear();
    }
}
