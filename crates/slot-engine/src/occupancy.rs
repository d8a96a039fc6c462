//! The occupied-times collaborator contract.
//!
//! The picker never fetches anything itself. It produces an [`OccupancyQuery`]
//! (rooms, day, optional event to exclude when editing) tagged with a
//! [`RequestTicket`], and whoever performs the fetch hands the result back with
//! that ticket. Only the result for the most recently issued ticket is applied.

use std::collections::BTreeSet;
use std::convert::Infallible;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interval::OccupiedEntry;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

pub type RoomId = u64;
pub type EventId = u64;

/// Parameters of one occupied-times lookup.
///
/// Serializes with the query parameter names the reservation API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyQuery {
    pub room_ids: BTreeSet<RoomId>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_event_id: Option<EventId>,
}

/// Identifies one issued query. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Issues tickets and remembers the latest one.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Option<RequestTicket>,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestTicket {
        let next = RequestTicket(self.latest.map_or(1, |t| t.0 + 1));
        self.latest = Some(next);
        next
    }

    pub fn latest(&self) -> Option<RequestTicket> {
        self.latest
    }

    /// Invalidate every outstanding ticket without starting a new query.
    pub fn supersede(&mut self) {
        self.issue();
    }

    /// True only for the most recently issued ticket.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest == Some(ticket)
    }
}

/// Something that can answer occupied-times queries.
pub trait OccupancySource {
    type Error: std::error::Error;

    fn occupied_times(&self, query: &OccupancyQuery) -> Result<Vec<OccupiedEntry>, Self::Error>;
}

/// An existing event that blocks its rooms for part of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub event_id: EventId,
    pub room_ids: BTreeSet<RoomId>,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub duration: u32,
}

impl Booking {
    /// Wire entry `[start, start + duration]` with seconds, the end cut off at
    /// `24:00`.
    fn to_entry(&self) -> OccupiedEntry {
        let end = u32::from(self.start_time.minutes())
            .saturating_add(self.duration)
            .min(u32::from(MINUTES_PER_DAY));
        let end = TimeOfDay(end as u16);
        OccupiedEntry::pair(format!("{}:00", self.start_time), format!("{}:00", end))
    }
}

/// In-memory occupancy backed by a fixed list of bookings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticOccupancy {
    bookings: Vec<Booking>,
}

impl StaticOccupancy {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }
}

impl OccupancySource for StaticOccupancy {
    type Error = Infallible;

    /// Bookings on the query date that use any queried room, minus the
    /// excluded event. Zero-length bookings occupy nothing and are left out.
    fn occupied_times(&self, query: &OccupancyQuery) -> Result<Vec<OccupiedEntry>, Infallible> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.date == query.date && b.duration > 0)
            .filter(|b| query.exclude_event_id != Some(b.event_id))
            .filter(|b| !b.room_ids.is_disjoint(&query.room_ids))
            .map(Booking::to_entry)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn booking(event_id: EventId, rooms: &[RoomId], start: &str, duration: u32) -> Booking {
        Booking {
            event_id,
            room_ids: rooms.iter().copied().collect(),
            date: day(),
            start_time: TimeOfDay::parse(start).unwrap(),
            duration,
        }
    }

    #[test]
    fn tickets_increase_and_only_latest_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(second > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn query_serializes_with_api_names() {
        let query = OccupancyQuery {
            room_ids: [3, 1].into_iter().collect(),
            date: day(),
            exclude_event_id: Some(9),
        };
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"roomIds":[1,3],"date":"2026-10-16","excludeEventId":9}"#);
    }

    #[test]
    fn static_source_filters_rooms_date_and_excluded_event() {
        let mut other_day = booking(4, &[1], "08:00", 60);
        other_day.date = day().succ_opt().unwrap();
        let source = StaticOccupancy::new(vec![
            booking(1, &[1, 2], "10:00", 60),
            booking(2, &[5], "12:00", 60),
            booking(3, &[2], "23:00", 120),
            other_day,
        ]);

        let query = OccupancyQuery {
            room_ids: [2].into_iter().collect(),
            date: day(),
            exclude_event_id: Some(1),
        };
        let entries = source.occupied_times(&query).unwrap();
        assert_eq!(entries, vec![OccupiedEntry::pair("23:00:00", "24:00:00")]);
    }

    #[test]
    fn long_bookings_are_cut_off_at_end_of_day() {
        let source = StaticOccupancy::new(vec![
            booking(1, &[1], "10:00", 1440),
            booking(2, &[1], "12:00", u32::MAX),
            booking(3, &[1], "09:00", 0),
        ]);
        let query = OccupancyQuery {
            room_ids: [1].into_iter().collect(),
            date: day(),
            exclude_event_id: None,
        };
        let entries = source.occupied_times(&query).unwrap();
        assert_eq!(
            entries,
            vec![
                OccupiedEntry::pair("10:00:00", "24:00:00"),
                OccupiedEntry::pair("12:00:00", "24:00:00"),
            ]
        );
    }
}
