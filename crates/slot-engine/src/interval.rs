//! Occupied intervals: the wire shapes the reservation API returns and the
//! canonical half-open interval every comparison runs on.
//!
//! The API reports an occupied block either as a two-element array
//! (`["10:00:00", "11:30:00"]`) or as a hyphenated string (`"10:00-11:30"`).
//! Both are normalized into [`OccupiedInterval`] before any slot logic runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// One occupied block as received from the reservation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OccupiedEntry {
    /// `["HH:MM", "HH:MM"]`, seconds optional.
    Pair(String, String),
    /// `"HH:MM-HH:MM"`, seconds optional.
    Encoded(String),
    /// Anything else. Kept so one bad element does not fail the whole list.
    Unrecognized(serde_json::Value),
}

impl OccupiedEntry {
    pub fn pair(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Pair(start.into(), end.into())
    }

    pub fn encoded(range: impl Into<String>) -> Self {
        Self::Encoded(range.into())
    }

    /// Convert into a canonical interval.
    ///
    /// An end of `00:00` is read as midnight at the end of the day. Any other
    /// end at or before the start belongs to a booking that runs past midnight
    /// (a 24-hour booking wraps onto its own start) and is clamped to `24:00`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` for unrecognized shapes, unparseable
    /// times, or a block starting at `24:00`.
    pub fn to_interval(&self) -> Result<OccupiedInterval> {
        let (start, end) = match self {
            Self::Pair(start, end) => (parse_bound(start)?, parse_bound(end)?),
            Self::Encoded(range) => {
                let (start, end) = range.split_once('-').ok_or_else(|| {
                    SlotError::InvalidInterval(format!("expected HH:MM-HH:MM, got {:?}", range))
                })?;
                (parse_bound(start)?, parse_bound(end)?)
            }
            Self::Unrecognized(value) => {
                return Err(SlotError::InvalidInterval(format!(
                    "unknown occupied time format: {}",
                    value
                )))
            }
        };

        let end = if end == TimeOfDay::MIDNIGHT {
            TimeOfDay::END_OF_DAY
        } else if end <= start {
            debug!(%start, %end, "occupied interval wraps past midnight, clamping to 24:00");
            TimeOfDay::END_OF_DAY
        } else {
            end
        };

        OccupiedInterval::new(start, end)
    }

    /// Label for the "unavailable times" list. Falls back to the raw value
    /// when the entry cannot be normalized.
    pub fn label(&self) -> String {
        match self.to_interval() {
            Ok(interval) => interval.to_string(),
            Err(_) => match self {
                Self::Pair(start, end) => format!("{}-{}", start, end),
                Self::Encoded(range) => range.clone(),
                Self::Unrecognized(value) => value.to_string(),
            },
        }
    }
}

fn parse_bound(raw: &str) -> Result<TimeOfDay> {
    TimeOfDay::parse(raw).map_err(|e| SlotError::InvalidInterval(e.to_string()))
}

/// A half-open `[start, end)` block during which the selected rooms are busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OccupiedInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl OccupiedInterval {
    /// # Errors
    /// Returns `SlotError::InvalidInterval` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval(format!(
                "start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether the instant lies inside the block: `start <= t < end`.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.start <= t && t < self.end
    }

    /// Whether `[start, end)` intersects this block: `start < self.end && end > self.start`.
    ///
    /// Adjacent ranges (one ends exactly where the other begins) do not overlap.
    pub fn overlaps(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        start < self.end && end > self.start
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }
}

impl fmt::Display for OccupiedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Normalize API entries into canonical intervals, in input order.
///
/// Entries that cannot be normalized are logged and skipped.
pub fn normalize(entries: &[OccupiedEntry]) -> Vec<OccupiedInterval> {
    entries
        .iter()
        .filter_map(|entry| match entry.to_interval() {
            Ok(interval) => Some(interval),
            Err(err) => {
                warn!(?entry, %err, "ignoring occupied time entry");
                None
            }
        })
        .collect()
}

/// Parse a JSON array of occupied entries and normalize it.
///
/// # Errors
/// Fails only when the document is not a JSON array; individual bad elements
/// are skipped by [`normalize`].
pub fn parse_occupied_json(json: &str) -> std::result::Result<Vec<OccupiedInterval>, serde_json::Error> {
    let entries: Vec<OccupiedEntry> = serde_json::from_str(json)?;
    Ok(normalize(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn deserializes_both_wire_shapes() {
        let entries: Vec<OccupiedEntry> =
            serde_json::from_str(r#"[["10:00:00","11:30:00"], "14:00-15:00", 42, ["a","b","c"]]"#)
                .unwrap();
        assert_eq!(entries[0], OccupiedEntry::pair("10:00:00", "11:30:00"));
        assert_eq!(entries[1], OccupiedEntry::encoded("14:00-15:00"));
        assert!(matches!(entries[2], OccupiedEntry::Unrecognized(_)));
        assert!(matches!(entries[3], OccupiedEntry::Unrecognized(_)));
    }

    #[test]
    fn midnight_end_means_end_of_day() {
        let interval = OccupiedEntry::pair("23:00:00", "00:00:00").to_interval().unwrap();
        assert_eq!(interval.end(), TimeOfDay::END_OF_DAY);

        let whole_day = OccupiedEntry::encoded("00:00-00:00").to_interval().unwrap();
        assert_eq!(whole_day.duration_minutes(), 1440);
    }

    #[test]
    fn wrapped_end_is_clamped() {
        let interval = OccupiedEntry::pair("23:00", "01:30").to_interval().unwrap();
        assert_eq!(interval.start(), t("23:00"));
        assert_eq!(interval.end(), TimeOfDay::END_OF_DAY);
    }

    #[test]
    fn full_day_booking_from_mid_morning_blocks_rest_of_day() {
        let interval = OccupiedEntry::pair("10:00:00", "10:00:00").to_interval().unwrap();
        assert_eq!(interval.start(), t("10:00"));
        assert_eq!(interval.end(), TimeOfDay::END_OF_DAY);

        let intervals = normalize(&[OccupiedEntry::encoded("10:00-10:00")]);
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].contains(t("10:30")));
    }

    #[test]
    fn block_starting_at_end_of_day_is_rejected() {
        assert!(OccupiedEntry::pair("24:00", "24:00").to_interval().is_err());
    }

    #[test]
    fn normalize_skips_garbage() {
        let entries = vec![
            OccupiedEntry::encoded("10:00-11:00"),
            OccupiedEntry::encoded("nonsense"),
            OccupiedEntry::pair("xx", "11:00"),
            OccupiedEntry::Unrecognized(serde_json::json!({"start": "10:00"})),
        ];
        let intervals = normalize(&entries);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].to_string(), "10:00-11:00");
    }

    #[test]
    fn label_falls_back_to_raw() {
        assert_eq!(OccupiedEntry::pair("10:00:00", "11:30:00").label(), "10:00-11:30");
        assert_eq!(OccupiedEntry::encoded("soon").label(), "soon");
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let block = OccupiedInterval::new(t("10:00"), t("11:00")).unwrap();
        assert!(!block.overlaps(t("09:00"), t("10:00")));
        assert!(!block.overlaps(t("11:00"), t("12:00")));
        assert!(block.overlaps(t("10:45"), t("11:15")));
        assert!(block.contains(t("10:00")));
        assert!(!block.contains(t("11:00")));
    }
}
