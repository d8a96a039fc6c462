//! Minute-granular time of day, including the `24:00` end-of-day boundary.
//!
//! `chrono::NaiveTime` cannot represent `24:00`, but a booking that runs until
//! midnight needs it as an end boundary, so times are stored as minutes since
//! midnight in `0..=1440`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::DaytimeWindow;
use crate::error::{Result, SlotError};

/// Minutes in one day; also the minute value of `24:00`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute granularity.
///
/// Ordering is chronological. `24:00` sorts after every other value and is only
/// meaningful as the exclusive end of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(pub(crate) u16);

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: Self = Self(0);
    /// `24:00`, midnight at the end of the day.
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Build from minutes since midnight (`0..=1440`).
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime(format!(
                "{} minutes is past the end of the day",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    /// Build from an hour and minute. `24:00` is accepted; `24:15` is not.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(SlotError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Parse `HH:MM` or `HH:MM:SS`. Seconds are dropped, not rounded.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTime(s.to_string());
        let trimmed = s.trim();
        let mut parts = trimmed.split(':');

        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        let second = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if hour.is_empty() || hour.len() > 2 || !is_digits(hour) {
            return Err(invalid());
        }
        if minute.len() != 2 || !is_digits(minute) {
            return Err(invalid());
        }
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;

        if let Some(second) = second {
            if second.len() != 2 || !is_digits(second) {
                return Err(invalid());
            }
            let second: u16 = second.parse().map_err(|_| invalid())?;
            if second >= 60 || (hour == 24 && second != 0) {
                return Err(invalid());
            }
        }

        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    pub fn is_end_of_day(self) -> bool {
        self.0 == MINUTES_PER_DAY
    }

    /// Add minutes, returning `None` if the result would pass `24:00`.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(minutes)?;
        if total > u32::from(MINUTES_PER_DAY) {
            None
        } else {
            Some(Self(total as u16))
        }
    }

    /// Minutes from `self` to `later`, or `None` if `later` is not after `self`.
    pub fn minutes_until(self, later: Self) -> Option<u16> {
        if later.0 > self.0 {
            Some(later.0 - self.0)
        } else {
            None
        }
    }

    /// Whether the hour falls inside the configured daytime window.
    ///
    /// Only the hour is considered, so `19:45` is daytime for a `06:00`–`20:00`
    /// window while `20:00` is not.
    pub fn is_daytime(self, window: &DaytimeWindow) -> bool {
        let hour = self.hour();
        hour >= u16::from(window.start_hour) && hour < u16::from(window.end_hour)
    }

    /// Convert to `NaiveTime`. `24:00` has no `NaiveTime` equivalent.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        if self.is_end_of_day() {
            return None;
        }
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds and sub-second precision.
    fn from(t: NaiveTime) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
