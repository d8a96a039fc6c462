//! Start/end candidate generation on a fixed time grid.
//!
//! Start candidates are grid instants in `[00:00, 24:00)` that are not inside
//! an occupied block and leave room for at least one end. End candidates are
//! grid instants in `(start, 24:00]` such that `[start, end)` overlaps no
//! occupied block. Both walk the same end-candidate iterator.

use crate::error::{Result, SlotError};
use crate::interval::OccupiedInterval;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Candidate granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotGrid {
    step_minutes: u16,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            step_minutes: Self::DEFAULT_STEP_MINUTES,
        }
    }
}

impl SlotGrid {
    pub const DEFAULT_STEP_MINUTES: u16 = 15;

    /// # Errors
    /// Returns `SlotError::InvalidGrid` unless the step is in `1..=720` and
    /// divides 1440.
    pub fn new(step_minutes: u16) -> Result<Self> {
        if step_minutes == 0 || step_minutes > MINUTES_PER_DAY / 2 || MINUTES_PER_DAY % step_minutes != 0 {
            return Err(SlotError::InvalidGrid(format!(
                "step of {} minutes does not divide the day",
                step_minutes
            )));
        }
        Ok(Self { step_minutes })
    }

    pub fn step_minutes(&self) -> u16 {
        self.step_minutes
    }

    /// Every grid instant from `00:00` up to but excluding `24:00`.
    pub fn instants(&self) -> impl Iterator<Item = TimeOfDay> {
        (0..MINUTES_PER_DAY)
            .step_by(usize::from(self.step_minutes))
            .map(TimeOfDay)
    }

    /// Valid start times, ascending.
    pub fn start_times(&self, occupied: &[OccupiedInterval]) -> Vec<TimeOfDay> {
        self.instants()
            .filter(|&t| !is_occupied(t, occupied))
            .filter(|&t| self.valid_ends(t, occupied).next().is_some())
            .collect()
    }

    /// Valid end times for `start`, ascending. Empty when nothing fits.
    ///
    /// Ends are stepped from `start` itself, so a start off the grid (`14:07`)
    /// yields ends off the grid too (`14:22`, `14:37`, ...).
    pub fn end_times(&self, start: TimeOfDay, occupied: &[OccupiedInterval]) -> Vec<TimeOfDay> {
        self.valid_ends(start, occupied).collect()
    }

    /// Lazily yields valid ends for `start`.
    ///
    /// Candidates are `start + k * step` for `k >= 1`, up to and including
    /// `24:00`.
    fn valid_ends<'a>(
        &self,
        start: TimeOfDay,
        occupied: &'a [OccupiedInterval],
    ) -> impl Iterator<Item = TimeOfDay> + 'a {
        let first = start.minutes() + self.step_minutes;
        (first..=MINUTES_PER_DAY)
            .step_by(usize::from(self.step_minutes))
            .map(TimeOfDay)
            .filter(move |&end| !overlaps_any(start, end, occupied))
    }
}

/// Whether `t` lies inside any occupied block (`start <= t < end`).
pub fn is_occupied(t: TimeOfDay, occupied: &[OccupiedInterval]) -> bool {
    occupied.iter().any(|block| block.contains(t))
}

/// Whether `[start, end)` overlaps any occupied block.
pub fn overlaps_any(start: TimeOfDay, end: TimeOfDay, occupied: &[OccupiedInterval]) -> bool {
    occupied.iter().any(|block| block.overlaps(start, end))
}

/// Valid start times on the default 15-minute grid.
pub fn available_start_times(occupied: &[OccupiedInterval]) -> Vec<TimeOfDay> {
    SlotGrid::default().start_times(occupied)
}

/// Valid end times for `start` on the default 15-minute grid, stepped from
/// `start` itself.
pub fn available_end_times(start: TimeOfDay, occupied: &[OccupiedInterval]) -> Vec<TimeOfDay> {
    SlotGrid::default().end_times(start, occupied)
}
