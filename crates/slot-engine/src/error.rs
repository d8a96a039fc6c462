//! Error types for slot-engine operations.

use thiserror::Error;

use crate::time::TimeOfDay;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid occupied interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid slot grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;

/// Rejected picker transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("No day selected")]
    NoDaySelected,

    #[error("No start time selected")]
    NoStartSelected,

    #[error("Start time {0} is not available")]
    UnavailableStart(TimeOfDay),

    #[error("End time {end} is not available for start {start}")]
    UnavailableEnd { start: TimeOfDay, end: TimeOfDay },
}
