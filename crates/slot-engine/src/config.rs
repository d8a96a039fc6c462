//! Picker configuration: candidate granularity and the daytime window used to
//! classify times for display.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::slots::SlotGrid;

/// Hours considered "daytime" when labelling candidate times.
///
/// `start_hour` is inclusive, `end_hour` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaytimeWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for DaytimeWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 20,
        }
    }
}

/// Configuration for slot generation and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Candidate step in minutes. Must divide a day evenly.
    pub step_minutes: u16,
    pub daytime: DaytimeWindow,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            step_minutes: SlotGrid::DEFAULT_STEP_MINUTES,
            daytime: DaytimeWindow::default(),
        }
    }
}

impl SlotConfig {
    /// Check that the step yields a valid grid and the daytime window is ordered.
    pub fn validate(&self) -> Result<()> {
        SlotGrid::new(self.step_minutes)
            .map_err(|e| SlotError::InvalidConfig(e.to_string()))?;
        if self.daytime.start_hour >= self.daytime.end_hour || self.daytime.end_hour > 24 {
            return Err(SlotError::InvalidConfig(format!(
                "daytime window {}..{} must satisfy start < end <= 24",
                self.daytime.start_hour, self.daytime.end_hour
            )));
        }
        Ok(())
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SlotError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Result<SlotGrid> {
        SlotGrid::new(self.step_minutes)
    }
}
