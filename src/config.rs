//! Risk engine configuration.
//!
//! All tunable parameters for the mold-risk service.  Values can be
//! overridden through a [`ConfigPort`](crate::app::ports::ConfigPort).

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Byte encoding for persisted state records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateEncoding {
    /// Human-readable JSON record (ISO-8601 timestamps).
    #[default]
    Json,
    /// Compact postcard encoding of the same record.
    Postcard,
}

/// Core risk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Unbroken unfavorable streak (hours) after which the score resets.
    pub reset_after_hours: u32,
    /// Nominal sensor cadence (minutes).  Never used to compute growth;
    /// elapsed time always comes from reading timestamps.
    pub reading_interval_minutes: f64,
    /// Encoding used when persisting state records.
    pub state_encoding: StateEncoding,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            reset_after_hours: 24,
            reading_interval_minutes: 30.0,
            state_encoding: StateEncoding::Json,
        }
    }
}

impl RiskConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=720).contains(&self.reset_after_hours) {
            return Err(ConfigError::ValidationFailed(
                "reset_after_hours must be 1–720",
            ));
        }
        if !self.reading_interval_minutes.is_finite()
            || self.reading_interval_minutes <= 0.0
            || self.reading_interval_minutes > 1440.0
        {
            return Err(ConfigError::ValidationFailed(
                "reading_interval_minutes must be in (0, 1440]",
            ));
        }
        Ok(())
    }

    /// Reset window as a duration.
    pub fn reset_window(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.reset_after_hours))
    }
}
