//! Environmental sensor readings fed to the risk engine.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One temperature / relative-humidity sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// Air temperature (°C).
    pub temperature_c: f64,
    /// Relative humidity (0–100 %).
    pub relative_humidity_pct: f64,
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
}

impl EnvironmentalReading {
    pub fn new(temperature_c: f64, relative_humidity_pct: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            temperature_c,
            relative_humidity_pct,
            timestamp,
        }
    }

    /// Build from a timezone-naive timestamp, which is taken to be UTC.
    pub fn from_naive(
        temperature_c: f64,
        relative_humidity_pct: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self::new(temperature_c, relative_humidity_pct, timestamp.and_utc())
    }
}
