//! Persisted per-room risk state and its storage representation.
//!
//! [`MoldRiskState`] is the only record that survives between readings.
//! The caller owns persistence; this module only converts to and from
//! [`StateRepresentation`], the plain record stored externally:
//!
//! ```text
//! { "current_risk_score": 0.75,
//!   "last_unfavorable_timestamp": "2024-01-01T12:00:00+00:00" | null,
//!   "last_update_ts": "2024-01-01T13:00:00+00:00" | null }
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StateEncoding;
use crate::error::ReprError;

/// Accumulated mold risk for one sensor/room.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "StateRepresentation", try_from = "StateRepresentation")]
pub struct MoldRiskState {
    /// Running GoRP sum.  `>= 0` under non-decreasing timestamps.
    pub current_risk_score: f64,
    /// Start of the current unbroken unfavorable run; `None` while favorable.
    pub last_unfavorable_timestamp: Option<DateTime<Utc>>,
    /// Timestamp of the last processed reading; `None` before the first.
    pub last_update_ts: Option<DateTime<Utc>>,
}

/// Where the state sits in its accumulate / pause cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskPhase {
    /// No reading processed yet.
    Uninitialized,
    /// Last reading was favorable; growth accrues on the next one.
    Accumulating,
    /// Inside an unfavorable streak; the score is held until it resets.
    Paused,
}

impl MoldRiskState {
    /// Fresh state: score `0`, no timestamps.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RiskPhase {
        match (self.last_update_ts, self.last_unfavorable_timestamp) {
            (None, _) => RiskPhase::Uninitialized,
            (Some(_), Some(_)) => RiskPhase::Paused,
            (Some(_), None) => RiskPhase::Accumulating,
        }
    }

    /// Convert to the external record.
    pub fn to_representation(&self) -> StateRepresentation {
        StateRepresentation {
            current_risk_score: self.current_risk_score,
            last_unfavorable_timestamp: self.last_unfavorable_timestamp.map(format_ts),
            last_update_ts: self.last_update_ts.map(format_ts),
        }
    }

    /// Rebuild from the external record.
    pub fn from_representation(repr: &StateRepresentation) -> Result<Self, ReprError> {
        if !repr.current_risk_score.is_finite() {
            return Err(ReprError::NonFiniteScore);
        }
        Ok(Self {
            current_risk_score: repr.current_risk_score,
            last_unfavorable_timestamp: parse_opt_ts(
                repr.last_unfavorable_timestamp.as_deref(),
                "last_unfavorable_timestamp",
            )?,
            last_update_ts: parse_opt_ts(repr.last_update_ts.as_deref(), "last_update_ts")?,
        })
    }

    /// Serialise the representation to bytes.
    pub fn encode(&self, encoding: StateEncoding) -> Result<Vec<u8>, ReprError> {
        let repr = self.to_representation();
        match encoding {
            StateEncoding::Json => serde_json::to_vec(&repr).map_err(|_| ReprError::Malformed),
            StateEncoding::Postcard => {
                postcard::to_allocvec(&repr).map_err(|_| ReprError::Malformed)
            }
        }
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn decode(encoding: StateEncoding, bytes: &[u8]) -> Result<Self, ReprError> {
        let repr: StateRepresentation = match encoding {
            StateEncoding::Json => {
                serde_json::from_slice(bytes).map_err(|_| ReprError::Malformed)?
            }
            StateEncoding::Postcard => {
                postcard::from_bytes(bytes).map_err(|_| ReprError::Malformed)?
            }
        };
        Self::from_representation(&repr)
    }
}

/// External storage record.  Missing fields default to `0.0` / `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRepresentation {
    pub current_risk_score: f64,
    pub last_unfavorable_timestamp: Option<String>,
    pub last_update_ts: Option<String>,
}

impl From<MoldRiskState> for StateRepresentation {
    fn from(state: MoldRiskState) -> Self {
        state.to_representation()
    }
}

impl TryFrom<StateRepresentation> for MoldRiskState {
    type Error = ReprError;

    fn try_from(repr: StateRepresentation) -> Result<Self, Self::Error> {
        Self::from_representation(&repr)
    }
}

// ── Timestamp codec ─────────────────────────────────────────────

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Extended ISO-8601 with a signed or 5+ digit year, as `format_ts` writes
/// for years outside `0000..=9999`.
const EXTENDED_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// RFC 3339 with any offset (normalised to UTC), its extended-year form,
/// or a naive ISO-8601 date-time taken as UTC.
fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, EXTENDED_TS_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    s.parse::<NaiveDateTime>().ok().map(|n| n.and_utc())
}

fn parse_opt_ts(
    s: Option<&str>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, ReprError> {
    match s {
        None => Ok(None),
        Some(s) => parse_ts(s)
            .map(Some)
            .ok_or(ReprError::InvalidTimestamp(field)),
    }
}
