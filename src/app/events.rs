//! Outbound application events.
//!
//! The [`MoldRiskService`](super::service::MoldRiskService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use chrono::{DateTime, Utc};

use super::key::RoomKey;
use crate::risk::RiskLevel;

/// Result of processing one reading, as reported downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub score: f64,
    pub level: RiskLevel,
    pub recommendations: &'static [&'static str],
    /// DTM estimate for the reading; `None` outside the viability envelope.
    pub dtm: Option<f64>,
    pub favorable: bool,
    pub timestamp: DateTime<Utc>,
}

/// Structured events emitted by the service.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskEvent {
    /// First reading ever seen for a room.
    StateInitialized { key: RoomKey, at: DateTime<Utc> },

    /// A reading was processed.
    Assessed {
        key: RoomKey,
        assessment: RiskAssessment,
    },

    /// The risk level moved between buckets.
    LevelChanged {
        key: RoomKey,
        from: RiskLevel,
        to: RiskLevel,
    },

    /// The first unfavorable reading after a favorable run.
    UnfavorableStreakStarted { key: RoomKey, at: DateTime<Utc> },

    /// The reset rule fired.
    ScoreReset {
        key: RoomKey,
        previous_score: f64,
        streak_start: DateTime<Utc>,
    },

    /// A reading arrived with a timestamp earlier than the last one
    /// processed.  It is still applied.
    ReadingOutOfOrder {
        key: RoomKey,
        last_update: DateTime<Utc>,
        reading: DateTime<Utc>,
    },

    /// Time since the previous reading is well above the nominal cadence.
    ReadingGap {
        key: RoomKey,
        expected_minutes: f64,
        observed_minutes: f64,
    },

    /// Persisted state for a room was deleted.
    StateCleared { key: RoomKey },
}
