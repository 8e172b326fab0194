//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured risk events through the
//! `log` facade.  A dashboard or alerting adapter would implement the same
//! trait.

use log::{info, warn};

use crate::app::events::RiskEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`RiskEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RiskEvent) {
        match event {
            RiskEvent::Assessed { key, assessment: a } => {
                info!(
                    "ASSESS | room={} | score={:.6} level={} | dtm={} | {} | ts={}",
                    key,
                    a.score,
                    a.level,
                    a.dtm.map_or_else(|| "-".to_string(), |d| format!("{d:.1}d")),
                    if a.favorable { "FAVORABLE" } else { "UNFAVORABLE" },
                    a.timestamp,
                );
            }
            RiskEvent::StateInitialized { key, at } => {
                info!("INIT | room={} | first reading at {}", key, at);
            }
            RiskEvent::LevelChanged { key, from, to } => {
                info!("LEVEL | room={} | {} -> {}", key, from, to);
            }
            RiskEvent::UnfavorableStreakStarted { key, at } => {
                info!("STREAK | room={} | unfavorable since {}", key, at);
            }
            RiskEvent::ScoreReset {
                key,
                previous_score,
                streak_start,
            } => {
                info!(
                    "RESET | room={} | score {:.4} -> 0 | streak since {}",
                    key, previous_score, streak_start
                );
            }
            RiskEvent::ReadingOutOfOrder {
                key,
                last_update,
                reading,
            } => {
                warn!(
                    "ORDER | room={} | reading {} precedes last update {}",
                    key, reading, last_update
                );
            }
            RiskEvent::ReadingGap {
                key,
                expected_minutes,
                observed_minutes,
            } => {
                warn!(
                    "GAP | room={} | {:.1} min since last reading (nominal {:.1})",
                    key, observed_minutes, expected_minutes
                );
            }
            RiskEvent::StateCleared { key } => {
                info!("CLEAR | room={}", key);
            }
        }
    }
}
