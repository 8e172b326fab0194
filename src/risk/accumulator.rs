//! Risk accumulator: a pure transition function over [`MoldRiskState`].
//!
//! ```text
//!             favorable reading                 unfavorable reading
//!   ┌──────────────────────────────┐   ┌────────────────────────────────────┐
//!   │ score += MGR * elapsed_h/24  │   │ streak_start = previous or now     │
//!   │ streak cleared               │   │ now - streak_start >= window ?     │
//!   └──────────────────────────────┘   │     score = 0   : score held       │
//!                                      └────────────────────────────────────┘
//! ```
//!
//! Elapsed time always comes from the timestamp delta.  Timestamps for one
//! state must be non-decreasing; an earlier timestamp is not detected here
//! and yields negative growth or a shortened streak.

use chrono::{DateTime, TimeDelta, Utc};

use super::state::MoldRiskState;
use crate::config::RiskConfig;
use crate::dtm::{DtmLookup, IpiTable, IPI_TABLE, is_favorable_for_mold};
use crate::growth::{calculate_gorp, calculate_mgr};
use crate::reading::EnvironmentalReading;

/// Unbroken unfavorable hours after which the score resets.
pub const DEFAULT_RESET_HOURS: i64 = 24;

/// What a single reading did to the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Favorable conditions; growth was added.
    Accumulated { dtm: f64, mgr: f64, gorp: f64 },
    /// Favorable but no DTM estimate was available; score unchanged.
    Held,
    /// Unfavorable, streak shorter than the reset window; score unchanged.
    Paused { streak_start: DateTime<Utc> },
    /// Unfavorable for the full reset window; score set to zero.
    Reset {
        streak_start: DateTime<Utc>,
        previous_score: f64,
    },
}

/// Full result of one accumulator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: MoldRiskState,
    pub score: f64,
    /// True if this was the first reading ever seen by the state.
    pub initialized: bool,
    pub transition: Transition,
}

/// Accumulator with an injectable DTM table and reset window.
#[derive(Debug, Clone)]
pub struct RiskEngine<L: DtmLookup = IpiTable> {
    table: L,
    reset_window: TimeDelta,
}

impl RiskEngine<IpiTable> {
    /// Built-in IPI table, 24 h reset window.
    pub fn new() -> Self {
        Self::with_table(IPI_TABLE)
    }

    /// Built-in IPI table with the reset window taken from `config`.
    pub fn from_config(config: &RiskConfig) -> Self {
        Self::with_table(IPI_TABLE).reset_after(config.reset_window())
    }
}

impl Default for RiskEngine<IpiTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: DtmLookup> RiskEngine<L> {
    pub fn with_table(table: L) -> Self {
        Self {
            table,
            reset_window: TimeDelta::hours(DEFAULT_RESET_HOURS),
        }
    }

    /// Override the reset window.
    #[must_use]
    pub fn reset_after(mut self, window: TimeDelta) -> Self {
        self.reset_window = window;
        self
    }

    pub fn set_reset_window(&mut self, window: TimeDelta) {
        self.reset_window = window;
    }

    pub fn reset_window(&self) -> TimeDelta {
        self.reset_window
    }

    pub fn table(&self) -> &L {
        &self.table
    }

    /// DTM estimate for a reading under this engine's table.
    pub fn dtm(&self, temp_c: f64, rh: f64) -> Option<f64> {
        self.table.dtm(temp_c, rh)
    }

    /// Apply one reading and report what happened.
    pub fn step(&self, state: &MoldRiskState, reading: &EnvironmentalReading) -> Step {
        let timestamp = reading.timestamp;
        let temp_c = reading.temperature_c;
        let rh = reading.relative_humidity_pct;

        // First reading: anchor the clock so no time elapses on this call.
        let initialized = state.last_update_ts.is_none();
        let last_update = state.last_update_ts.unwrap_or(timestamp);

        let (score, streak, transition) = if is_favorable_for_mold(temp_c, rh) {
            match self.table.dtm(temp_c, rh) {
                Some(dtm) => {
                    let mgr = calculate_mgr(dtm);
                    let gorp = calculate_gorp(mgr, hours_between(last_update, timestamp));
                    (
                        state.current_risk_score + gorp,
                        None,
                        Transition::Accumulated { dtm, mgr, gorp },
                    )
                }
                None => (state.current_risk_score, None, Transition::Held),
            }
        } else {
            let streak_start = state.last_unfavorable_timestamp.unwrap_or(timestamp);
            if timestamp - streak_start >= self.reset_window {
                (
                    0.0,
                    Some(streak_start),
                    Transition::Reset {
                        streak_start,
                        previous_score: state.current_risk_score,
                    },
                )
            } else {
                (
                    state.current_risk_score,
                    Some(streak_start),
                    Transition::Paused { streak_start },
                )
            }
        };

        let state = MoldRiskState {
            current_risk_score: score,
            last_unfavorable_timestamp: streak,
            last_update_ts: Some(timestamp),
        };
        Step {
            state,
            score,
            initialized,
            transition,
        }
    }

    /// Apply one reading; returns the new state and its score.
    pub fn update(
        &self,
        state: &MoldRiskState,
        reading: &EnvironmentalReading,
    ) -> (MoldRiskState, f64) {
        let step = self.step(state, reading);
        (step.state, step.score)
    }

    /// Fold a batch of readings (in timestamp order) into `state`.
    /// Returns the final state and the score after each reading.
    pub fn replay(
        &self,
        state: &MoldRiskState,
        readings: &[EnvironmentalReading],
    ) -> (MoldRiskState, Vec<f64>) {
        let mut current = *state;
        let scores = readings
            .iter()
            .map(|r| {
                let (next, score) = self.update(&current, r);
                current = next;
                score
            })
            .collect();
        (current, scores)
    }
}

/// Apply one reading with the built-in table and 24 h reset window.
///
/// Elapsed time comes from the timestamps; the nominal sensor cadence lives
/// in [`RiskConfig::reading_interval_minutes`] and only drives gap reporting.
pub fn update(
    state: &MoldRiskState,
    temp_c: f64,
    rh: f64,
    timestamp: DateTime<Utc>,
) -> (MoldRiskState, f64) {
    RiskEngine::new().update(state, &EnvironmentalReading::new(temp_c, rh, timestamp))
}

/// Signed hours from `from` to `to`, with sub-second precision.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_seconds() as f64 / 3600.0 + f64::from(delta.subsec_nanos()) / 3.6e12
}
