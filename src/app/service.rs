//! Application service: the thin orchestration layer around the core.
//!
//! [`MoldRiskService`] loads a room's persisted state, runs one accumulator
//! step, persists the result and reports it.  All I/O flows through port
//! traits injected at call sites.
//!
//! ```text
//!  StoragePort ◀─▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │    MoldRiskService     │
//!  reading ──────▶ │  RiskEngine · classify │ ──▶ RiskAssessment
//!                  └────────────────────────┘
//! ```
//!
//! The service does not serialise access: callers must not process two
//! readings for the same [`RoomKey`] concurrently.

use log::{debug, info, warn};

use super::commands::RiskCommand;
use super::events::{RiskAssessment, RiskEvent};
use super::key::RoomKey;
use super::ports::{ConfigPort, EventSink, StoragePort};
use crate::config::{RiskConfig, StateEncoding};
use crate::dtm::{DtmLookup, IpiTable, IPI_TABLE};
use crate::error::{ConfigError, ReprError, Result, StorageError};
use crate::reading::EnvironmentalReading;
use crate::risk::{MoldRiskState, RiskEngine, RiskLevel, Step, Transition, hours_between};

/// Storage namespace for persisted state records.
pub const STATE_NAMESPACE: &str = "moldrisk";

/// Upper bound on an encoded state record.
pub const STATE_BLOB_MAX: usize = 256;

/// A gap larger than this multiple of the nominal cadence is reported.
const GAP_FACTOR: f64 = 2.0;

// ───────────────────────────────────────────────────────────────
// MoldRiskService
// ───────────────────────────────────────────────────────────────

pub struct MoldRiskService<L: DtmLookup = IpiTable> {
    engine: RiskEngine<L>,
    config: RiskConfig,
    processed: u64,
}

impl MoldRiskService<IpiTable> {
    /// Service over the built-in IPI table.
    pub fn new(config: RiskConfig) -> Result<Self> {
        Self::with_table(IPI_TABLE, config)
    }

    /// Load configuration through `port`, falling back to defaults when
    /// nothing is stored yet.
    pub fn from_config_port(port: &impl ConfigPort) -> Result<Self> {
        let config = match port.load() {
            Ok(c) => c,
            Err(ConfigError::NotFound) => {
                info!("No stored risk config, using defaults");
                RiskConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        Self::new(config)
    }
}

impl<L: DtmLookup> MoldRiskService<L> {
    /// Service over a caller-supplied DTM table.
    pub fn with_table(table: L, config: RiskConfig) -> Result<Self> {
        config.validate()?;
        let engine = RiskEngine::with_table(table).reset_after(config.reset_window());
        Ok(Self {
            engine,
            config,
            processed: 0,
        })
    }

    // ── Per-reading orchestration ─────────────────────────────

    /// Load → step → persist → report, for one reading.
    pub fn process_reading(
        &mut self,
        key: &RoomKey,
        reading: &EnvironmentalReading,
        store: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) -> Result<RiskAssessment> {
        let previous = self.load_state(key, store)?;
        self.check_timing(key, &previous, reading, sink);

        let step = self.engine.step(&previous, reading);
        self.save_state(key, &step.state, store)?;
        self.processed += 1;

        let assessment = assess(&step, reading);
        self.report(key, &previous, &step, &assessment, sink);
        Ok(assessment)
    }

    /// Dispatch an external command.
    pub fn handle_command(
        &mut self,
        cmd: RiskCommand,
        store: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) -> Result<Option<RiskAssessment>> {
        match cmd {
            RiskCommand::ProcessReading { key, reading } => self
                .process_reading(&key, &reading, store, sink)
                .map(Some),
            RiskCommand::ResetState(key) => {
                self.reset_state(&key, store, sink)?;
                Ok(None)
            }
            RiskCommand::UpdateConfig(config) => {
                self.update_config(config)?;
                Ok(None)
            }
        }
    }

    // ── State persistence ─────────────────────────────────────

    /// Load a room's state; a room never seen before gets a fresh state.
    pub fn load_state(&self, key: &RoomKey, store: &impl StoragePort) -> Result<MoldRiskState> {
        let mut buf = [0u8; STATE_BLOB_MAX];
        match store.read(STATE_NAMESPACE, key.as_str(), &mut buf) {
            Ok(n) => Ok(self.decode(&buf[..n])?),
            Err(StorageError::NotFound) => Ok(MoldRiskState::new()),
            Err(e) => {
                warn!("State load failed for {key}: {e}");
                Err(e.into())
            }
        }
    }

    /// Persist a room's state in the configured encoding.
    pub fn save_state(
        &self,
        key: &RoomKey,
        state: &MoldRiskState,
        store: &mut impl StoragePort,
    ) -> Result<()> {
        let bytes = state.encode(self.config.state_encoding)?;
        if bytes.len() > STATE_BLOB_MAX {
            return Err(StorageError::Full.into());
        }
        store
            .write(STATE_NAMESPACE, key.as_str(), &bytes)
            .inspect_err(|e| warn!("State save failed for {key}: {e}"))?;
        Ok(())
    }

    /// Delete a room's persisted state.
    pub fn reset_state(
        &mut self,
        key: &RoomKey,
        store: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        store.delete(STATE_NAMESPACE, key.as_str())?;
        info!("State cleared for {key}");
        sink.emit(&RiskEvent::StateCleared { key: key.clone() });
        Ok(())
    }

    // ── Configuration ─────────────────────────────────────────

    /// Validate and apply a new configuration.
    pub fn update_config(&mut self, config: RiskConfig) -> Result<()> {
        config.validate()?;
        self.engine.set_reset_window(config.reset_window());
        self.config = config;
        info!("Risk configuration updated at runtime");
        Ok(())
    }

    /// Persist the live configuration.
    pub fn save_config(&self, port: &impl ConfigPort) -> Result<()> {
        port.save(&self.config)?;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn engine(&self) -> &RiskEngine<L> {
        &self.engine
    }

    /// Readings processed since construction.
    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    // ── Internal ──────────────────────────────────────────────

    /// Decode with the configured encoding, falling back to the other one
    /// so records written before an encoding change stay readable.
    fn decode(&self, bytes: &[u8]) -> core::result::Result<MoldRiskState, ReprError> {
        let primary = self.config.state_encoding;
        let secondary = match primary {
            StateEncoding::Json => StateEncoding::Postcard,
            StateEncoding::Postcard => StateEncoding::Json,
        };
        MoldRiskState::decode(primary, bytes).or_else(|e| {
            debug!("State record not {:?}, retrying as {:?}", primary, secondary);
            MoldRiskState::decode(secondary, bytes).map_err(|_| e)
        })
    }

    /// Report out-of-order readings and reporting gaps.  Neither changes
    /// how the reading is applied.
    fn check_timing(
        &self,
        key: &RoomKey,
        previous: &MoldRiskState,
        reading: &EnvironmentalReading,
        sink: &mut impl EventSink,
    ) {
        let Some(last_update) = previous.last_update_ts else {
            return;
        };

        if reading.timestamp < last_update {
            warn!(
                "Out-of-order reading for {key}: {} is before last update {}",
                reading.timestamp, last_update
            );
            sink.emit(&RiskEvent::ReadingOutOfOrder {
                key: key.clone(),
                last_update,
                reading: reading.timestamp,
            });
            return;
        }

        let expected = self.config.reading_interval_minutes;
        let observed = hours_between(last_update, reading.timestamp) * 60.0;
        if observed > expected * GAP_FACTOR {
            warn!("Reading gap for {key}: {observed:.1} min (nominal {expected:.1} min)");
            sink.emit(&RiskEvent::ReadingGap {
                key: key.clone(),
                expected_minutes: expected,
                observed_minutes: observed,
            });
        }
    }

    fn report(
        &self,
        key: &RoomKey,
        previous: &MoldRiskState,
        step: &Step,
        assessment: &RiskAssessment,
        sink: &mut impl EventSink,
    ) {
        if step.initialized {
            info!("State initialised for {key} at {}", assessment.timestamp);
            sink.emit(&RiskEvent::StateInitialized {
                key: key.clone(),
                at: assessment.timestamp,
            });
        }

        match step.transition {
            Transition::Paused { streak_start } if previous.last_unfavorable_timestamp.is_none() => {
                debug!("Unfavorable streak started for {key} at {streak_start}");
                sink.emit(&RiskEvent::UnfavorableStreakStarted {
                    key: key.clone(),
                    at: streak_start,
                });
            }
            Transition::Reset {
                streak_start,
                previous_score,
            } if previous_score != 0.0 => {
                info!(
                    "Risk reset for {key}: {previous_score:.4} -> 0 after streak from {streak_start}"
                );
                sink.emit(&RiskEvent::ScoreReset {
                    key: key.clone(),
                    previous_score,
                    streak_start,
                });
            }
            _ => {}
        }

        let from = RiskLevel::from_score(previous.current_risk_score);
        if from != assessment.level {
            info!("Risk level for {key}: {from} -> {}", assessment.level);
            sink.emit(&RiskEvent::LevelChanged {
                key: key.clone(),
                from,
                to: assessment.level,
            });
        }

        sink.emit(&RiskEvent::Assessed {
            key: key.clone(),
            assessment: assessment.clone(),
        });
    }
}

fn assess(step: &Step, reading: &EnvironmentalReading) -> RiskAssessment {
    let level = RiskLevel::from_score(step.score);
    let (favorable, dtm) = match step.transition {
        Transition::Accumulated { dtm, .. } => (true, Some(dtm)),
        Transition::Held => (true, None),
        Transition::Paused { .. } | Transition::Reset { .. } => (false, None),
    };
    RiskAssessment {
        score: step.score,
        level,
        recommendations: level.recommendations(),
        dtm,
        favorable,
        timestamp: reading.timestamp,
    }
}
