//! Integration tests: MoldRiskService → RiskEngine → storage / events.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use moldrisk::adapters::log_sink::LogEventSink;
use moldrisk::adapters::memory_store::MemoryStore;
use moldrisk::app::commands::RiskCommand;
use moldrisk::app::events::RiskEvent;
use moldrisk::app::key::RoomKey;
use moldrisk::app::ports::{ConfigPort, StoragePort};
use moldrisk::app::service::{MoldRiskService, STATE_NAMESPACE};
use moldrisk::config::{RiskConfig, StateEncoding};
use moldrisk::reading::EnvironmentalReading;
use moldrisk::risk::{MoldRiskState, RiskLevel};
use moldrisk::{Error, StorageError};

use crate::mock_store::{FlakyStore, RecordingSink};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn key(name: &str) -> RoomKey {
    RoomKey::new(name).unwrap()
}

fn reading(temp: f64, rh: f64, minutes: i64) -> EnvironmentalReading {
    EnvironmentalReading::new(temp, rh, t0() + TimeDelta::minutes(minutes))
}

fn service() -> MoldRiskService {
    MoldRiskService::new(RiskConfig::default()).unwrap()
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn end_to_end_through_service() {
    let mut svc = service();
    let mut store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let k = key("basement");

    let a = svc
        .process_reading(&k, &reading(25.0, 90.0, 0), &mut store, &mut sink)
        .unwrap();
    assert_eq!(a.score, 0.0);
    assert_eq!(a.level, RiskLevel::None);

    let a = svc
        .process_reading(&k, &reading(25.0, 90.0, 30), &mut store, &mut sink)
        .unwrap();
    assert!((a.score - 0.25 * 0.5 / 24.0).abs() < 1e-12);
    assert_eq!(a.level, RiskLevel::Low);
    assert_eq!(a.recommendations, RiskLevel::Low.recommendations());

    let persisted = svc.load_state(&k, &store).unwrap();
    assert_eq!(persisted.current_risk_score, a.score);
    assert_eq!(svc.processed_count(), 2);

    assert_eq!(
        sink.count(|e| matches!(e, RiskEvent::LevelChanged { from: RiskLevel::None, to: RiskLevel::Low, .. })),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, RiskEvent::Assessed { .. })), 2);
}

#[test]
fn rooms_are_tracked_independently() {
    let mut svc = service();
    let mut store = MemoryStore::new();
    let mut sink = RecordingSink::new();

    for m in [0, 30, 60] {
        svc.process_reading(&key("wet"), &reading(25.0, 95.0, m), &mut store, &mut sink)
            .unwrap();
        svc.process_reading(&key("dry"), &reading(25.0, 40.0, m), &mut store, &mut sink)
            .unwrap();
    }

    assert!(svc.load_state(&key("wet"), &store).unwrap().current_risk_score > 0.0);
    assert_eq!(svc.load_state(&key("dry"), &store).unwrap().current_risk_score, 0.0);
    assert_eq!(store.len(), 2);
}

// ── Streaks and resets ────────────────────────────────────────

#[test]
fn reset_event_emitted_once_after_window() {
    let mut svc = service();
    let mut store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let k = key("kitchen");

    svc.save_state(
        &k,
        &MoldRiskState {
            current_risk_score: 0.9,
            last_unfavorable_timestamp: None,
            last_update_ts: Some(t0()),
        },
        &mut store,
    )
    .unwrap();

    // Unfavorable every 30 minutes for 25 hours.
    for i in 1..=50 {
        svc.process_reading(&k, &reading(20.0, 50.0, 30 * i), &mut store, &mut sink)
            .unwrap();
    }

    assert_eq!(
        sink.count(|e| matches!(e, RiskEvent::UnfavorableStreakStarted { .. })),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, RiskEvent::ScoreReset { .. })), 1);
    assert_eq!(svc.load_state(&k, &store).unwrap().current_risk_score, 0.0);
}

#[test]
fn shorter_reset_window_from_config() {
    let cfg = RiskConfig {
        reset_after_hours: 2,
        ..RiskConfig::default()
    };
    let mut svc = MoldRiskService::new(cfg).unwrap();
    let mut store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let k = key("garage");

    svc.save_state(
        &k,
        &MoldRiskState {
            current_risk_score: 0.4,
            last_unfavorable_timestamp: None,
            last_update_ts: Some(t0()),
        },
        &mut store,
    )
    .unwrap();

    let a = svc
        .process_reading(&k, &reading(20.0, 50.0, 30), &mut store, &mut sink)
        .unwrap();
    assert_eq!(a.score, 0.4);
    assert!(!a.favorable);
    let a = svc
        .process_reading(&k, &reading(20.0, 50.0, 150), &mut store, &mut sink)
        .unwrap();
    assert_eq!(a.score, 0.0);
}

// ── Timing diagnostics ────────────────────────────────────────

#[test]
fn gap_and_out_of_order_are_reported_not_rejected() {
    let mut svc = service();
    let mut store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let k = key("attic");

    svc.process_reading(&k, &reading(25.0, 90.0, 0), &mut store, &mut sink)
        .unwrap();
    svc.process_reading(&k, &reading(25.0, 90.0, 180), &mut store, &mut sink)
        .unwrap();
    assert_eq!(sink.count(|e| matches!(e, RiskEvent::ReadingGap { .. })), 1);

    let before = svc.load_state(&k, &store).unwrap().current_risk_score;
    let a = svc
        .process_reading(&k, &reading(25.0, 90.0, 150), &mut store, &mut sink)
        .unwrap();
    assert_eq!(sink.count(|e| matches!(e, RiskEvent::ReadingOutOfOrder { .. })), 1);
    // Applied as-is: negative elapsed time lowers the score.
    assert!(a.score < before);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn commands_dispatch() {
    let mut svc = service();
    let mut store = MemoryStore::new();
    let mut sink = LogEventSink::new();
    let k = key("bath");

    let out = svc
        .handle_command(
            RiskCommand::ProcessReading {
                key: k.clone(),
                reading: reading(25.0, 90.0, 0),
            },
            &mut store,
            &mut sink,
        )
        .unwrap();
    assert!(out.is_some());
    assert!(store.exists(STATE_NAMESPACE, k.as_str()));

    let out = svc
        .handle_command(RiskCommand::ResetState(k.clone()), &mut store, &mut sink)
        .unwrap();
    assert!(out.is_none());
    assert!(!store.exists(STATE_NAMESPACE, k.as_str()));

    let bad = RiskConfig {
        reading_interval_minutes: -1.0,
        ..RiskConfig::default()
    };
    assert!(matches!(
        svc.handle_command(RiskCommand::UpdateConfig(bad), &mut store, &mut sink),
        Err(Error::Config(_))
    ));
    assert_eq!(svc.config(), &RiskConfig::default());
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn config_port_round_trip() {
    let store = MemoryStore::new();
    let svc = MoldRiskService::from_config_port(&store).unwrap();
    assert_eq!(svc.config(), &RiskConfig::default());

    let cfg = RiskConfig {
        reset_after_hours: 48,
        reading_interval_minutes: 15.0,
        state_encoding: StateEncoding::Postcard,
    };
    store.save(&cfg).unwrap();
    let svc = MoldRiskService::from_config_port(&store).unwrap();
    assert_eq!(svc.config(), &cfg);
    assert_eq!(store.load().unwrap(), cfg);
}

#[test]
fn write_failure_propagates_and_keeps_previous_record() {
    let mut svc = service();
    let mut store = FlakyStore::new();
    let mut sink = RecordingSink::new();
    let k = key("cellar");

    svc.process_reading(&k, &reading(25.0, 90.0, 0), &mut store, &mut sink)
        .unwrap();
    store.fail_writes = true;
    let err = svc
        .process_reading(&k, &reading(25.0, 90.0, 30), &mut store, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Storage(StorageError::IoError));
    assert_eq!(store.writes, 1);
    assert_eq!(svc.processed_count(), 1);
    assert_eq!(
        svc.load_state(&k, &store).unwrap().last_update_ts,
        Some(t0())
    );
}

#[test]
fn corrupt_record_is_an_error() {
    let svc = service();
    let mut store = MemoryStore::new();
    let k = key("loft");
    store
        .write(STATE_NAMESPACE, k.as_str(), b"{\"current_risk_score\":")
        .unwrap();
    assert!(matches!(svc.load_state(&k, &store), Err(Error::Representation(_))));
}
