//! End-to-end accumulator scenarios through the public API.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use moldrisk::dtm::get_dtm;
use moldrisk::growth::{calculate_gorp, calculate_mgr};
use moldrisk::reading::EnvironmentalReading;
use moldrisk::risk::{MoldRiskState, RiskEngine, RiskPhase, get_risk_level, update};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

#[test]
fn first_reading_then_half_hour_of_growth() {
    let state = MoldRiskState::new();

    let (state, score) = update(&state, 25.0, 90.0, t0());
    assert_eq!(score, 0.0);
    assert_eq!(state.last_update_ts, Some(t0()));
    assert_eq!(state.phase(), RiskPhase::Accumulating);

    let (state, score) = update(&state, 25.0, 90.0, t0() + TimeDelta::minutes(30));
    let expected = 0.25 * (0.5 / 24.0);
    assert!((score - expected).abs() < 1e-12);
    assert!((score - 0.005208).abs() < 1e-6);
    assert_eq!(state.current_risk_score, score);
}

#[test]
fn consecutive_favorable_readings_increase_score() {
    let state = MoldRiskState {
        last_update_ts: Some(t0()),
        ..MoldRiskState::new()
    };
    let (state, s1) = update(&state, 25.0, 90.0, t0() + TimeDelta::minutes(30));
    let (_, s2) = update(&state, 25.0, 90.0, t0() + TimeDelta::minutes(60));
    assert!(s1 > 0.0);
    assert!(s2 > s1);
}

#[test]
fn unfavorable_reading_pauses_without_reset() {
    let state = MoldRiskState {
        current_risk_score: 0.8,
        last_unfavorable_timestamp: None,
        last_update_ts: Some(t0()),
    };
    let (state, score) = update(&state, 20.0, 50.0, t0() + TimeDelta::hours(1));
    assert_eq!(score, 0.8);
    assert_eq!(state.phase(), RiskPhase::Paused);
    assert_eq!(state.last_unfavorable_timestamp, Some(t0() + TimeDelta::hours(1)));
}

#[test]
fn reset_fires_only_after_full_window() {
    let t1 = t0();
    let state = MoldRiskState {
        current_risk_score: 0.6,
        last_unfavorable_timestamp: None,
        last_update_ts: Some(t1 - TimeDelta::minutes(30)),
    };
    let (state, _) = update(&state, 20.0, 50.0, t1);
    assert_eq!(state.last_unfavorable_timestamp, Some(t1));

    let (state, score) = update(&state, 20.0, 50.0, t1 + TimeDelta::hours(23));
    assert_eq!(score, 0.6);
    assert_eq!(state.last_unfavorable_timestamp, Some(t1));

    let (state, score) = update(
        &state,
        20.0,
        50.0,
        t1 + TimeDelta::hours(24) + TimeDelta::minutes(30),
    );
    assert_eq!(score, 0.0);
    assert_eq!(state.current_risk_score, 0.0);
}

#[test]
fn favorable_reading_breaks_streak() {
    let state = MoldRiskState {
        current_risk_score: 0.3,
        last_unfavorable_timestamp: Some(t0()),
        last_update_ts: Some(t0() + TimeDelta::hours(20)),
    };
    let (state, score) = update(&state, 25.0, 90.0, t0() + TimeDelta::hours(21));
    assert!(score > 0.3);
    assert_eq!(state.last_unfavorable_timestamp, None);

    // A new streak starts from scratch: 23 h later is still not a reset.
    let t = t0() + TimeDelta::hours(22);
    let (state, _) = update(&state, 20.0, 50.0, t);
    let (_, score) = update(&state, 20.0, 50.0, t + TimeDelta::hours(23));
    assert!(score > 0.3);
}

#[test]
fn replay_matches_manual_fold() {
    let engine = RiskEngine::new();
    let readings: Vec<_> = (0..48)
        .map(|i| {
            let rh = if i % 10 < 7 { 92.0 } else { 55.0 };
            EnvironmentalReading::new(22.0, rh, t0() + TimeDelta::minutes(30 * i))
        })
        .collect();

    let (end, scores) = engine.replay(&MoldRiskState::new(), &readings);

    let mut state = MoldRiskState::new();
    for (r, expected) in readings.iter().zip(&scores) {
        let (next, score) = engine.update(&state, r);
        assert_eq!(score, *expected);
        state = next;
    }
    assert_eq!(end, state);
    assert_eq!(scores.len(), readings.len());
}

#[test]
fn published_grid_and_growth_values() {
    assert_eq!(get_dtm(25.0, 90.0), Some(4.0));
    assert_eq!(get_dtm(20.0, 80.0), Some(20.0));
    assert_eq!(calculate_mgr(10.0), 0.1);
    assert_eq!(calculate_mgr(4.0), 0.25);
    assert_eq!(calculate_mgr(0.0), 0.0);
    assert!((calculate_gorp(0.1, 24.0) - 0.1).abs() < 1e-12);
    assert!((calculate_gorp(0.25, 12.0) - 0.125).abs() < 1e-12);
}

#[test]
fn classifier_buckets() {
    assert_eq!(get_risk_level(0.0).as_str(), "none");
    assert_eq!(get_risk_level(0.3).as_str(), "low");
    assert_eq!(get_risk_level(0.7).as_str(), "medium");
    assert_eq!(get_risk_level(1.0).as_str(), "high");
    assert_eq!(get_risk_level(1.5).as_str(), "active");
}
