//! Fuzz target: `get_dtm` / `RiskEngine::step`
//!
//! Interprets the input as a sequence of (temp, rh, seconds) triples and
//! drives them through the DTM lookup and the accumulator.  Nothing may
//! panic, every estimate is at least one day, and with non-decreasing
//! timestamps the score never goes negative.
//!
//! cargo fuzz run fuzz_dtm_lookup

#![no_main]

use chrono::{TimeDelta, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use moldrisk::dtm::get_dtm;
use moldrisk::reading::EnvironmentalReading;
use moldrisk::risk::{MoldRiskState, RiskEngine};

fuzz_target!(|data: &[u8]| {
    let engine = RiskEngine::new();
    let mut state = MoldRiskState::new();
    let mut t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for chunk in data.chunks_exact(18) {
        let temp = f64::from_le_bytes(chunk[0..8].try_into().unwrap());
        let rh = f64::from_le_bytes(chunk[8..16].try_into().unwrap());
        let dt = u16::from_le_bytes([chunk[16], chunk[17]]);

        if let Some(dtm) = get_dtm(temp, rh) {
            assert!(dtm >= 1.0 && dtm.is_finite(), "bad estimate {dtm} at ({temp}, {rh})");
        }

        t += TimeDelta::seconds(i64::from(dt));
        let (next, score) = engine.update(&state, &EnvironmentalReading::new(temp, rh, t));
        assert!(score >= 0.0, "negative score {score}");
        state = next;
    }
});
