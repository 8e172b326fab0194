//! Fuzz target: `MoldRiskState::decode`
//!
//! Feeds arbitrary bytes to both record decoders.  Whatever decodes must
//! have a finite score and must survive a re-encode / decode cycle.
//!
//! cargo fuzz run fuzz_state_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use moldrisk::config::StateEncoding;
use moldrisk::risk::MoldRiskState;

fuzz_target!(|data: &[u8]| {
    for enc in [StateEncoding::Json, StateEncoding::Postcard] {
        if let Ok(state) = MoldRiskState::decode(enc, data) {
            assert!(state.current_risk_score.is_finite(), "decoded non-finite score");
            let bytes = state.encode(enc).expect("decoded state must re-encode");
            let again = MoldRiskState::decode(enc, &bytes).expect("re-encoded state must decode");
            assert_eq!(again, state);
        }
    }
});
