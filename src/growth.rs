//! Growth-rate arithmetic.
//!
//! ```text
//! MGR  = 1 / DTM                      (fraction of full growth per day)
//! GoRP = MGR * (elapsed_hours / 24)   (growth over one reading period)
//! ```

/// Mold growth rate per day.  Non-positive DTM yields `0.0`.
pub fn calculate_mgr(dtm: f64) -> f64 {
    if dtm <= 0.0 {
        return 0.0;
    }
    1.0 / dtm
}

/// Growth accrued over `duration_hours` at rate `mgr`.
pub fn calculate_gorp(mgr: f64, duration_hours: f64) -> f64 {
    mgr * (duration_hours / 24.0)
}
