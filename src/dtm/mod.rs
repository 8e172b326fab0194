//! Days-to-mold (DTM) lookup.
//!
//! Maps `(temperature, relative humidity)` to the expected number of days
//! of sustained exposure before mold germinates, following the IPI dew
//! point calculator methodology.
//!
//! ```text
//!   viability envelope      grid coverage (IPI_TABLE)
//!   2 °C ..= 45 °C          5 °C ..= 35 °C
//!   RH >= 65 %              70 % ..= 95 %
//! ```
//!
//! The envelope is wider than the grid.  Points inside the envelope but
//! outside the grid are clamped onto the nearest grid edge, not rejected.

pub mod interpolate;
pub mod table;

pub use interpolate::{Corners, bilinear};
pub use table::{DtmTable, IPI_TABLE, IpiTable};

/// Lowest temperature (°C) at which mold can grow.
pub const VIABLE_TEMP_MIN_C: f64 = 2.0;
/// Highest temperature (°C) at which mold can grow.
pub const VIABLE_TEMP_MAX_C: f64 = 45.0;
/// Lowest relative humidity (%) at which mold can grow.
pub const VIABLE_RH_MIN_PCT: f64 = 65.0;

/// Days substituted for an empty grid cell ("very slow growth").
pub const MISSING_CORNER_DAYS: f64 = 180.0;
/// Interpolated estimates never drop below one day.
pub const MIN_DTM_DAYS: f64 = 1.0;

/// True iff `2 <= temp_c <= 45` and `rh >= 65`.
pub fn is_favorable_for_mold(temp_c: f64, rh: f64) -> bool {
    (VIABLE_TEMP_MIN_C..=VIABLE_TEMP_MAX_C).contains(&temp_c) && rh >= VIABLE_RH_MIN_PCT
}

/// Days to mold at `(temp_c, rh)` using the built-in [`IPI_TABLE`].
pub fn get_dtm(temp_c: f64, rh: f64) -> Option<f64> {
    IPI_TABLE.interpolate(temp_c, rh)
}

/// Anything that can estimate days-to-mold for a reading.
///
/// Implemented by every [`DtmTable`]; the risk engine is generic over it so
/// tests can substitute their own grids.
pub trait DtmLookup {
    fn dtm(&self, temp_c: f64, rh: f64) -> Option<f64>;
}

impl<const T: usize, const R: usize> DtmLookup for DtmTable<T, R> {
    fn dtm(&self, temp_c: f64, rh: f64) -> Option<f64> {
        self.interpolate(temp_c, rh)
    }
}

impl<L: DtmLookup + ?Sized> DtmLookup for &L {
    fn dtm(&self, temp_c: f64, rh: f64) -> Option<f64> {
        (**self).dtm(temp_c, rh)
    }
}
