//! Days-to-mold observation grid.
//!
//! A [`DtmTable`] is a read-only `(temperature, RH) -> days` grid.  Axes are
//! strictly ascending; cells may be empty (`None`), in which case the
//! interpolator substitutes [`MISSING_CORNER_DAYS`](super::MISSING_CORNER_DAYS).
//!
//! [`IPI_TABLE`] is the built-in grid derived from the IPI dew point
//! calculator data points.  Alternate grids of any size can be built with
//! [`DtmTable::new`] and handed to a [`RiskEngine`](crate::risk::RiskEngine).

use crate::error::TableError;

/// A fixed `T x R` days-to-mold grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DtmTable<const T: usize, const R: usize> {
    temperatures: [f64; T],
    humidities: [f64; R],
    days: [[Option<f64>; R]; T],
}

/// Shape of the built-in grid.
pub type IpiTable = DtmTable<7, 6>;

/// Built-in IPI grid: 5–35 °C in 5 °C steps, 70–95 %RH in 5 % steps.
///
/// Growth is fastest around 25 °C and slows again towards 35 °C.
pub const IPI_TABLE: IpiTable = DtmTable {
    temperatures: [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0],
    humidities: [70.0, 75.0, 80.0, 85.0, 90.0, 95.0],
    days: [
        // 70    75     80     85     90     95  %RH
        [Some(180.0), Some(120.0), Some(80.0), Some(50.0), Some(30.0), Some(20.0)], // 5 °C
        [Some(120.0), Some(80.0), Some(50.0), Some(30.0), Some(20.0), Some(12.0)], // 10 °C
        [Some(80.0), Some(50.0), Some(30.0), Some(20.0), Some(12.0), Some(7.0)],   // 15 °C
        [Some(50.0), Some(30.0), Some(20.0), Some(12.0), Some(7.0), Some(4.0)],    // 20 °C
        [Some(30.0), Some(20.0), Some(12.0), Some(7.0), Some(4.0), Some(2.0)],     // 25 °C
        [Some(40.0), Some(25.0), Some(15.0), Some(9.0), Some(5.0), Some(3.0)],     // 30 °C
        [Some(60.0), Some(40.0), Some(25.0), Some(15.0), Some(9.0), Some(5.0)],    // 35 °C
    ],
};

impl<const T: usize, const R: usize> DtmTable<T, R> {
    /// Build a validated grid.
    ///
    /// Both axes must be non-empty, finite and strictly ascending.  Present
    /// cells must be finite and `> 0`.
    pub fn new(
        temperatures: [f64; T],
        humidities: [f64; R],
        days: [[Option<f64>; R]; T],
    ) -> Result<Self, TableError> {
        validate_axis(&temperatures)?;
        validate_axis(&humidities)?;
        for (ti, row) in days.iter().enumerate() {
            for (ri, cell) in row.iter().enumerate() {
                if let Some(d) = cell {
                    if !d.is_finite() || *d <= 0.0 {
                        return Err(TableError::InvalidCell {
                            temp_idx: ti,
                            rh_idx: ri,
                        });
                    }
                }
            }
        }
        Ok(Self {
            temperatures,
            humidities,
            days,
        })
    }

    pub fn temperatures(&self) -> &[f64; T] {
        &self.temperatures
    }

    pub fn humidities(&self) -> &[f64; R] {
        &self.humidities
    }

    /// Exact cell lookup.  `None` if either coordinate is not a grid point
    /// or the cell is empty.
    pub fn get(&self, temp_c: f64, rh: f64) -> Option<f64> {
        let ti = self.temperatures.iter().position(|&t| t == temp_c)?;
        let ri = self.humidities.iter().position(|&r| r == rh)?;
        self.days[ti][ri]
    }

    /// Grid coverage on the temperature axis, `(first, last)`.
    pub fn temperature_span(&self) -> (f64, f64) {
        (self.temperatures[0], self.temperatures[T - 1])
    }

    /// Grid coverage on the humidity axis, `(first, last)`.
    pub fn humidity_span(&self) -> (f64, f64) {
        (self.humidities[0], self.humidities[R - 1])
    }
}

impl Default for IpiTable {
    fn default() -> Self {
        IPI_TABLE
    }
}

fn validate_axis(axis: &[f64]) -> Result<(), TableError> {
    if axis.is_empty() {
        return Err(TableError::EmptyAxis);
    }
    if axis.iter().any(|v| !v.is_finite()) || axis.windows(2).any(|w| w[0] >= w[1]) {
        return Err(TableError::UnsortedAxis);
    }
    Ok(())
}
