//! Bilinear interpolation over a [`DtmTable`].

use super::table::DtmTable;
use super::{MIN_DTM_DAYS, MISSING_CORNER_DAYS, is_favorable_for_mold};

/// The four corner values around an interpolation point.
///
/// `q11 = (t1, r1)`, `q12 = (t1, r2)`, `q21 = (t2, r1)`, `q22 = (t2, r2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub t1: f64,
    pub t2: f64,
    pub r1: f64,
    pub r2: f64,
    pub q11: f64,
    pub q12: f64,
    pub q21: f64,
    pub q22: f64,
}

impl Corners {
    pub fn min(&self) -> f64 {
        self.q11.min(self.q12).min(self.q21).min(self.q22)
    }

    pub fn max(&self) -> f64 {
        self.q11.max(self.q12).max(self.q21).max(self.q22)
    }
}

/// Standard bilinear blend of the four corners at `(x, y)`.
///
/// On a degenerate cell (`t1 == t2` or `r1 == r2`) the formula would divide
/// by zero; `q11` is returned instead.
pub fn bilinear(x: f64, y: f64, c: &Corners) -> f64 {
    if c.t2 == c.t1 || c.r2 == c.r1 {
        return c.q11;
    }
    (c.q11 * (c.t2 - x) * (c.r2 - y)
        + c.q21 * (x - c.t1) * (c.r2 - y)
        + c.q12 * (c.t2 - x) * (y - c.r1)
        + c.q22 * (x - c.t1) * (y - c.r1))
        / ((c.t2 - c.t1) * (c.r2 - c.r1))
}

impl<const T: usize, const R: usize> DtmTable<T, R> {
    /// Clamp `(temp_c, rh)` into the grid's coverage.
    pub fn clamp_to_grid(&self, temp_c: f64, rh: f64) -> (f64, f64) {
        let (t_lo, t_hi) = self.temperature_span();
        let (r_lo, r_hi) = self.humidity_span();
        (temp_c.clamp(t_lo, t_hi), rh.clamp(r_lo, r_hi))
    }

    /// Bounding grid cell for an already-clamped point.
    ///
    /// Falls back to the nearest edge when the point lies outside an axis.
    /// Empty cells read as [`MISSING_CORNER_DAYS`].
    pub fn corners(&self, temp_c: f64, rh: f64) -> Corners {
        let (t1, t2) = bracket(self.temperatures(), temp_c);
        let (r1, r2) = bracket(self.humidities(), rh);
        let q = |t, r| self.get(t, r).unwrap_or(MISSING_CORNER_DAYS);
        Corners {
            t1,
            t2,
            r1,
            r2,
            q11: q(t1, r1),
            q12: q(t1, r2),
            q21: q(t2, r1),
            q22: q(t2, r2),
        }
    }

    /// Estimated days to mold at `(temp_c, rh)`.
    ///
    /// `None` outside the viability envelope.  Inside it the point is
    /// clamped into grid coverage, so envelope-but-not-grid conditions
    /// (e.g. 3 °C or 67 %RH) interpolate against the nearest edge.
    /// Exact grid points return the cell unchanged; interpolated values are
    /// floored at [`MIN_DTM_DAYS`].
    pub fn interpolate(&self, temp_c: f64, rh: f64) -> Option<f64> {
        if !is_favorable_for_mold(temp_c, rh) {
            return None;
        }

        let (t, r) = self.clamp_to_grid(temp_c, rh);

        if let Some(days) = self.get(t, r) {
            return Some(days);
        }

        let corners = self.corners(t, r);
        Some(bilinear(t, r, &corners).max(MIN_DTM_DAYS))
    }
}

/// `(largest point <= v, smallest point >= v)`, defaulting to the first and
/// last point respectively.
fn bracket(axis: &[f64], v: f64) -> (f64, f64) {
    let first = axis[0];
    let last = axis[axis.len() - 1];
    let lo = axis.iter().rev().copied().find(|&p| p <= v).unwrap_or(first);
    let hi = axis.iter().copied().find(|&p| p >= v).unwrap_or(last);
    (lo, hi)
}
