//! Instantaneous mold factor (simplified VTT growth model).
//!
//! Unlike the accumulated risk score, the mold factor is a point estimate
//! on a 0–10 scale for a single reading and an assumed exposure time:
//!
//! ```text
//! factor = (RH - RH_crit(T)) * temp_factor(T) * time_factor(h) * sensitivity / 3.5
//! ```
//!
//! It is used for per-reading annotation and exports where no state history
//! is available.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Factor scale divisor: 95 %RH at 25 °C for 24 h maps to 5.0.
const FACTOR_SCALE: f64 = 3.5;
const FACTOR_MAX: f64 = 10.0;

/// Severity bands for the instantaneous mold factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoldFactorLevel {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl MoldFactorLevel {
    pub fn from_factor(factor: f64) -> Self {
        if factor < 0.5 {
            Self::None
        } else if factor < 2.0 {
            Self::Low
        } else if factor < 4.0 {
            Self::Moderate
        } else if factor < 7.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::None => "No mold risk. Conditions are well within safe limits.",
            Self::Low => "Low mold risk. Monitor humidity levels.",
            Self::Moderate => "Moderate mold risk. Action recommended within 24 hours.",
            Self::High => "High mold risk. Immediate action required.",
            Self::Critical => "Critical mold risk. Urgent intervention needed.",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Low => &["Consider brief ventilation if humidity remains elevated."],
            Self::Moderate => &[
                "Open windows to improve ventilation.",
                "Consider using a dehumidifier.",
                "Check for sources of moisture.",
            ],
            Self::High => &[
                "Ventilate the room immediately.",
                "Use dehumidifier or AC.",
                "Identify and address moisture sources.",
                "Monitor for visible mold growth.",
            ],
            Self::Critical => &[
                "Evacuate if possible and ventilate thoroughly.",
                "Use industrial dehumidification if available.",
                "Professional inspection may be warranted.",
                "Document conditions for maintenance team.",
            ],
        }
    }

    /// Dashboard colour (hex).
    pub fn color(self) -> &'static str {
        match self {
            Self::None => "#10b981",
            Self::Low => "#84cc16",
            Self::Moderate => "#f59e0b",
            Self::High => "#ef4444",
            Self::Critical => "#7c2d12",
        }
    }
}

impl fmt::Display for MoldFactorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mold factor with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoldFactorResult {
    pub mold_factor: f64,
    pub level: MoldFactorLevel,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

impl MoldFactorResult {
    fn from_factor(mold_factor: f64) -> Self {
        let level = MoldFactorLevel::from_factor(mold_factor);
        Self {
            mold_factor,
            level,
            description: level.description(),
            recommendations: level.recommendations(),
        }
    }

    fn insufficient_data() -> Self {
        Self {
            mold_factor: 0.0,
            level: MoldFactorLevel::None,
            description: "Insufficient data for mold risk calculation",
            recommendations: &[],
        }
    }
}

/// Critical relative humidity (%) above which mold can grow at `temp_c`.
///
/// 100 % at 0 °C, 90 % at 10 °C, 80 % at 20 °C, 75 % from 30 °C up.
pub fn calculate_critical_rh(temp_c: f64) -> f64 {
    if temp_c < 0.0 {
        100.0
    } else if temp_c <= 10.0 {
        100.0 - temp_c
    } else if temp_c <= 20.0 {
        90.0 - (temp_c - 10.0)
    } else if temp_c <= 30.0 {
        80.0 - (temp_c - 20.0) * 0.5
    } else {
        75.0
    }
}

/// Growth weight for temperature; 1.0 across the 15–30 °C optimum.
fn temperature_factor(temp_c: f64) -> f64 {
    if !(5.0..=40.0).contains(&temp_c) {
        0.1
    } else if temp_c < 15.0 {
        0.3 + (temp_c - 5.0) * 0.07
    } else if temp_c <= 30.0 {
        1.0
    } else {
        1.0 - (temp_c - 30.0) * 0.09
    }
}

/// Logarithmic exposure weight; 1.0 at 24 h.
fn time_factor(exposure_hours: f64) -> f64 {
    ((exposure_hours + 1.0).ln() / 25.0_f64.ln()).clamp(0.1, 2.0)
}

/// Instantaneous mold factor for one reading.
///
/// Missing or NaN inputs yield a zero factor.  `surface_sensitivity` is 0.5 for
/// resistant, 1.0 for normal and 2.0 for sensitive materials.
pub fn calculate_mold_factor(
    humidity_rel: Option<f64>,
    temp_c: Option<f64>,
    exposure_hours: f64,
    surface_sensitivity: f64,
) -> MoldFactorResult {
    let present = |v: Option<f64>| v.filter(|x| !x.is_nan());
    let (Some(rh), Some(temp)) = (present(humidity_rel), present(temp_c)) else {
        return MoldFactorResult::insufficient_data();
    };

    let rh = rh.clamp(0.0, 100.0);
    let temp = temp.clamp(-10.0, 50.0);
    let exposure = exposure_hours.max(0.1);

    let excess = (rh - calculate_critical_rh(temp)).max(0.0);
    let raw = excess * temperature_factor(temp) * time_factor(exposure) * surface_sensitivity
        / FACTOR_SCALE;
    let factor = round2(raw.clamp(0.0, FACTOR_MAX));

    MoldFactorResult::from_factor(factor)
}

/// Mold factor for a single hour of exposure on a normal surface.
pub fn calculate_mold_factor_simple(humidity_rel: f64, temp_c: f64) -> f64 {
    calculate_mold_factor(Some(humidity_rel), Some(temp_c), 1.0, 1.0).mold_factor
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
