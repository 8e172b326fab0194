//! Risk classification and recommendations.
//!
//! | score          | level    |
//! |----------------|----------|
//! | `== 0`         | none     |
//! | `(0, 0.5)`     | low      |
//! | `[0.5, 1.0)`   | medium   |
//! | `== 1.0`       | high     |
//! | `> 1.0`        | active   |
//!
//! `high` is an exact-equality bucket.  An accumulated score rarely lands
//! on `1.0` exactly, so most runs go straight from `medium` to `active`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Discrete mold-risk severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Active,
}

impl RiskLevel {
    /// Classify an accumulated score.  Total over `f64`; NaN classifies as
    /// `Active` because every comparison against it fails.
    pub fn from_score(score: f64) -> Self {
        if score == 0.0 {
            Self::None
        } else if score < 0.50 {
            Self::Low
        } else if score < 1.00 {
            Self::Medium
        } else if score == 1.00 {
            Self::High
        } else {
            Self::Active
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Active => "active",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::None => "No accumulated mold growth.",
            Self::Low => "Early growth accumulating; conditions worth watching.",
            Self::Medium => "Germination approaching; inspect and ventilate.",
            Self::High => "Germination threshold reached.",
            Self::Active => "Germination threshold exceeded; mold is likely active.",
        }
    }

    /// Fixed recommendation list for this level (0, 1, 2, 3, 3 entries).
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Low => &["Monitor for upward trends."],
            Self::Medium => &["Caution: Inspect the area.", "Improve airflow and ventilation."],
            Self::High => &[
                "High probability of germination.",
                "Immediate action required.",
                "Increase ventilation significantly.",
            ],
            Self::Active => &[
                "Critical: Mold is likely active.",
                "Immediate intervention required.",
                "Professional inspection recommended.",
            ],
        }
    }

    /// Dashboard colour (hex).
    pub fn color(self) -> &'static str {
        match self {
            Self::None => "#10b981",
            Self::Low => "#84cc16",
            Self::Medium => "#f59e0b",
            Self::High => "#ef4444",
            Self::Active => "#7c2d12",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an accumulated score.
pub fn get_risk_level(score: f64) -> RiskLevel {
    RiskLevel::from_score(score)
}

/// Recommendations for an accumulated score.
pub fn get_risk_recommendations(score: f64) -> &'static [&'static str] {
    get_risk_level(score).recommendations()
}
