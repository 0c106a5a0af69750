//! Risk bands for predicted probabilities.

use serde::{Deserialize, Serialize};

/// Qualitative band for a predicted probability of cardiovascular disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Below 25%.
    Low,
    /// 25% up to 50%.
    Moderate,
    /// 50% up to 75%.
    High,
    /// 75% and above.
    VeryHigh,
}

impl RiskLevel {
    /// Band a probability in `[0, 1]`. Out-of-range input is clamped and NaN
    /// maps to `Low`.
    pub fn from_probability(probability: f64) -> Self {
        let percent = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0) * 100.0
        };
        if percent < 25.0 {
            Self::Low
        } else if percent < 50.0 {
            Self::Moderate
        } else if percent < 75.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
