//! Classifier contract.

use anyhow::Result;
use cardio_model::RiskLevel;
use polars::prelude::DataFrame;

/// A binary classifier over the corrected feature frame.
///
/// `features` holds the columns selected by
/// [`FeaturePipeline::model_features`](crate::FeaturePipeline::model_features),
/// one row per record. Labels are `true` for records with cardiovascular
/// disease.
pub trait RiskModel {
    fn fit(&mut self, features: &DataFrame, labels: &[bool]) -> Result<()>;

    /// Probability of the positive class for each row, in `[0, 1]`.
    fn predict_probability(&self, features: &DataFrame) -> Result<Vec<f64>>;
}

/// Predicted probability with its risk band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub probability: f64,
    pub level: RiskLevel,
}

impl Assessment {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            level: RiskLevel::from_probability(probability),
        }
    }

    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_bands() {
        let assessment = Assessment::new(0.62);
        assert_eq!(assessment.level, RiskLevel::High);
        assert!((assessment.percent() - 62.0).abs() < 1e-9);
        assert_eq!(Assessment::new(0.1).level, RiskLevel::Low);
    }
}
