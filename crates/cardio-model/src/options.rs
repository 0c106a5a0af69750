//! Configuration options for survey corrections.
//!
//! Defaults reproduce the thresholds the correctors were tuned with on the
//! public cardiovascular survey. Every struct deserializes with
//! `#[serde(default)]`, so a JSON file only needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Closed interval of plausible values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies inside the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Options for the blood pressure corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureOptions {
    /// Plausible systolic readings. Positive values below `min` are scaled
    /// up by 10, values above `max` are scaled down by 10.
    pub systolic: ValueRange,
    /// Plausible diastolic readings.
    pub diastolic: ValueRange,
    /// A systolic reading below this limit paired with a zero diastolic is
    /// treated as missing.
    pub lone_systolic_limit: f64,
    /// A diastolic reading above this limit paired with a zero systolic is
    /// treated as missing.
    pub lone_diastolic_limit: f64,
    /// Breakpoints for the weight bucket used as imputation group.
    pub weight_breakpoints: Vec<f64>,
    /// Upper bound on rescale passes per direction before a value is
    /// declared non-convergent.
    pub max_rescale_iterations: usize,
}

impl Default for BloodPressureOptions {
    fn default() -> Self {
        Self {
            systolic: ValueRange::new(60.0, 250.0),
            diastolic: ValueRange::new(40.0, 200.0),
            lone_systolic_limit: 100.0,
            lone_diastolic_limit: 100.0,
            weight_breakpoints: vec![0.0, 60.0, 70.0, 80.0, 90.0],
            max_rescale_iterations: 16,
        }
    }
}

/// Options for the height/weight corrector.
///
/// Each invalidation bound is optional so the rules can be disabled
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyMetricsOptions {
    /// Breakpoints for the height bucket used as imputation group.
    pub height_breakpoints: Vec<f64>,
    /// Heights at or below this value get `height_offset` added.
    pub short_height_limit: f64,
    /// Heights at or above this value get `height_offset` subtracted.
    pub tall_height_limit: f64,
    pub height_offset: f64,
    /// BMI above which a record with weight > height is considered to have
    /// its height and weight transposed.
    pub swap_bmi_threshold: f64,
    /// Weight below this value is invalid.
    pub min_weight: Option<f64>,
    /// Weight at or above this value is invalid.
    pub max_weight: Option<f64>,
    /// BMI below this value invalidates the weight.
    pub min_bmi: Option<f64>,
    /// BMI at or above this value invalidates the weight.
    pub max_bmi: Option<f64>,
}

impl Default for BodyMetricsOptions {
    fn default() -> Self {
        Self {
            height_breakpoints: vec![0.0, 150.0, 160.0, 170.0, 180.0],
            short_height_limit: 100.0,
            tall_height_limit: 250.0,
            height_offset: 100.0,
            swap_bmi_threshold: 80.0,
            min_weight: Some(40.0),
            max_weight: Some(200.0),
            min_bmi: Some(15.0),
            max_bmi: Some(90.0),
        }
    }
}

/// Options controlling both correctors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionOptions {
    pub blood_pressure: BloodPressureOptions,
    pub body_metrics: BodyMetricsOptions,
}

impl CorrectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blood_pressure(mut self, options: BloodPressureOptions) -> Self {
        self.blood_pressure = options;
        self
    }

    pub fn with_body_metrics(mut self, options: BodyMetricsOptions) -> Self {
        self.body_metrics = options;
        self
    }

    /// Check breakpoints and ranges for consistency.
    pub fn validate(&self) -> Result<()> {
        let bp = &self.blood_pressure;
        bp.systolic.validate("systolic")?;
        bp.diastolic.validate("diastolic")?;
        if bp.systolic.min <= 0.0 || bp.diastolic.min <= 0.0 {
            return Err(ConfigError::Message(
                "pressure floors must be positive".to_string(),
            ));
        }
        if bp.max_rescale_iterations == 0 {
            return Err(ConfigError::Message(
                "max_rescale_iterations must be at least 1".to_string(),
            ));
        }
        validate_breakpoints("weight_breakpoints", &bp.weight_breakpoints)?;

        let body = &self.body_metrics;
        validate_breakpoints("height_breakpoints", &body.height_breakpoints)?;
        if body.short_height_limit >= body.tall_height_limit {
            return Err(ConfigError::InvalidRange {
                name: "height".to_string(),
                min: body.short_height_limit,
                max: body.tall_height_limit,
            });
        }
        Ok(())
    }
}

/// Breakpoints must be finite and strictly ascending.
pub fn validate_breakpoints(name: &str, values: &[f64]) -> Result<()> {
    let finite = values.iter().all(|v| v.is_finite());
    let ascending = values.windows(2).all(|pair| pair[0] < pair[1]);
    if finite && ascending {
        Ok(())
    } else {
        Err(ConfigError::InvalidBreakpoints {
            name: name.to_string(),
            values: values.to_vec(),
        })
    }
}
