//! Sequential fit/transform chain in front of a risk model.
//!
//! # Stage order
//!
//! 1. **BodyMetricsCorrector** - height/weight repair, weight imputation, BMI
//! 2. **BloodPressureCorrector** - pressure repair and imputation
//! 3. **age_to_years** - only when predicting
//! 4. **model_features** - column selection for the model
//!
//! Fitting walks the same chain: each corrector is fitted on the output of
//! the stage before it, then the model is fitted on the fully prepared
//! reference set.

use anyhow::{Context, Result, bail, ensure};
use cardio_model::CorrectionOptions;
use cardio_model::columns::{AGE, MODEL_FEATURES, REQUIRED};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use cardio_transform::frame::require_columns;
use cardio_transform::{
    BloodPressureCorrector, BodyMetricsCorrector, CorrectionReport, Corrector, age_to_years,
};

use crate::model::{Assessment, RiskModel};

/// Corrected records plus one report per corrector, in stage order.
#[derive(Debug, Clone)]
pub struct Correction {
    pub records: DataFrame,
    pub reports: Vec<CorrectionReport>,
}

/// Body metrics and blood pressure correctors in front of a risk model.
///
/// The correction stages do not need a model; `FeaturePipeline<()>` is a
/// corrector-only pipeline.
pub struct FeaturePipeline<M> {
    body_metrics: BodyMetricsCorrector,
    blood_pressure: BloodPressureCorrector,
    model: M,
    model_fitted: bool,
}

impl<M> FeaturePipeline<M> {
    pub fn new(options: &CorrectionOptions, model: M) -> Result<Self> {
        Ok(Self {
            body_metrics: BodyMetricsCorrector::new(options)
                .context("invalid body metrics options")?,
            blood_pressure: BloodPressureCorrector::new(options)
                .context("invalid blood pressure options")?,
            model,
            model_fitted: false,
        })
    }

    pub fn body_metrics(&self) -> &BodyMetricsCorrector {
        &self.body_metrics
    }

    pub fn blood_pressure(&self) -> &BloodPressureCorrector {
        &self.blood_pressure
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Fit both correctors on `reference` and return the corrected
    /// reference set.
    pub fn fit_correctors(&mut self, reference: &DataFrame) -> Result<Correction> {
        let _span = info_span!("fit_correctors", rows = reference.height()).entered();
        require_columns(reference, &REQUIRED).context("reference set")?;
        self.body_metrics
            .fit(reference)
            .context("fit body metrics corrector")?;
        let (records, body_report) = self
            .body_metrics
            .transform_with_report(reference)
            .context("correct reference body metrics")?;

        self.blood_pressure
            .fit(&records)
            .context("fit blood pressure corrector")?;
        let (records, pressure_report) = self
            .blood_pressure
            .transform_with_report(&records)
            .context("correct reference blood pressure")?;

        info!(
            weight_groups = self.body_metrics.stats().len(),
            pressure_groups = self.blood_pressure.stats().len(),
            "fitted correctors"
        );
        Ok(Correction {
            records,
            reports: vec![body_report, pressure_report],
        })
    }

    /// Run both correctors against the fitted statistics.
    pub fn correct(&self, records: &DataFrame) -> Result<Correction> {
        let _span = info_span!("correct", rows = records.height()).entered();
        require_columns(records, &REQUIRED).context("record set")?;
        let (records, body_report) = self
            .body_metrics
            .transform_with_report(records)
            .context("correct body metrics")?;
        let (records, pressure_report) = self
            .blood_pressure
            .transform_with_report(&records)
            .context("correct blood pressure")?;
        debug!(%body_report, %pressure_report, "corrected records");
        Ok(Correction {
            records,
            reports: vec![body_report, pressure_report],
        })
    }

    pub fn transform(&self, records: &DataFrame) -> Result<DataFrame> {
        Ok(self.correct(records)?.records)
    }

    /// Select the model's input columns, in model order. Columns missing
    /// from `records` are left out.
    pub fn model_features(records: &DataFrame) -> Result<DataFrame> {
        let present: Vec<&str> = MODEL_FEATURES
            .iter()
            .copied()
            .filter(|name| records.column(name).is_ok())
            .collect();
        if present.is_empty() {
            bail!("record set has none of the model feature columns");
        }
        Ok(records.select(present)?)
    }

    fn prepare(&self, records: &DataFrame) -> Result<DataFrame> {
        let corrected = self.transform(records)?;
        Self::model_features(&with_age_in_years(&corrected)?)
    }
}

impl<M: RiskModel> FeaturePipeline<M> {
    /// Fit the correctors, then the model on the prepared reference set.
    pub fn fit(&mut self, reference: &DataFrame, labels: &[bool]) -> Result<()> {
        ensure!(
            labels.len() == reference.height(),
            "{} labels for {} reference records",
            labels.len(),
            reference.height()
        );
        let corrected = self.fit_correctors(reference)?.records;
        let features = Self::model_features(&with_age_in_years(&corrected)?)?;
        let _span = info_span!("fit_model", rows = features.height()).entered();
        self.model.fit(&features, labels).context("fit risk model")?;
        self.model_fitted = true;
        info!(features = features.width(), "fitted risk model");
        Ok(())
    }

    /// Probability of cardiovascular disease for each record.
    pub fn predict_probability(&self, records: &DataFrame) -> Result<Vec<f64>> {
        if !self.model_fitted {
            bail!("risk model has not been fitted");
        }
        let features = self.prepare(records)?;
        let probabilities = self
            .model
            .predict_probability(&features)
            .context("risk model prediction")?;
        ensure!(
            probabilities.len() == records.height(),
            "risk model returned {} probabilities for {} records",
            probabilities.len(),
            records.height()
        );
        if let Some(bad) = probabilities.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            bail!("risk model returned probability {bad} outside [0, 1]");
        }
        Ok(probabilities)
    }

    /// Probability and risk band for each record.
    pub fn assess(&self, records: &DataFrame) -> Result<Vec<Assessment>> {
        Ok(self
            .predict_probability(records)?
            .into_iter()
            .map(Assessment::new)
            .collect())
    }
}

fn with_age_in_years(records: &DataFrame) -> Result<DataFrame> {
    if records.column(AGE).is_err() {
        return Ok(records.clone());
    }
    age_to_years(records).context("convert age to years")
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    struct Constant(f64);

    impl RiskModel for Constant {
        fn fit(&mut self, _features: &DataFrame, _labels: &[bool]) -> Result<()> {
            Ok(())
        }

        fn predict_probability(&self, features: &DataFrame) -> Result<Vec<f64>> {
            Ok(vec![self.0; features.height()])
        }
    }

    #[test]
    fn test_model_features_keep_model_order() {
        let df = DataFrame::new(vec![
            Column::new("height".into(), vec![170.0]),
            Column::new("gender".into(), vec![1_i64]),
            Column::new("bmi".into(), vec![24_i64]),
            Column::new("age".into(), vec![50.0]),
        ])
        .unwrap();
        let features = FeaturePipeline::<Constant>::model_features(&df).unwrap();
        let names: Vec<&str> = features
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["age", "bmi", "gender"]);
    }

    #[test]
    fn test_model_features_need_a_column() {
        let df = DataFrame::new(vec![Column::new("id".into(), vec![1_i64])]).unwrap();
        assert!(FeaturePipeline::<Constant>::model_features(&df).is_err());
    }

    #[test]
    fn test_predict_requires_fit() {
        let pipeline = FeaturePipeline::new(&CorrectionOptions::default(), Constant(0.5)).unwrap();
        let df = DataFrame::new(vec![Column::new("id".into(), vec![1_i64])]).unwrap();
        let err = pipeline.predict_probability(&df).unwrap_err();
        assert!(err.to_string().contains("not been fitted"));
    }
}
