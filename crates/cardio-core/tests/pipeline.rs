//! FeaturePipeline fit/predict chain with a stand-in classifier.

use anyhow::Result;
use cardio_core::{FeaturePipeline, RiskModel};
use cardio_model::columns::{
    AGE, ALCO, ACTIVE, AP_HI, AP_LO, CHOLESTEROL, GENDER, GLUC, HEIGHT, SMOKE, WEIGHT,
};
use cardio_model::{CorrectionOptions, RiskLevel};
use polars::prelude::{Column, DataFrame};

/// Predicts the positive rate seen during fit and remembers what it saw.
#[derive(Default)]
struct BaseRate {
    rate: f64,
    columns: Vec<String>,
    ages: Vec<Option<f64>>,
}

impl RiskModel for BaseRate {
    fn fit(&mut self, features: &DataFrame, labels: &[bool]) -> Result<()> {
        self.rate = labels.iter().filter(|label| **label).count() as f64 / labels.len() as f64;
        self.columns = features
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        self.ages = features.column(AGE)?.f64()?.into_iter().collect();
        Ok(())
    }

    fn predict_probability(&self, features: &DataFrame) -> Result<Vec<f64>> {
        Ok(vec![self.rate; features.height()])
    }
}

struct Broken;

impl RiskModel for Broken {
    fn fit(&mut self, _features: &DataFrame, _labels: &[bool]) -> Result<()> {
        Ok(())
    }

    fn predict_probability(&self, features: &DataFrame) -> Result<Vec<f64>> {
        Ok(vec![1.5; features.height()])
    }
}

fn survey() -> DataFrame {
    DataFrame::new(vec![
        Column::new(AGE.into(), vec![18_250_i64, 21_900, 16_425, 20_075]),
        Column::new(GENDER.into(), vec![1_i64, 2, 1, 2]),
        Column::new(HEIGHT.into(), vec![170.0, 180.0, 65.0, 175.0]),
        Column::new(WEIGHT.into(), vec![70.0, 85.0, 62.0, 80.0]),
        Column::new(AP_HI.into(), vec![120.0, 14.0, 110.0, 130.0]),
        Column::new(AP_LO.into(), vec![80.0, 90.0, 70.0, 85.0]),
        Column::new(CHOLESTEROL.into(), vec![1_i64, 2, 1, 3]),
        Column::new(GLUC.into(), vec![1_i64, 1, 2, 1]),
        Column::new(SMOKE.into(), vec![0_i64, 1, 0, 0]),
        Column::new(ALCO.into(), vec![0_i64, 0, 1, 0]),
        Column::new(ACTIVE.into(), vec![1_i64, 0, 1, 1]),
    ])
    .unwrap()
}

#[test]
fn fit_prepares_model_features_in_model_order() {
    let mut pipeline =
        FeaturePipeline::new(&CorrectionOptions::default(), BaseRate::default()).unwrap();
    pipeline.fit(&survey(), &[true, false, false, true]).unwrap();

    let model = pipeline.model();
    assert_eq!(
        model.columns,
        vec![
            "age",
            "weight",
            "bmi",
            "ap_hi",
            "ap_lo",
            "cholesterol",
            "gluc",
            "gender",
            "smoke",
            "alco",
            "active"
        ]
    );
    assert_eq!(model.ages[0], Some(50.0));
    assert!(!pipeline.body_metrics().stats().is_empty());
    assert!(!pipeline.blood_pressure().stats().is_empty());
}

#[test]
fn assess_bands_each_record() {
    let mut pipeline =
        FeaturePipeline::new(&CorrectionOptions::default(), BaseRate::default()).unwrap();
    pipeline.fit(&survey(), &[true, true, true, false]).unwrap();

    let assessments = pipeline.assess(&survey()).unwrap();
    assert_eq!(assessments.len(), 4);
    assert!(assessments.iter().all(|a| a.level == RiskLevel::VeryHigh));
    assert!((assessments[0].percent() - 75.0).abs() < 1e-9);
}

#[test]
fn correct_reports_each_stage() {
    let mut pipeline =
        FeaturePipeline::new(&CorrectionOptions::default(), BaseRate::default()).unwrap();
    pipeline.fit_correctors(&survey()).unwrap();

    let correction = pipeline.correct(&survey()).unwrap();
    assert_eq!(correction.records.height(), 4);
    let names: Vec<_> = correction.reports.iter().map(|r| r.corrector).collect();
    assert_eq!(names, vec!["body_metrics", "blood_pressure"]);
    // height 65 gains 100 cm; ap_hi 14 becomes 140
    assert_eq!(correction.reports[0].adjusted, 1);
    assert_eq!(correction.reports[1].rescaled, 1);
    let hi = correction.records.column(AP_HI).unwrap().f64().unwrap();
    assert_eq!(hi.get(1), Some(140.0));
}

#[test]
fn label_count_must_match_records() {
    let mut pipeline =
        FeaturePipeline::new(&CorrectionOptions::default(), BaseRate::default()).unwrap();
    let err = pipeline.fit(&survey(), &[true]).unwrap_err();
    assert!(err.to_string().contains("1 labels for 4 reference records"));
}

#[test]
fn out_of_range_probabilities_are_rejected() {
    let mut pipeline = FeaturePipeline::new(&CorrectionOptions::default(), Broken).unwrap();
    pipeline.fit(&survey(), &[true, false, true, false]).unwrap();
    let err = pipeline.predict_probability(&survey()).unwrap_err();
    assert!(err.to_string().contains("outside [0, 1]"));
}

#[test]
fn invalid_options_are_reported() {
    let mut options = CorrectionOptions::default();
    options.body_metrics.height_breakpoints = vec![150.0, 100.0];
    assert!(FeaturePipeline::new(&options, BaseRate::default()).is_err());
}
