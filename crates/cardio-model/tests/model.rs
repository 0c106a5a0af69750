//! Tests for options and risk bands.

use cardio_model::{CorrectionOptions, RiskLevel, columns};

#[test]
fn risk_level_band_edges() {
    assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_probability(0.2499), RiskLevel::Low);
    assert_eq!(RiskLevel::from_probability(0.25), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_probability(0.5), RiskLevel::High);
    assert_eq!(RiskLevel::from_probability(0.75), RiskLevel::VeryHigh);
    assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::VeryHigh);
}

#[test]
fn risk_level_clamps_out_of_range() {
    assert_eq!(RiskLevel::from_probability(-0.3), RiskLevel::Low);
    assert_eq!(RiskLevel::from_probability(4.0), RiskLevel::VeryHigh);
    assert_eq!(RiskLevel::from_probability(f64::NAN), RiskLevel::Low);
    assert_eq!(RiskLevel::VeryHigh.to_string(), "very high");
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r#"{ "body_metrics": { "max_bmi": null, "swap_bmi_threshold": 70.0 } }"#;
    let options: CorrectionOptions = serde_json::from_str(json).expect("parse options");
    assert_eq!(options.body_metrics.max_bmi, None);
    assert_eq!(options.body_metrics.swap_bmi_threshold, 70.0);
    assert_eq!(options.body_metrics.min_bmi, Some(15.0));
    assert_eq!(
        options.blood_pressure.weight_breakpoints,
        vec![0.0, 60.0, 70.0, 80.0, 90.0]
    );
    options.validate().expect("valid");
}

#[test]
fn validate_rejects_bad_breakpoints() {
    let mut options = CorrectionOptions::new();
    options.body_metrics.height_breakpoints = vec![180.0, 150.0];
    assert!(options.validate().is_err());
}

#[test]
fn model_features_include_derived_bmi() {
    assert!(columns::MODEL_FEATURES.contains(&columns::BMI));
    assert!(!columns::MODEL_FEATURES.contains(&columns::HEIGHT));
}
