//! Property tests for the correctors and bucketing.

use cardio_model::CorrectionOptions;
use cardio_model::columns::{AP_HI, AP_LO, CHOLESTEROL, GENDER, HEIGHT, WEIGHT};
use cardio_transform::{BloodPressureCorrector, BodyMetricsCorrector, BucketSpec, Corrector};
use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;

fn frame(rows: &[(f64, f64, f64, f64)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new(HEIGHT.into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new(WEIGHT.into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
        Column::new(AP_HI.into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
        Column::new(AP_LO.into(), rows.iter().map(|r| r.3).collect::<Vec<_>>()),
        Column::new(CHOLESTEROL.into(), vec![1_i64; rows.len()]),
        Column::new(GENDER.into(), vec![1_i64; rows.len()]),
    ])
    .unwrap()
}

/// Cholesterol 1 across every weight bucket the generated rows can reach.
fn pressure_reference() -> DataFrame {
    frame(&[
        (170.0, 55.0, 120.0, 80.0),
        (170.0, 65.0, 120.0, 80.0),
        (170.0, 75.0, 130.0, 85.0),
        (170.0, 85.0, 140.0, 90.0),
        (170.0, 95.0, 150.0, 95.0),
    ])
}

/// Gender 1 across every height bucket from 150 cm up.
fn body_reference() -> DataFrame {
    frame(&[
        (155.0, 58.0, 120.0, 80.0),
        (165.0, 64.0, 120.0, 80.0),
        (175.0, 72.0, 120.0, 80.0),
        (185.0, 84.0, 120.0, 80.0),
    ])
}

fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

proptest! {
    #[test]
    fn repaired_pressures_are_ordered_and_in_range(
        rows in prop::collection::vec(
            (150.0f64..190.0, 50.0f64..120.0, -3000.0f64..30000.0, -3000.0f64..30000.0),
            1..40,
        )
    ) {
        let options = CorrectionOptions::default();
        let mut corrector = BloodPressureCorrector::new(&options).unwrap();
        corrector.fit(&pressure_reference()).unwrap();
        let out = corrector.transform(&frame(&rows)).unwrap();

        prop_assert_eq!(out.height(), rows.len());
        let hi = floats(&out, AP_HI);
        let lo = floats(&out, AP_LO);
        for (hi, lo) in hi.iter().zip(&lo) {
            // every weight bucket has a fitted mean, so nothing stays missing
            let (Some(h), Some(l)) = (hi, lo) else {
                return Err(TestCaseError::fail("pressure left missing"));
            };
            prop_assert!(options.blood_pressure.systolic.contains(*h));
            prop_assert!(options.blood_pressure.diastolic.contains(*l));
            prop_assert!(h >= l);
        }
    }

    #[test]
    fn valid_pressures_are_left_alone(
        pairs in prop::collection::vec((60.0f64..=250.0, 40.0f64..=200.0), 1..40)
    ) {
        let rows: Vec<_> = pairs
            .iter()
            .map(|(a, b)| (170.0, 70.0, a.max(*b), a.min(*b)))
            .collect();
        let corrector = BloodPressureCorrector::new(&CorrectionOptions::default()).unwrap();
        let once = corrector.transform(&frame(&rows)).unwrap();
        let twice = corrector.transform(&once).unwrap();

        let expected_hi: Vec<_> = rows.iter().map(|r| Some(r.2)).collect();
        prop_assert_eq!(floats(&once, AP_HI), expected_hi);
        prop_assert_eq!(floats(&twice, AP_HI), floats(&once, AP_HI));
        prop_assert_eq!(floats(&twice, AP_LO), floats(&once, AP_LO));
    }

    #[test]
    fn plausible_body_metrics_are_stable(
        rows in prop::collection::vec((150.0f64..190.0, 60.0f64..100.0), 1..40)
    ) {
        let rows: Vec<_> = rows.iter().map(|(h, w)| (*h, *w, 120.0, 80.0)).collect();
        let mut corrector = BodyMetricsCorrector::new(&CorrectionOptions::default()).unwrap();
        let once = corrector.fit_transform(&frame(&rows)).unwrap();
        let twice = corrector.transform(&once).unwrap();

        prop_assert_eq!(once.height(), rows.len());
        let expected: Vec<_> = rows.iter().map(|r| Some(r.1)).collect();
        prop_assert_eq!(floats(&once, WEIGHT), expected);
        prop_assert_eq!(floats(&twice, WEIGHT), floats(&once, WEIGHT));
        prop_assert_eq!(floats(&twice, HEIGHT), floats(&once, HEIGHT));
    }

    #[test]
    fn weight_is_filled_when_group_was_fitted(
        rows in prop::collection::vec(
            (
                150.0f64..190.0,
                prop_oneof![20.0f64..40.0, 40.0f64..200.0, 200.0f64..400.0],
            ),
            1..40,
        )
    ) {
        let rows: Vec<_> = rows.iter().map(|(h, w)| (*h, *w, 120.0, 80.0)).collect();
        let mut corrector = BodyMetricsCorrector::new(&CorrectionOptions::default()).unwrap();
        corrector.fit(&body_reference()).unwrap();
        let (out, report) = corrector.transform_with_report(&frame(&rows)).unwrap();

        prop_assert_eq!(out.height(), rows.len());
        prop_assert_eq!(report.unresolved, 0);
        prop_assert!(floats(&out, WEIGHT).iter().all(Option::is_some));
    }

    #[test]
    fn buckets_are_monotone(a in -50.0f64..300.0, b in -50.0f64..300.0) {
        let spec = BucketSpec::new(vec![0.0, 60.0, 70.0, 80.0, 90.0]).unwrap();
        let (low, high) = (a.min(b), a.max(b));
        prop_assert!(spec.assign(low) <= spec.assign(high));
        let bucket = spec.assign(high).unwrap();
        prop_assert!((0..=5).contains(&bucket));
    }
}

#[test]
fn breakpoint_values_open_their_bucket() {
    let spec = BucketSpec::new(vec![0.0, 60.0, 70.0, 80.0, 90.0]).unwrap();
    assert_eq!(spec.assign(60.0), Some(2));
    assert_eq!(spec.assign(59.9), Some(1));
    assert_eq!(spec.assign(-1.0), Some(0));
    assert_eq!(spec.assign(200.0), Some(5));
    assert_eq!(spec.assign(f64::NAN), None);
}
