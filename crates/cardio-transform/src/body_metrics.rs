//! Height/weight correction and BMI.
//!
//! Steps, in order:
//!
//! 1. BMI from the raw height and weight
//! 2. when BMI is above the swap threshold and weight exceeds height, the
//!    two fields were transposed: swap them and recompute that record's BMI
//! 3. heights at or below 100 gain 100 cm, heights at or above 250 lose 100
//! 4. weight is dropped when below 40, at or above 200, or when the BMI is
//!    below 15 or at or above 90
//! 5. missing weight is filled with the `(gender, height_bucket)` mean
//! 6. BMI is recomputed from the final height and weight
//! 7. `weight_bucket` and `height_bucket` are refreshed

use cardio_model::columns::{BMI, GENDER, HEIGHT, HEIGHT_BUCKET, WEIGHT, WEIGHT_BUCKET};
use cardio_model::{BodyMetricsOptions, CorrectionOptions};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::bucket::BucketSpec;
use crate::corrector::Corrector;
use crate::error::Result;
use crate::frame::{numeric_column, require_columns, write_float_column, write_int_column};
use crate::group_stats::GroupStatsTable;
use crate::report::CorrectionReport;

const GROUP_KEY: [&str; 2] = [GENDER, HEIGHT_BUCKET];

/// Whole-number BMI, `weight / (height / 100)^2`, rounded half to even.
///
/// Returns `None` when either input is missing or the result is not finite
/// (zero height).
pub fn body_mass_index(weight: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let (weight, height_cm) = (weight?, height_cm?);
    let metres = height_cm / 100.0;
    let bmi = (weight / (metres * metres)).round_ties_even();
    bmi.is_finite().then_some(bmi)
}

/// Stateful height/weight corrector.
#[derive(Debug, Clone)]
pub struct BodyMetricsCorrector {
    options: BodyMetricsOptions,
    height_buckets: BucketSpec,
    weight_buckets: BucketSpec,
    stats: GroupStatsTable,
}

impl BodyMetricsCorrector {
    pub fn new(options: &CorrectionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options: options.body_metrics.clone(),
            height_buckets: BucketSpec::new(options.body_metrics.height_breakpoints.clone())?,
            weight_buckets: BucketSpec::new(options.blood_pressure.weight_breakpoints.clone())?,
            stats: GroupStatsTable::new(),
        })
    }

    /// Fitted `(gender, height_bucket)` -> `weight` means.
    pub fn stats(&self) -> &GroupStatsTable {
        &self.stats
    }

    /// Steps 1 to 4 for one record.
    fn repair_record(
        &self,
        height: &mut Option<f64>,
        weight: &mut Option<f64>,
        report: &mut CorrectionReport,
    ) {
        let opts = &self.options;
        let mut bmi = body_mass_index(*weight, *height);

        if let (Some(b), Some(h), Some(w)) = (bmi, *height, *weight)
            && b > opts.swap_bmi_threshold
            && w > h
        {
            std::mem::swap(height, weight);
            bmi = body_mass_index(*weight, *height);
            report.swapped += 1;
        }

        if let Some(h) = *height {
            if h <= opts.short_height_limit {
                *height = Some(h + opts.height_offset);
                report.adjusted += 1;
            } else if h >= opts.tall_height_limit {
                *height = Some(h - opts.height_offset);
                report.adjusted += 1;
            }
        }

        let Some(w) = *weight else {
            return;
        };
        let below = |bound: Option<f64>, value: Option<f64>| {
            bound.zip(value).is_some_and(|(bound, value)| value < bound)
        };
        let at_or_above = |bound: Option<f64>, value: Option<f64>| {
            bound.zip(value).is_some_and(|(bound, value)| value >= bound)
        };
        let implausible = below(opts.min_weight, Some(w))
            || at_or_above(opts.max_weight, Some(w))
            || below(opts.min_bmi, bmi)
            || at_or_above(opts.max_bmi, bmi);
        if implausible {
            *weight = None;
            report.invalidated += 1;
        }
    }
}

impl Corrector for BodyMetricsCorrector {
    fn name(&self) -> &'static str {
        "body_metrics"
    }

    fn fit(&mut self, reference: &DataFrame) -> Result<()> {
        let _span = info_span!("fit", corrector = self.name()).entered();
        require_columns(reference, &[HEIGHT, WEIGHT, GENDER])?;
        let mut working = reference.clone();
        let height = numeric_column(reference, HEIGHT)?;
        write_int_column(&mut working, HEIGHT_BUCKET, self.height_buckets.assign_all(&height))?;
        self.stats.fit(&working, &GROUP_KEY, &[WEIGHT])?;
        info!(
            rows = reference.height(),
            groups = self.stats.len(),
            "fitted weight statistics"
        );
        Ok(())
    }

    fn is_fitted(&self) -> bool {
        !self.stats.is_empty()
    }

    fn transform_with_report(&self, records: &DataFrame) -> Result<(DataFrame, CorrectionReport)> {
        let _span = info_span!("transform", corrector = self.name()).entered();
        require_columns(records, &[HEIGHT, WEIGHT, GENDER])?;
        let mut report = CorrectionReport::new(self.name(), records.height());

        let mut heights = numeric_column(records, HEIGHT)?;
        let mut weights = numeric_column(records, WEIGHT)?;
        for (height, weight) in heights.iter_mut().zip(weights.iter_mut()) {
            self.repair_record(height, weight, &mut report);
        }
        debug!(
            swapped = report.swapped,
            adjusted = report.adjusted,
            invalidated = report.invalidated,
            "repaired height and weight"
        );

        let mut output = records.clone();
        write_int_column(&mut output, HEIGHT_BUCKET, self.height_buckets.assign_all(&heights))?;
        write_float_column(&mut output, HEIGHT, heights)?;
        write_float_column(&mut output, WEIGHT, weights)?;
        let fill = self.stats.lookup_and_fill(&mut output, &GROUP_KEY, &[WEIGHT])?;
        report.imputed = fill.filled;
        report.unresolved = fill.unresolved;

        let heights = numeric_column(&output, HEIGHT)?;
        let weights = numeric_column(&output, WEIGHT)?;
        let bmi: Vec<Option<i64>> = weights
            .iter()
            .zip(&heights)
            .map(|(weight, height)| body_mass_index(*weight, *height).map(|b| b as i64))
            .collect();
        write_int_column(&mut output, BMI, bmi)?;
        write_int_column(&mut output, WEIGHT_BUCKET, self.weight_buckets.assign_all(&weights))?;

        info!(
            records = report.records,
            imputed = report.imputed,
            unresolved = report.unresolved,
            "corrected body metrics"
        );
        Ok((output, report))
    }
}
