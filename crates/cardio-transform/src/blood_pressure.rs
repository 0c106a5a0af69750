//! Blood pressure correction.
//!
//! Survey pressures carry a handful of recurring entry errors: negative
//! signs, readings typed one or two orders of magnitude off, systolic and
//! diastolic entered in each other's field, and `0` used for "not measured".
//! Each record goes through these steps in order:
//!
//! 1. absolute value of both fields
//! 2. scale positive values below the floor up by 10, then values above the
//!    ceiling down by 10, until they stop crossing the bound
//! 3. swap the pair when systolic < diastolic
//! 4. drop a low systolic paired with a zero diastolic, and a high diastolic
//!    paired with a zero systolic
//! 5. drop values outside their plausible range
//! 6. fill missing values with the `(cholesterol, weight_bucket)` means
//!    learned by [`Corrector::fit`], then swap any pair the filled mean
//!    left reversed
//! 7. refresh the `weight_bucket` and `height_bucket` columns

use cardio_model::columns::{
    AP_HI, AP_LO, CHOLESTEROL, HEIGHT, HEIGHT_BUCKET, WEIGHT, WEIGHT_BUCKET,
};
use cardio_model::{BloodPressureOptions, CorrectionOptions, ValueRange};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::bucket::BucketSpec;
use crate::corrector::Corrector;
use crate::error::Result;
use crate::frame::{numeric_column, require_columns, write_float_column, write_int_column};
use crate::group_stats::GroupStatsTable;
use crate::report::CorrectionReport;

const GROUP_KEY: [&str; 2] = [CHOLESTEROL, WEIGHT_BUCKET];
const VALUES: [&str; 2] = [AP_HI, AP_LO];

/// Result of bringing one reading into range by powers of ten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rescale {
    Unchanged(f64),
    Rescaled(f64),
    /// Still out of range after the iteration cap.
    NonConvergent,
}

/// Scale `value` by powers of ten towards `range`.
///
/// Positive values below `range.min` are multiplied by 10 until they are
/// not; afterwards values above `range.max` are divided by 10 until they are
/// not. Zero is a missing-value sentinel and is never scaled up. Each loop
/// gives up after `max_iterations` passes.
pub fn rescale_magnitude(value: f64, range: &ValueRange, max_iterations: usize) -> Rescale {
    let mut scaled = value;
    let mut passes = 0;
    while scaled > 0.0 && scaled < range.min {
        if passes == max_iterations {
            return Rescale::NonConvergent;
        }
        scaled *= 10.0;
        passes += 1;
    }
    let mut down = 0;
    while scaled > range.max {
        if down == max_iterations {
            return Rescale::NonConvergent;
        }
        scaled /= 10.0;
        down += 1;
    }
    if passes + down == 0 {
        Rescale::Unchanged(scaled)
    } else {
        Rescale::Rescaled(scaled)
    }
}

/// Stateful systolic/diastolic corrector.
#[derive(Debug, Clone)]
pub struct BloodPressureCorrector {
    options: BloodPressureOptions,
    weight_buckets: BucketSpec,
    height_buckets: BucketSpec,
    stats: GroupStatsTable,
}

impl BloodPressureCorrector {
    pub fn new(options: &CorrectionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options: options.blood_pressure.clone(),
            weight_buckets: BucketSpec::new(options.blood_pressure.weight_breakpoints.clone())?,
            height_buckets: BucketSpec::new(options.body_metrics.height_breakpoints.clone())?,
            stats: GroupStatsTable::new(),
        })
    }

    /// Fitted `(cholesterol, weight_bucket)` -> `(ap_hi, ap_lo)` means.
    pub fn stats(&self) -> &GroupStatsTable {
        &self.stats
    }

    /// Steps 1 to 5 for one record.
    fn repair_pair(
        &self,
        hi: &mut Option<f64>,
        lo: &mut Option<f64>,
        report: &mut CorrectionReport,
    ) {
        let opts = &self.options;
        for (value, range) in [(&mut *hi, &opts.systolic), (&mut *lo, &opts.diastolic)] {
            let Some(raw) = *value else {
                continue;
            };
            if raw < 0.0 {
                report.adjusted += 1;
            }
            *value = match rescale_magnitude(raw.abs(), range, opts.max_rescale_iterations) {
                Rescale::Unchanged(v) => Some(v),
                Rescale::Rescaled(v) => {
                    report.rescaled += 1;
                    Some(v)
                }
                Rescale::NonConvergent => {
                    report.non_convergent += 1;
                    report.invalidated += 1;
                    None
                }
            };
        }

        order_pair(hi, lo, report);

        if let (Some(h), Some(l)) = (*hi, *lo) {
            if h < opts.lone_systolic_limit && l == 0.0 {
                *hi = None;
                report.invalidated += 1;
            } else if l > opts.lone_diastolic_limit && h == 0.0 {
                *lo = None;
                report.invalidated += 1;
            }
        }

        for (value, range) in [(hi, &opts.systolic), (lo, &opts.diastolic)] {
            if value.is_some_and(|v| !range.contains(v)) {
                *value = None;
                report.invalidated += 1;
            }
        }
    }
}

/// Exchange systolic and diastolic when systolic is the lower of the two.
fn order_pair(hi: &mut Option<f64>, lo: &mut Option<f64>, report: &mut CorrectionReport) {
    if let (Some(h), Some(l)) = (*hi, *lo)
        && h < l
    {
        std::mem::swap(hi, lo);
        report.swapped += 1;
    }
}

impl Corrector for BloodPressureCorrector {
    fn name(&self) -> &'static str {
        "blood_pressure"
    }

    fn fit(&mut self, reference: &DataFrame) -> Result<()> {
        let _span = info_span!("fit", corrector = self.name()).entered();
        require_columns(reference, &[WEIGHT, CHOLESTEROL, AP_HI, AP_LO])?;
        let mut working = reference.clone();
        let weight = numeric_column(reference, WEIGHT)?;
        write_int_column(&mut working, WEIGHT_BUCKET, self.weight_buckets.assign_all(&weight))?;
        self.stats.fit(&working, &GROUP_KEY, &VALUES)?;
        info!(
            rows = reference.height(),
            groups = self.stats.len(),
            "fitted blood pressure statistics"
        );
        Ok(())
    }

    fn is_fitted(&self) -> bool {
        !self.stats.is_empty()
    }

    fn transform_with_report(&self, records: &DataFrame) -> Result<(DataFrame, CorrectionReport)> {
        let _span = info_span!("transform", corrector = self.name()).entered();
        require_columns(records, &[AP_HI, AP_LO, CHOLESTEROL, WEIGHT, HEIGHT])?;
        let mut report = CorrectionReport::new(self.name(), records.height());

        let mut systolic = numeric_column(records, AP_HI)?;
        let mut diastolic = numeric_column(records, AP_LO)?;
        for (hi, lo) in systolic.iter_mut().zip(diastolic.iter_mut()) {
            self.repair_pair(hi, lo, &mut report);
        }
        debug!(
            adjusted = report.adjusted,
            rescaled = report.rescaled,
            swapped = report.swapped,
            invalidated = report.invalidated,
            non_convergent = report.non_convergent,
            "repaired pressure readings"
        );

        let mut output = records.clone();
        write_float_column(&mut output, AP_HI, systolic)?;
        write_float_column(&mut output, AP_LO, diastolic)?;

        let weight = numeric_column(records, WEIGHT)?;
        write_int_column(&mut output, WEIGHT_BUCKET, self.weight_buckets.assign_all(&weight))?;
        let fill = self.stats.lookup_and_fill(&mut output, &GROUP_KEY, &VALUES)?;
        report.imputed = fill.filled;
        report.unresolved = fill.unresolved;

        // a group mean can land on the wrong side of an observed reading
        let mut systolic = numeric_column(&output, AP_HI)?;
        let mut diastolic = numeric_column(&output, AP_LO)?;
        for (hi, lo) in systolic.iter_mut().zip(diastolic.iter_mut()) {
            order_pair(hi, lo, &mut report);
        }
        write_float_column(&mut output, AP_HI, systolic)?;
        write_float_column(&mut output, AP_LO, diastolic)?;

        let height = numeric_column(records, HEIGHT)?;
        write_int_column(&mut output, HEIGHT_BUCKET, self.height_buckets.assign_all(&height))?;

        info!(
            records = report.records,
            imputed = report.imputed,
            unresolved = report.unresolved,
            "corrected blood pressure"
        );
        Ok((output, report))
    }
}
