//! Survey data correction transforms.
//!
//! This crate repairs noisy survey measurements before they reach a risk
//! model:
//!
//! - **bucket**: breakpoint bucketing of continuous values
//! - **group_stats**: per-group mean tables learned from a reference set
//! - **blood_pressure**: systolic/diastolic repair and imputation
//! - **body_metrics**: height/weight repair, imputation and BMI
//! - **features**: stateless derived columns (age in years, pressure sum)
//! - **frame**: typed column access on Polars DataFrames
//!
//! Both correctors implement [`Corrector`]: `fit` learns group statistics
//! from a reference set, `transform` repairs any record set against them
//! without touching the fitted state.

pub mod blood_pressure;
pub mod body_metrics;
pub mod bucket;
pub mod corrector;
pub mod error;
pub mod features;
pub mod frame;
pub mod group_stats;
pub mod report;

pub use blood_pressure::BloodPressureCorrector;
pub use body_metrics::BodyMetricsCorrector;
pub use bucket::BucketSpec;
pub use corrector::Corrector;
pub use error::{Result, TransformError};
pub use features::{add_pressure_sum, age_to_years};
pub use group_stats::{FillSummary, GroupKey, GroupMeans, GroupStatsTable};
pub use report::CorrectionReport;
