use std::path::PathBuf;

use cardio_transform::{CorrectionReport, GroupStatsTable};
use serde::Serialize;

/// Outcome of `cardio clean`.
#[derive(Debug, Clone, Serialize)]
pub struct CleanResult {
    pub reference: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub reference_records: usize,
    pub records: usize,
    /// One report per corrector, in pipeline order.
    pub reports: Vec<CorrectionReport>,
}

impl CleanResult {
    /// Values that stayed missing because their imputation group was never
    /// seen in the reference set.
    pub fn unresolved(&self) -> usize {
        self.reports.iter().map(|report| report.unresolved).sum()
    }
}

/// Outcome of `cardio stats`.
#[derive(Debug, Clone)]
pub struct StatsResult {
    pub reference: PathBuf,
    pub records: usize,
    /// `(gender, height_bucket)` -> weight.
    pub weight: GroupStatsTable,
    /// `(cholesterol, weight_bucket)` -> systolic and diastolic.
    pub pressure: GroupStatsTable,
}
