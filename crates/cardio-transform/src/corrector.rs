//! The fit/transform contract shared by the correctors.

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::report::CorrectionReport;

/// A stateful repair step.
///
/// `fit` learns reference statistics and may be called again to replace
/// them. `transform` only reads the fitted state, so one fitted corrector
/// can serve many record sets, including from several threads.
pub trait Corrector {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Learn group statistics from a reference set.
    fn fit(&mut self, reference: &DataFrame) -> Result<()>;

    /// True once `fit` has produced at least one group.
    fn is_fitted(&self) -> bool;

    /// Repair `records` and report what changed. The output has the same
    /// rows in the same order as the input.
    fn transform_with_report(&self, records: &DataFrame) -> Result<(DataFrame, CorrectionReport)>;

    fn transform(&self, records: &DataFrame) -> Result<DataFrame> {
        self.transform_with_report(records).map(|(df, _)| df)
    }

    fn fit_transform(&mut self, reference: &DataFrame) -> Result<DataFrame> {
        self.fit(reference)?;
        self.transform(reference)
    }
}
