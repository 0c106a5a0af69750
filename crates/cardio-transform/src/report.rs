//! Per-transform correction counters.

use serde::Serialize;

/// What a single `transform` call changed, counted in values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionReport {
    pub corrector: &'static str,
    pub records: usize,
    /// Sign flips and unit shifts (negative pressures, height off by 100).
    pub adjusted: usize,
    /// Values moved into range by repeated scaling by 10.
    pub rescaled: usize,
    /// Records whose paired fields were exchanged.
    pub swapped: usize,
    /// Values discarded as implausible before imputation.
    pub invalidated: usize,
    /// Values that did not reach their range within the iteration cap.
    pub non_convergent: usize,
    /// Missing values filled from group means.
    pub imputed: usize,
    /// Values still missing after imputation.
    pub unresolved: usize,
}

impl CorrectionReport {
    pub fn new(corrector: &'static str, records: usize) -> Self {
        Self {
            corrector,
            records,
            ..Self::default()
        }
    }

    /// True when the transform left every value as it was.
    pub fn is_clean(&self) -> bool {
        self.adjusted == 0
            && self.rescaled == 0
            && self.swapped == 0
            && self.invalidated == 0
            && self.imputed == 0
    }
}

impl std::fmt::Display for CorrectionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} records, {} adjusted, {} rescaled, {} swapped, {} invalidated, \
             {} non-convergent, {} imputed, {} unresolved",
            self.corrector,
            self.records,
            self.adjusted,
            self.rescaled,
            self.swapped,
            self.invalidated,
            self.non_convergent,
            self.imputed,
            self.unresolved
        )
    }
}
