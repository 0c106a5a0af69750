//! Breakpoint bucketing.

use cardio_model::options::validate_breakpoints;

use crate::error::Result;

/// Sorted breakpoints splitting a continuous axis into buckets.
///
/// The bucket of `v` is the number of breakpoints `<= v`, so a value equal
/// to a breakpoint lands in the bucket above it. With `N` breakpoints the
/// index ranges over `0..=N`.
///
/// ```
/// use cardio_transform::BucketSpec;
///
/// let weight = BucketSpec::new(vec![0.0, 60.0, 70.0, 80.0, 90.0]).unwrap();
/// assert_eq!(weight.assign(59.9), Some(1));
/// assert_eq!(weight.assign(60.0), Some(2));
/// assert_eq!(weight.assign(120.0), Some(5));
/// assert_eq!(weight.assign(-3.0), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSpec {
    breakpoints: Vec<f64>,
}

impl BucketSpec {
    /// Breakpoints must be finite and strictly ascending.
    pub fn new(breakpoints: Vec<f64>) -> Result<Self> {
        validate_breakpoints("breakpoints", &breakpoints)?;
        Ok(Self { breakpoints })
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Number of distinct bucket indices.
    pub fn bucket_count(&self) -> usize {
        self.breakpoints.len() + 1
    }

    /// Bucket index for one value, `None` for NaN.
    pub fn assign(&self, value: f64) -> Option<i64> {
        if value.is_nan() {
            return None;
        }
        let index = self.breakpoints.partition_point(|bound| *bound <= value);
        Some(index as i64)
    }

    /// Bucket every value of a column; missing values stay missing.
    pub fn assign_all(&self, values: &[Option<f64>]) -> Vec<Option<i64>> {
        values
            .iter()
            .map(|value| value.and_then(|v| self.assign(v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_go_to_upper_bucket() {
        let height = BucketSpec::new(vec![0.0, 150.0, 160.0, 170.0, 180.0]).unwrap();
        assert_eq!(height.assign(150.0), Some(2));
        assert_eq!(height.assign(149.0), Some(1));
        assert_eq!(height.assign(180.0), Some(5));
        assert_eq!(height.assign(0.0), Some(1));
        assert_eq!(height.bucket_count(), 6);
    }

    #[test]
    fn infinities_hit_the_edges() {
        let spec = BucketSpec::new(vec![0.0, 10.0]).unwrap();
        assert_eq!(spec.assign(f64::INFINITY), Some(2));
        assert_eq!(spec.assign(f64::NEG_INFINITY), Some(0));
        assert_eq!(spec.assign(f64::NAN), None);
    }

    #[test]
    fn empty_breakpoints_have_one_bucket() {
        let spec = BucketSpec::new(Vec::new()).unwrap();
        assert_eq!(spec.assign(42.0), Some(0));
    }

    #[test]
    fn assign_all_keeps_missing() {
        let spec = BucketSpec::new(vec![0.0, 60.0]).unwrap();
        assert_eq!(
            spec.assign_all(&[Some(65.0), None, Some(-1.0)]),
            vec![Some(2), None, Some(0)]
        );
    }

    #[test]
    fn rejects_unsorted() {
        assert!(BucketSpec::new(vec![10.0, 0.0]).is_err());
    }
}
