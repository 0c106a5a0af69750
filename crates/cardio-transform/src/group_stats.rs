//! Per-group mean tables for imputation.
//!
//! A [`GroupStatsTable`] partitions a reference set by a composite key of
//! categorical codes (for example `(cholesterol, weight_bucket)`) and keeps
//! the mean of each value column per group. Filling looks each record's key
//! up directly in the table; records whose group was never seen keep their
//! missing values.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use crate::error::{Result, TransformError};
use crate::frame::{group_keys, numeric_column, write_float_column};

/// Composite group key, one code per key column.
pub type GroupKey = Vec<i64>;

/// Means for one group, aligned with the table's value columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    /// `None` when every record of the group was missing that value.
    pub means: Vec<Option<f64>>,
    /// Records of the reference set that fell into this group.
    pub records: usize,
}

/// Outcome of [`GroupStatsTable::lookup_and_fill`], counted in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub filled: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GroupStatsTable {
    key_columns: Vec<String>,
    value_columns: Vec<String>,
    groups: BTreeMap<GroupKey, GroupMeans>,
}

#[derive(Default)]
struct Accumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
    records: usize,
}

impl GroupStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn group means from `records`, replacing any earlier fit.
    ///
    /// Records with a missing key component are skipped. Missing values are
    /// excluded from the mean of their column rather than counted as zero.
    /// An empty reference set yields an empty table, after which every
    /// lookup misses.
    pub fn fit(
        &mut self,
        records: &DataFrame,
        key_columns: &[&str],
        value_columns: &[&str],
    ) -> Result<()> {
        let keys = group_keys(records, key_columns)?;
        let values = value_columns
            .iter()
            .map(|name| numeric_column(records, name))
            .collect::<Result<Vec<_>>>()?;

        let mut accumulators: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
        for (row, key) in keys.into_iter().enumerate() {
            let Some(key) = key else {
                continue;
            };
            let acc = accumulators.entry(key).or_insert_with(|| Accumulator {
                sums: vec![0.0; value_columns.len()],
                counts: vec![0; value_columns.len()],
                records: 0,
            });
            acc.records += 1;
            for (col, column) in values.iter().enumerate() {
                if let Some(value) = column[row] {
                    acc.sums[col] += value;
                    acc.counts[col] += 1;
                }
            }
        }

        self.key_columns = key_columns.iter().map(|name| (*name).to_string()).collect();
        self.value_columns = value_columns.iter().map(|name| (*name).to_string()).collect();
        self.groups = accumulators
            .into_iter()
            .map(|(key, acc)| {
                let means = acc
                    .sums
                    .iter()
                    .zip(&acc.counts)
                    .map(|(sum, count)| (*count > 0).then(|| sum / *count as f64))
                    .collect();
                (
                    key,
                    GroupMeans {
                        means,
                        records: acc.records,
                    },
                )
            })
            .collect();

        if self.groups.is_empty() {
            warn!(
                keys = ?self.key_columns,
                rows = records.height(),
                "reference set produced no groups; every lookup will miss"
            );
        } else {
            debug!(
                keys = ?self.key_columns,
                groups = self.groups.len(),
                "fitted group statistics"
            );
        }
        Ok(())
    }

    /// Fill missing `target_columns` values from the mean of each record's
    /// group. Every record survives; unmatched values stay missing.
    pub fn lookup_and_fill(
        &self,
        records: &mut DataFrame,
        key_columns: &[&str],
        target_columns: &[&str],
    ) -> Result<FillSummary> {
        if !self.key_columns.is_empty() && key_columns.len() != self.key_columns.len() {
            return Err(TransformError::KeyArity {
                expected: self.key_columns.len(),
                found: key_columns.len(),
            });
        }
        let keys = group_keys(records, key_columns)?;
        let mut summary = FillSummary::default();

        for target in target_columns {
            let position = self.value_position(target);
            if position.is_none() && !self.is_empty() {
                return Err(TransformError::UnknownStatistic {
                    column: (*target).to_string(),
                });
            }
            let mut values = numeric_column(records, target)?;
            for (value, key) in values.iter_mut().zip(&keys) {
                if value.is_some() {
                    continue;
                }
                let fill = position.zip(key.as_ref()).and_then(|(index, key)| {
                    self.groups.get(key).and_then(|group| group.means[index])
                });
                match fill {
                    Some(mean) => {
                        *value = Some(mean);
                        summary.filled += 1;
                    }
                    None => summary.unresolved += 1,
                }
            }
            write_float_column(records, target, values)?;
        }

        if summary.unresolved > 0 {
            warn!(
                keys = ?key_columns,
                unresolved = summary.unresolved,
                "no fitted group for some records; values left missing"
            );
        }
        Ok(summary)
    }

    /// Means for one group key.
    pub fn lookup(&self, key: &[i64]) -> Option<&GroupMeans> {
        self.groups.get(key)
    }

    /// Mean of one value column for one group key.
    pub fn mean(&self, key: &[i64], column: &str) -> Option<f64> {
        let index = self.value_position(column)?;
        self.lookup(key).and_then(|group| group.means[index])
    }

    fn value_position(&self, column: &str) -> Option<usize> {
        self.value_columns.iter().position(|name| name == column)
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &GroupMeans)> {
        self.groups.iter()
    }
}
