//! Per-comparison partitioning and DEG count aggregation.

use std::collections::BTreeMap;

use crate::spec::{SpecDegRow, SpecSummaryRow};
use crate::util::derive_comparison_key;

/// Partition `rows` into ordered groups keyed by `key_fn`.
///
/// Within each group, rows keep their input order.
pub fn partition_by_key<F>(rows: &[SpecDegRow], mut key_fn: F) -> BTreeMap<String, Vec<SpecDegRow>>
where
    F: FnMut(&SpecDegRow) -> String,
{
    let mut dict_groups: BTreeMap<String, Vec<SpecDegRow>> = BTreeMap::new();
    for row in rows {
        dict_groups
            .entry(key_fn(row))
            .or_default()
            .push(row.clone());
    }
    dict_groups
}

/// Partition `rows` by comparison key, `{treatment}_{timepoint}`.
pub fn partition_by_comparison(rows: &[SpecDegRow]) -> BTreeMap<String, Vec<SpecDegRow>> {
    partition_by_key(rows, |row| {
        derive_comparison_key(&row.treatment, row.timepoint)
    })
}

/// Summarize a partition map into per-comparison DEG counts.
///
/// Counts are taken from the partition itself so that every summary row
/// matches the length of the group it describes; the output follows the
/// map's ascending key order.
pub fn summarize_deg_counts(groups: &BTreeMap<String, Vec<SpecDegRow>>) -> Vec<SpecSummaryRow> {
    groups
        .iter()
        .map(|(c_key, l_rows)| SpecSummaryRow {
            comparison: c_key.clone(),
            cnt_deg: l_rows.len() as u64,
        })
        .collect()
}
