//! Significance cutoff predicates.

use crate::spec::{DegReportError, SpecDegCutoffs, SpecDegRow};
use crate::util::validate_cutoffs;

/// Return whether `row` passes the cutoffs.
///
/// The effect bound is inclusive, the p-value bound is exclusive; rows sitting
/// exactly on `adj_pval_max` are not DEGs. NaN statistics never pass.
pub fn is_deg_row(row: &SpecDegRow, cutoffs: &SpecDegCutoffs) -> bool {
    row.log2_fold_change.abs() >= cutoffs.log2fc_min && row.adj_p_value < cutoffs.adj_pval_max
}

/// Filter `rows` down to the DEG subset, preserving input order.
///
/// Cutoffs are validated here, so out-of-domain values fail with
/// `InvalidParameter` instead of silently admitting or dropping rows.
pub fn apply_deg_cutoffs(
    rows: &[SpecDegRow],
    cutoffs: &SpecDegCutoffs,
) -> Result<Vec<SpecDegRow>, DegReportError> {
    apply_deg_cutoffs_where(rows, cutoffs, |_| true)
}

/// Filter with an extra caller-supplied predicate, preserving input order.
///
/// The extra predicate narrows the cutoff result and never widens it.
pub fn apply_deg_cutoffs_where<F>(
    rows: &[SpecDegRow],
    cutoffs: &SpecDegCutoffs,
    mut predicate: F,
) -> Result<Vec<SpecDegRow>, DegReportError>
where
    F: FnMut(&SpecDegRow) -> bool,
{
    validate_cutoffs(cutoffs)?;
    Ok(rows
        .iter()
        .filter(|row| is_deg_row(row, cutoffs) && predicate(row))
        .cloned()
        .collect())
}
