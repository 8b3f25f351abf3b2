//! Comparison keys and input validation.

use std::collections::BTreeSet;

use crate::conf::SEP_COMPARISON_KEY;
use crate::spec::{DegReportError, SpecDegCutoffs, SpecDesignGroup};

/// Derive the comparison key for a (`treatment`, `timepoint`) pair.
///
/// This key names the workbook sheet for the comparison and the `comparison`
/// cell on the summary sheet; both must be derived here so they stay equal.
pub fn derive_comparison_key(treatment: &str, timepoint: i64) -> String {
    format!("{treatment}{SEP_COMPARISON_KEY}{timepoint}")
}

/// Validate an experimental design.
pub fn validate_design(design: &[SpecDesignGroup]) -> Result<(), DegReportError> {
    if design.is_empty() {
        return Err(DegReportError::InvalidParameter(
            "design must contain at least one group".to_string(),
        ));
    }

    let mut set_keys: BTreeSet<String> = BTreeSet::new();
    for group in design {
        if group.treatment.trim().is_empty() {
            return Err(DegReportError::InvalidParameter(
                "treatment label must be non-empty".to_string(),
            ));
        }
        if !group.effect_sd.is_finite() || group.effect_sd < 0.0 {
            return Err(DegReportError::InvalidParameter(format!(
                "effect_sd must be finite and non-negative; got {} for group {:?}/{}",
                group.effect_sd, group.treatment, group.timepoint
            )));
        }
        if !group.frac_null.is_finite() || !(0.0..=1.0).contains(&group.frac_null) {
            return Err(DegReportError::InvalidParameter(format!(
                "frac_null must lie in [0, 1]; got {} for group {:?}/{}",
                group.frac_null, group.treatment, group.timepoint
            )));
        }
        let c_key = derive_comparison_key(&group.treatment, group.timepoint);
        if !set_keys.insert(c_key.clone()) {
            return Err(DegReportError::InvalidParameter(format!(
                "duplicate comparison {c_key:?} in design"
            )));
        }
    }

    Ok(())
}

/// Validate significance cutoffs.
pub fn validate_cutoffs(cutoffs: &SpecDegCutoffs) -> Result<(), DegReportError> {
    if !cutoffs.log2fc_min.is_finite() || cutoffs.log2fc_min < 0.0 {
        return Err(DegReportError::InvalidParameter(format!(
            "log2fc_min must be finite and non-negative; got {}",
            cutoffs.log2fc_min
        )));
    }
    if !cutoffs.adj_pval_max.is_finite() || !(0.0..=1.0).contains(&cutoffs.adj_pval_max) {
        return Err(DegReportError::InvalidParameter(format!(
            "adj_pval_max must lie in [0, 1]; got {}",
            cutoffs.adj_pval_max
        )));
    }
    Ok(())
}
