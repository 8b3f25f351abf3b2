//! Stateless helper utilities used by the XLSX writer kernel.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{
    EnumCellValue, EnumColumnKind, SpecSheetColumn, SpecXlsxValuePolicy, XlsxWriteError,
};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNameValidation

/// Validate a requested sheet name against Excel naming constraints.
///
/// Invalid names are rejected, never sanitized: rewriting a name here could
/// silently collide with another sheet and names must stay unique.
pub fn validate_sheet_name(name: &str) -> Result<(), XlsxWriteError> {
    if name.trim().is_empty() {
        return Err(XlsxWriteError::SheetName {
            sheet_name: name.to_string(),
            message: "sheet name must be non-empty".to_string(),
        });
    }

    let n_len = name.chars().count();
    if n_len > N_LEN_EXCEL_SHEET_NAME_MAX {
        return Err(XlsxWriteError::SheetName {
            sheet_name: name.to_string(),
            message: format!(
                "sheet name has {n_len} characters; maximum is {N_LEN_EXCEL_SHEET_NAME_MAX}"
            ),
        });
    }

    for c_illegal in TUP_EXCEL_ILLEGAL {
        if name.contains(c_illegal) {
            return Err(XlsxWriteError::SheetName {
                sheet_name: name.to_string(),
                message: format!("sheet name contains illegal character {c_illegal:?}"),
            });
        }
    }

    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnValidation

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[SpecSheetColumn]) -> Result<(), XlsxWriteError> {
    let set_names: BTreeSet<&str> = columns.iter().map(|col| col.name.as_str()).collect();
    if columns.len() == set_names.len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, col) in columns.iter().enumerate() {
        dict_pos.entry(col.name.as_str()).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter_map(|(c_name, l_pos)| {
            if l_pos.len() > 1 {
                Some(format!("{c_name:?} x{} at indices {l_pos:?}", l_pos.len()))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(XlsxWriteError::SheetShape(format!(
        "Duplicate column names detected: {c_msg}"
    )))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Convert `NaN`/`Inf` to policy string; return error text for finite values.
pub fn convert_nan_inf_to_str(
    x: f64,
    value_policy: &SpecXlsxValuePolicy,
) -> Result<String, String> {
    if x.is_nan() {
        return Ok(value_policy.nan_str.clone());
    }
    if x.is_infinite() {
        return Ok(if x.is_sign_positive() {
            value_policy.posinf_str.clone()
        } else {
            value_policy.neginf_str.clone()
        });
    }
    Err("Input is neither NaN nor Inf.".to_string())
}

/// Normalize a cell value according to its column kind and value policy.
pub fn convert_cell_value(
    value: &EnumCellValue,
    kind: EnumColumnKind,
    if_keep_missing_values: bool,
    value_policy: &SpecXlsxValuePolicy,
) -> EnumCellValue {
    match value {
        EnumCellValue::None => {
            if if_keep_missing_values {
                EnumCellValue::String(value_policy.missing_value_str.clone())
            } else {
                EnumCellValue::None
            }
        }
        EnumCellValue::String(s) => {
            if kind == EnumColumnKind::Text {
                return EnumCellValue::String(s.clone());
            }
            match s.parse::<f64>() {
                Ok(v) if v.is_finite() => EnumCellValue::Number(v),
                _ => EnumCellValue::String(s.clone()),
            }
        }
        EnumCellValue::Number(n) => {
            if !n.is_finite() {
                return if if_keep_missing_values {
                    EnumCellValue::String(
                        convert_nan_inf_to_str(*n, value_policy)
                            .unwrap_or_else(|_| value_policy.nan_str.clone()),
                    )
                } else {
                    EnumCellValue::None
                };
            }
            if kind == EnumColumnKind::Text {
                return EnumCellValue::String(n.to_string());
            }
            EnumCellValue::Number(*n)
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthEstimation

/// Estimate displayed width units for one normalized cell value.
///
/// Used by autofit inference logic.
pub fn estimate_width_len(
    value: &EnumCellValue,
    kind: EnumColumnKind,
    if_keep_missing_values: bool,
    value_policy: &SpecXlsxValuePolicy,
) -> usize {
    match value {
        EnumCellValue::None => {
            if if_keep_missing_values {
                value_policy.missing_value_str.len()
            } else {
                0
            }
        }
        EnumCellValue::String(s) => estimate_unicode_string_width(s),
        EnumCellValue::Number(n) => match kind {
            EnumColumnKind::Scientific => format!("{n:.2E}").len(),
            EnumColumnKind::Integer => (*n as i64).to_string().len(),
            EnumColumnKind::Decimal => format!("{n:.4}").len(),
            EnumColumnKind::Text => estimate_unicode_string_width(&n.to_string()),
        },
    }
}

fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
