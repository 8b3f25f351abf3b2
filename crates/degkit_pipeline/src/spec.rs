//! Data model, run options, and pipeline error type.

use std::fmt;
use std::path::PathBuf;

use degkit_io_xlsx::XlsxWriteError;

////////////////////////////////////////////////////////////////////////////////
// #region DesignSpecification

/// One experimental group in the synthetic design.
///
/// A (`treatment`, `timepoint`) pair identifies one comparison; the remaining
/// fields shape the statistics drawn for its genes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDesignGroup {
    /// Treatment label.
    pub treatment: String,
    /// Timepoint value.
    pub timepoint: i64,
    /// Standard deviation of the log2 fold change distribution. Must be
    /// non-negative; zero collapses all effects to exactly zero.
    pub effect_sd: f64,
    /// Fraction of the adjusted p-value range reserved above the draw
    /// interval. Draws are uniform on `[0, 1 - frac_null]`. Must lie in
    /// `[0, 1]`.
    pub frac_null: f64,
}

/// Significance cutoffs applied to every row.
///
/// A row is a DEG when `|log2_fold_change| >= log2fc_min` and
/// `adj_p_value < adj_pval_max`. Note the asymmetry: the effect bound is
/// inclusive, the p-value bound is exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecDegCutoffs {
    /// Minimum absolute log2 fold change (inclusive).
    pub log2fc_min: f64,
    /// Maximum adjusted p-value (exclusive).
    pub adj_pval_max: f64,
}

/// Full-run options.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRunOptions {
    /// Genes generated per design group.
    pub n_per_group: usize,
    /// RNG seed; identical seeds reproduce identical tables.
    pub seed: u64,
    /// Significance cutoffs.
    pub cutoffs: SpecDegCutoffs,
    /// Output workbook path.
    pub path_file_out: PathBuf,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowSpecification

/// One per-gene differential-expression record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDegRow {
    /// Gene identifier.
    pub gene_id: String,
    /// Treatment label of the originating comparison.
    pub treatment: String,
    /// Timepoint of the originating comparison.
    pub timepoint: i64,
    /// Estimated log2 fold change.
    pub log2_fold_change: f64,
    /// Multiple-testing adjusted p-value.
    pub adj_p_value: f64,
}

/// One summary sheet row: comparison key and its DEG count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSummaryRow {
    /// Comparison key, `{treatment}_{timepoint}`.
    pub comparison: String,
    /// Number of rows passing the cutoffs for this comparison.
    pub cnt_deg: u64,
}

/// Optional per-gene annotation joined into comparison sheets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecGeneAnnotation {
    /// Human-readable gene symbol.
    pub gene_name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Pipeline failures.
#[derive(Debug)]
pub enum DegReportError {
    /// Design or option validation failure.
    InvalidParameter(String),
    /// A comparison key is unusable as a sheet name.
    SheetName {
        /// Offending sheet name.
        sheet_name: String,
        /// Why the name was rejected.
        message: String,
    },
    /// Workbook assembly failure.
    Workbook(String),
    /// Output file could not be written.
    DestinationWrite {
        /// Destination path that failed.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
}

impl fmt::Display for DegReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Self::SheetName {
                sheet_name,
                message,
            } => write!(f, "Invalid sheet name {sheet_name:?}: {message}"),
            Self::Workbook(msg) => write!(f, "Workbook assembly failed: {msg}"),
            Self::DestinationWrite { path, message } => {
                write!(f, "Failed to write workbook {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for DegReportError {}

impl From<XlsxWriteError> for DegReportError {
    fn from(err: XlsxWriteError) -> Self {
        match err {
            XlsxWriteError::SheetName {
                sheet_name,
                message,
            } => Self::SheetName {
                sheet_name,
                message,
            },
            XlsxWriteError::SheetShape(msg) | XlsxWriteError::Workbook(msg) => Self::Workbook(msg),
            XlsxWriteError::DestinationWrite { path, message } => {
                Self::DestinationWrite { path, message }
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_name_error_converts_from_writer_error() {
        let err_writer = XlsxWriteError::SheetName {
            sheet_name: "A".repeat(40),
            message: "too long".to_string(),
        };
        let err: DegReportError = err_writer.into();
        assert!(matches!(err, DegReportError::SheetName { .. }));
    }

    #[test]
    fn display_includes_offending_path() {
        let err = DegReportError::DestinationWrite {
            path: PathBuf::from("/tmp/out.xlsx"),
            message: "permission denied".to_string(),
        };
        let c_msg = err.to_string();
        assert!(c_msg.contains("/tmp/out.xlsx"));
        assert!(c_msg.contains("permission denied"));
    }
}
