//! Shared XLSX specification models and error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification consumed by the writer kernel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

/// Normalized cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetTableSpecification

/// Declared column kind, selecting the format preset applied to body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumColumnKind {
    /// Text column (default).
    #[default]
    Text,
    /// Integer number column.
    Integer,
    /// Decimal number column.
    Decimal,
    /// Scientific-notation number column.
    Scientific,
}

/// One declared sheet column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetColumn {
    /// Header text, unique within the sheet.
    pub name: String,
    /// Column kind.
    pub kind: EnumColumnKind,
}

impl SpecSheetColumn {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, kind: EnumColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One logical sheet: name, typed columns, and a 2-D grid of body cells.
///
/// Every row must have exactly `columns.len()` cells; the writer validates
/// this before emitting anything.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetTable {
    /// Requested sheet name (validated, never rewritten).
    pub sheet_name: String,
    /// Declared columns, in sheet order.
    pub columns: Vec<SpecSheetColumn>,
    /// Body rows.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecSheetTable {
    /// Create an empty table for `sheet_name` with the given columns.
    pub fn new(sheet_name: impl Into<String>, columns: Vec<SpecSheetColumn>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows: Vec::new(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Value conversion policy for missing/NaN/Inf cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxValuePolicy {
    /// Replacement text for missing value when keep-missing is enabled.
    pub missing_value_str: String,
    /// Replacement text for NaN.
    pub nan_str: String,
    /// Replacement text for positive infinity.
    pub posinf_str: String,
    /// Replacement text for negative infinity.
    pub neginf_str: String,
}

impl Default for SpecXlsxValuePolicy {
    fn default() -> Self {
        Self {
            missing_value_str: "NA".to_string(),
            nan_str: "NaN".to_string(),
            posinf_str: "Inf".to_string(),
            neginf_str: "-Inf".to_string(),
        }
    }
}

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit.
    None,
    /// Infer width from header cells only.
    Header,
    /// Infer width from body cells only.
    Body,
    /// Infer width from both header and body cells (default).
    #[default]
    All,
}

/// Autofit policy for per-sheet write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::All,
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer-wide options controlling value conversion defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxWriteOptions {
    /// Value conversion policy.
    pub value_policy: SpecXlsxValuePolicy,
    /// Keep missing/NaN/Inf as replacement text instead of blank cells.
    pub keep_missing_values: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// One written sheet, as committed to the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetInfo {
    /// Sheet name in the workbook.
    pub sheet_name: String,
    /// Number of body rows written (header excluded).
    pub n_rows_data: usize,
    /// Number of columns written.
    pub n_cols: usize,
}

/// Per-workbook write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets written, in workbook order.
    pub sheets: Vec<SpecSheetInfo>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook write failures (validation / backend / destination stage).
#[derive(Debug)]
pub enum XlsxWriteError {
    /// Requested sheet name is unusable in the target format.
    SheetName {
        /// Offending sheet name as requested by the caller.
        sheet_name: String,
        /// Why the name was rejected.
        message: String,
    },
    /// Sheet table shape violates writer constraints.
    SheetShape(String),
    /// Backend failure while assembling the in-memory workbook.
    Workbook(String),
    /// Destination file could not be written.
    DestinationWrite {
        /// Destination path that failed.
        path: PathBuf,
        /// Underlying IO/backend error text.
        message: String,
    },
}

impl fmt::Display for XlsxWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SheetName {
                sheet_name,
                message,
            } => write!(f, "Invalid sheet name {sheet_name:?}: {message}"),
            Self::SheetShape(msg) => write!(f, "{msg}"),
            Self::Workbook(msg) => write!(f, "Workbook assembly failed: {msg}"),
            Self::DestinationWrite { path, message } => {
                write!(f, "Failed to write workbook {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for XlsxWriteError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
