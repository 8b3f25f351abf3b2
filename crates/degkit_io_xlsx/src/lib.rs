//! `degkit_io_xlsx` v1:
//! Multi-sheet XLSX writer kernel for fixed-schema report tables.
//!
//! Architecture:
//! - `conf`   : Excel constants and default presets
//! - `spec`   : specs/models/options/errors
//! - `util`   : pure helper functions
//! - `writer` : buffered workbook writer kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, SpecXlsxFormatPresets,
    TUP_EXCEL_ILLEGAL, derive_default_xlsx_formats, derive_default_xlsx_write_options,
};
pub use spec::{
    EnumAutofitColumnsRule, EnumCellValue, EnumColumnKind, SpecAutofitCellsPolicy, SpecCellFormat,
    SpecSheetColumn, SpecSheetInfo, SpecSheetTable, SpecXlsxReport, SpecXlsxValuePolicy,
    SpecXlsxWriteOptions, XlsxWriteError,
};
pub use util::{
    convert_cell_value, convert_nan_inf_to_str, estimate_width_len, validate_sheet_name,
    validate_unique_columns,
};
pub use writer::{SpecXlsxSheetWriteOptions, XlsxWriter, write_workbook};
