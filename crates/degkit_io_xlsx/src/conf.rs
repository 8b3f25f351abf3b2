//! XLSX constants and default preset factories.

use crate::spec::{EnumColumnKind, SpecCellFormat, SpecXlsxWriteOptions};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Named format presets keyed by column kind, plus the header format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxFormatPresets {
    /// Generic text cell format.
    pub fmt_text: SpecCellFormat,
    /// Integer number format.
    pub fmt_integer: SpecCellFormat,
    /// Decimal number format.
    pub fmt_decimal: SpecCellFormat,
    /// Scientific number format.
    pub fmt_scientific: SpecCellFormat,
    /// Header cell format.
    pub fmt_header: SpecCellFormat,
}

impl SpecXlsxFormatPresets {
    /// Resolve the body format for one column kind.
    pub fn for_kind(&self, kind: EnumColumnKind) -> &SpecCellFormat {
        match kind {
            EnumColumnKind::Text => &self.fmt_text,
            EnumColumnKind::Integer => &self.fmt_integer,
            EnumColumnKind::Decimal => &self.fmt_decimal,
            EnumColumnKind::Scientific => &self.fmt_scientific,
        }
    }
}

/// Build default format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> SpecXlsxFormatPresets {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Times New Roman".to_string()),
        font_size: Some(11),
        border: Some(1),
        align: Some("left".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    SpecXlsxFormatPresets {
        fmt_text: cfg_base_fmt_spec.clone(),
        fmt_integer: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0".to_string()),
            ..Default::default()
        }),
        fmt_decimal: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0.0000".to_string()),
            ..Default::default()
        }),
        fmt_scientific: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0.00E+0".to_string()),
            ..Default::default()
        }),
        fmt_header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            ..Default::default()
        }),
    }
}

/// Build default write options.
pub fn derive_default_xlsx_write_options() -> SpecXlsxWriteOptions {
    SpecXlsxWriteOptions::default()
}
