//! Buffered workbook writer kernel.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::conf::{
    N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, SpecXlsxFormatPresets, derive_default_xlsx_formats,
    derive_default_xlsx_write_options,
};
use crate::spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetInfo,
    SpecSheetTable, SpecXlsxReport, SpecXlsxWriteOptions, XlsxWriteError,
};
use crate::util::{
    convert_cell_value, estimate_width_len, validate_sheet_name, validate_unique_columns,
};

/// Per-sheet call options.
#[derive(Default, Debug, Clone)]
pub struct SpecXlsxSheetWriteOptions {
    /// Number of frozen columns.
    pub col_freeze: usize,
    /// Frozen row index; defaults to the single header row when `None`.
    pub row_freeze: Option<usize>,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called, so a
/// rejected sheet never leaves a partial file at the destination.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_presets: SpecXlsxFormatPresets,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path with explicit format/options presets.
    pub fn new(
        path_file_out: PathBuf,
        fmt_presets: SpecXlsxFormatPresets,
        write_options: SpecXlsxWriteOptions,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_presets,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Create writer with default presets.
    pub fn with_default_presets(path_file_out: PathBuf) -> Self {
        Self::new(
            path_file_out,
            derive_default_xlsx_formats(),
            derive_default_xlsx_write_options(),
        )
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of the write report so far.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(|err| XlsxWriteError::DestinationWrite {
                path: self.path_file_out.clone(),
                message: err.to_string(),
            })?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one sheet from an in-memory table.
    ///
    /// Validates the sheet name, column uniqueness, and grid shape before any
    /// cell is emitted. Duplicate sheet names are rejected, not suffixed.
    pub fn write_sheet(
        &mut self,
        table: &SpecSheetTable,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Err(XlsxWriteError::Workbook(
                "Cannot write after close().".to_string(),
            ));
        }

        validate_sheet_name(&table.sheet_name)?;
        if self.set_sheet_names_existing.contains(&table.sheet_name) {
            return Err(XlsxWriteError::SheetName {
                sheet_name: table.sheet_name.clone(),
                message: "sheet name already used in this workbook".to_string(),
            });
        }
        validate_unique_columns(&table.columns)?;

        let n_cols = table.columns.len();
        if n_cols == 0 {
            return Err(XlsxWriteError::SheetShape(format!(
                "Sheet {:?} declares no columns.",
                table.sheet_name
            )));
        }
        if n_cols > N_NCOLS_EXCEL_MAX {
            return Err(XlsxWriteError::SheetShape(format!(
                "Sheet {:?} has {n_cols} columns; Excel limit is {N_NCOLS_EXCEL_MAX}.",
                table.sheet_name
            )));
        }
        // One header row plus body must fit in a single worksheet.
        if table.rows.len() + 1 > N_NROWS_EXCEL_MAX {
            return Err(XlsxWriteError::SheetShape(format!(
                "Sheet {:?} has {} body rows; Excel limit is {} including the header.",
                table.sheet_name,
                table.rows.len(),
                N_NROWS_EXCEL_MAX
            )));
        }
        for (n_idx_row, row) in table.rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(XlsxWriteError::SheetShape(format!(
                    "Sheet {:?} row {n_idx_row} has {} cells; expected {n_cols}.",
                    table.sheet_name,
                    row.len()
                )));
            }
        }

        let if_keep_missing_values = self.write_options.keep_missing_values;
        let value_policy = self.write_options.value_policy.clone();

        let l_fmt_data_by_col: Vec<Format> = table
            .columns
            .iter()
            .map(|col| derive_rust_xlsx_format(self.fmt_presets.for_kind(col.kind)))
            .collect();
        let fmt_header = derive_rust_xlsx_format(&self.fmt_presets.fmt_header);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&table.sheet_name)
            .map_err(derive_xlsx_error)?;

        let mut l_width_by_col_header = vec![0usize; n_cols];
        let mut l_width_by_col_body = vec![0usize; n_cols];
        let if_autofit_columns = !matches!(
            options.policy_autofit.rule_columns,
            EnumAutofitColumnsRule::None
        );

        for (n_idx_col, col) in table.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, &col.name, &fmt_header)
                .map_err(derive_xlsx_error)?;
            if if_autofit_columns {
                l_width_by_col_header[n_idx_col] = estimate_width_len(
                    &EnumCellValue::String(col.name.clone()),
                    col.kind,
                    if_keep_missing_values,
                    &value_policy,
                );
            }
        }

        let n_row_freeze = options.row_freeze.unwrap_or(1);
        worksheet
            .set_freeze_panes(cast_row_num(n_row_freeze)?, cast_col_num(options.col_freeze)?)
            .map_err(derive_xlsx_error)?;

        for (n_idx_row, row) in table.rows.iter().enumerate() {
            for (n_idx_col, value_raw) in row.iter().enumerate() {
                let kind = table.columns[n_idx_col].kind;
                let value = convert_cell_value(
                    value_raw,
                    kind,
                    if_keep_missing_values,
                    &value_policy,
                );

                if if_autofit_columns {
                    l_width_by_col_body[n_idx_col] = usize::max(
                        l_width_by_col_body[n_idx_col],
                        estimate_width_len(&value, kind, if_keep_missing_values, &value_policy),
                    );
                }

                write_cell_with_format(
                    worksheet,
                    n_idx_row + 1,
                    n_idx_col,
                    &value,
                    &l_fmt_data_by_col[n_idx_col],
                )?;
            }
        }

        if if_autofit_columns {
            let n_min = usize::max(1, options.policy_autofit.width_cell_min);
            let n_max = usize::min(
                255,
                usize::max(n_min, options.policy_autofit.width_cell_max),
            );
            let n_pad = options.policy_autofit.width_cell_padding;

            for n_idx_col in 0..n_cols {
                let n_width_recorded = match options.policy_autofit.rule_columns {
                    EnumAutofitColumnsRule::Header => l_width_by_col_header[n_idx_col],
                    EnumAutofitColumnsRule::Body => l_width_by_col_body[n_idx_col],
                    EnumAutofitColumnsRule::All | EnumAutofitColumnsRule::None => usize::max(
                        l_width_by_col_header[n_idx_col],
                        l_width_by_col_body[n_idx_col],
                    ),
                };
                let n_width_final = usize::min(n_max, usize::max(n_min, n_width_recorded + n_pad));
                worksheet
                    .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
                    .map_err(derive_xlsx_error)?;
            }
        }

        self.set_sheet_names_existing
            .insert(table.sheet_name.clone());
        self.report.sheets.push(SpecSheetInfo {
            sheet_name: table.sheet_name.clone(),
            n_rows_data: table.rows.len(),
            n_cols,
        });
        Ok(())
    }
}

/// Write a complete workbook in one call.
///
/// All sheet names are validated up front (including cross-sheet uniqueness)
/// so that a late name failure cannot leave a usable-looking partial file;
/// only after every sheet is assembled in memory is the destination written.
pub fn write_workbook(
    tables: &[SpecSheetTable],
    path_file_out: &Path,
) -> Result<SpecXlsxReport, XlsxWriteError> {
    let mut set_names_seen: BTreeSet<&str> = BTreeSet::new();
    for table in tables {
        validate_sheet_name(&table.sheet_name)?;
        if !set_names_seen.insert(table.sheet_name.as_str()) {
            return Err(XlsxWriteError::SheetName {
                sheet_name: table.sheet_name.clone(),
                message: "sheet name already used in this workbook".to_string(),
            });
        }
    }

    let mut writer = XlsxWriter::with_default_presets(path_file_out.to_path_buf());
    let options = SpecXlsxSheetWriteOptions::default();
    for table in tables {
        writer.write_sheet(table, &options)?;
    }
    writer.close()?;
    Ok(writer.report())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxWriteError> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(cast_row_num(row_idx)?, cast_col_num(col_idx)?, val, format)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxWriteError> {
    u32::try_from(value)
        .map_err(|_| XlsxWriteError::SheetShape(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxWriteError> {
    u16::try_from(value)
        .map_err(|_| XlsxWriteError::SheetShape(format!("column index overflow: {value}")))
}

fn derive_xlsx_error(err: XlsxError) -> XlsxWriteError {
    XlsxWriteError::Workbook(err.to_string())
}
