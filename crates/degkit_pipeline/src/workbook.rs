//! Sheet assembly and workbook write.

use std::collections::BTreeMap;
use std::path::Path;

use degkit_io_xlsx::{
    EnumCellValue, EnumColumnKind, SpecSheetColumn, SpecSheetTable, SpecXlsxReport, write_workbook,
};

use crate::conf::{NAME_COL_COMPARISON, NAME_COL_DEG_COUNT, NAME_SHEET_SUMMARY};
use crate::group::summarize_deg_counts;
use crate::spec::{DegReportError, SpecDegRow, SpecGeneAnnotation, SpecSummaryRow};

////////////////////////////////////////////////////////////////////////////////
// #region SheetAssembly

/// Build the summary sheet table from pre-aggregated counts.
pub fn build_summary_sheet(rows: &[SpecSummaryRow]) -> SpecSheetTable {
    let mut table = SpecSheetTable::new(
        NAME_SHEET_SUMMARY,
        vec![
            SpecSheetColumn::new(NAME_COL_COMPARISON, EnumColumnKind::Text),
            SpecSheetColumn::new(NAME_COL_DEG_COUNT, EnumColumnKind::Integer),
        ],
    );
    for row in rows {
        table.rows.push(vec![
            EnumCellValue::String(row.comparison.clone()),
            EnumCellValue::Number(row.cnt_deg as f64),
        ]);
    }
    table
}

/// Build one comparison sheet table.
///
/// `annotations` is joined by `gene_id`; genes without an annotation get
/// blank `gene_name`/`description` cells. When the lookup is empty the two
/// annotation columns are omitted entirely.
pub fn build_comparison_sheet(
    comparison: &str,
    rows: &[SpecDegRow],
    annotations: &BTreeMap<String, SpecGeneAnnotation>,
) -> SpecSheetTable {
    let if_annotated = !annotations.is_empty();

    let mut l_columns = vec![
        SpecSheetColumn::new("gene_id", EnumColumnKind::Text),
        SpecSheetColumn::new("treatment", EnumColumnKind::Text),
        SpecSheetColumn::new("timepoint", EnumColumnKind::Integer),
        SpecSheetColumn::new("log2_fold_change", EnumColumnKind::Decimal),
        SpecSheetColumn::new("adj_p_value", EnumColumnKind::Scientific),
    ];
    if if_annotated {
        l_columns.push(SpecSheetColumn::new("gene_name", EnumColumnKind::Text));
        l_columns.push(SpecSheetColumn::new("description", EnumColumnKind::Text));
    }
    let mut table = SpecSheetTable::new(comparison, l_columns);

    for row in rows {
        let mut l_cells = vec![
            EnumCellValue::String(row.gene_id.clone()),
            EnumCellValue::String(row.treatment.clone()),
            EnumCellValue::Number(row.timepoint as f64),
            EnumCellValue::Number(row.log2_fold_change),
            EnumCellValue::Number(row.adj_p_value),
        ];
        if if_annotated {
            let annotation = annotations.get(&row.gene_id);
            let derive_opt_cell = |value: Option<&String>| match value {
                Some(val) => EnumCellValue::String(val.clone()),
                None => EnumCellValue::None,
            };
            l_cells.push(derive_opt_cell(annotation.and_then(|a| a.gene_name.as_ref())));
            l_cells.push(derive_opt_cell(annotation.and_then(|a| a.description.as_ref())));
        }
        table.rows.push(l_cells);
    }

    table
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WorkbookWrite

/// Write the full DEG workbook: the summary sheet first, then one sheet per
/// comparison in ascending key order.
///
/// Summary counts are derived from `groups` itself, so each count equals the
/// row count of its sheet. Any rejected sheet name fails the whole write and
/// leaves no file at `path_file_out`.
pub fn write_deg_workbook(
    groups: &BTreeMap<String, Vec<SpecDegRow>>,
    annotations: &BTreeMap<String, SpecGeneAnnotation>,
    path_file_out: &Path,
) -> Result<SpecXlsxReport, DegReportError> {
    let l_summary = summarize_deg_counts(groups);

    let mut l_tables: Vec<SpecSheetTable> = Vec::with_capacity(groups.len() + 1);
    l_tables.push(build_summary_sheet(&l_summary));
    for (c_key, l_rows) in groups {
        l_tables.push(build_comparison_sheet(c_key, l_rows, annotations));
    }

    let report = write_workbook(&l_tables, path_file_out)?;
    Ok(report)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_test_row(gene_id: &str) -> SpecDegRow {
        SpecDegRow {
            gene_id: gene_id.to_string(),
            treatment: "A".to_string(),
            timepoint: 1,
            log2_fold_change: 2.0,
            adj_p_value: 0.001,
        }
    }

    #[test]
    fn summary_sheet_has_expected_schema() {
        let table = build_summary_sheet(&[SpecSummaryRow {
            comparison: "A_1".to_string(),
            cnt_deg: 3,
        }]);
        assert_eq!(table.sheet_name, "summary");
        assert_eq!(table.columns[0].name, "comparison");
        assert_eq!(table.columns[1].name, "DEGcount");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], EnumCellValue::Number(3.0));
    }

    #[test]
    fn comparison_sheet_joins_annotations_and_blanks_missing() {
        let mut dict_annotations = BTreeMap::new();
        dict_annotations.insert(
            "gene1".to_string(),
            SpecGeneAnnotation {
                gene_name: Some("TP53".to_string()),
                description: None,
            },
        );

        let table = build_comparison_sheet(
            "A_1",
            &[derive_test_row("gene1"), derive_test_row("gene2")],
            &dict_annotations,
        );

        assert_eq!(table.sheet_name, "A_1");
        assert_eq!(table.columns.len(), 7);
        // gene1: annotated name, missing description.
        assert_eq!(table.rows[0][5], EnumCellValue::String("TP53".to_string()));
        assert_eq!(table.rows[0][6], EnumCellValue::None);
        // gene2: no annotation at all.
        assert_eq!(table.rows[1][5], EnumCellValue::None);
        assert_eq!(table.rows[1][6], EnumCellValue::None);
    }

    #[test]
    fn comparison_sheet_omits_annotation_columns_without_lookup() {
        let table = build_comparison_sheet("A_1", &[derive_test_row("gene1")], &BTreeMap::new());

        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.columns.last().map(|col| col.name.as_str()), Some("adj_p_value"));
        assert_eq!(table.rows[0].len(), 5);
    }

    #[test]
    fn workbook_summary_counts_match_group_sizes() {
        let mut dict_groups: BTreeMap<String, Vec<SpecDegRow>> = BTreeMap::new();
        dict_groups.insert("A_1".to_string(), vec![derive_test_row("gene1")]);
        dict_groups.insert(
            "B_2".to_string(),
            vec![derive_test_row("gene1"), derive_test_row("gene2")],
        );

        let l_summary = summarize_deg_counts(&dict_groups);
        let table = build_summary_sheet(&l_summary);
        assert_eq!(table.rows[0][0], EnumCellValue::String("A_1".to_string()));
        assert_eq!(table.rows[0][1], EnumCellValue::Number(1.0));
        assert_eq!(table.rows[1][0], EnumCellValue::String("B_2".to_string()));
        assert_eq!(table.rows[1][1], EnumCellValue::Number(2.0));
    }
}
