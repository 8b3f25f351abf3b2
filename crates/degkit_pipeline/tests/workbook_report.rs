//! End-to-end workbook tests with readback verification.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use degkit_pipeline::{
    DegReportError, SpecDegCutoffs, SpecDesignGroup, SpecGeneAnnotation, SpecRunOptions,
    derive_demo_design, run_deg_report,
};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new() -> Self {
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("degkit_pipeline_test_{n}"));
        std::fs::create_dir_all(&path).expect("create test dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn derive_test_options(path_file_out: PathBuf) -> SpecRunOptions {
    SpecRunOptions {
        n_per_group: 200,
        seed: 42,
        cutoffs: SpecDegCutoffs {
            log2fc_min: 1.5,
            adj_pval_max: 0.05,
        },
        path_file_out,
    }
}

#[test]
fn workbook_layout_summary_first_then_sorted_comparisons() {
    let tmp = TestDir::new();
    let path_file_out = tmp.path().join("layout.xlsx");
    let options = derive_test_options(path_file_out.clone());

    let report = run_deg_report(&derive_demo_design(), &BTreeMap::new(), &options)
        .expect("run pipeline");
    assert!(path_file_out.exists());

    let book = umya_spreadsheet::reader::xlsx::read(&path_file_out).expect("read workbook");
    let l_names: Vec<String> = book
        .get_sheet_collection()
        .iter()
        .map(|ws| ws.get_name().to_string())
        .collect();

    assert_eq!(l_names[0], "summary");
    let l_comparisons = &l_names[1..];
    let mut l_sorted = l_comparisons.to_vec();
    l_sorted.sort();
    assert_eq!(l_comparisons, l_sorted.as_slice());
    assert_eq!(report.cnt_sheets_written as usize, l_names.len());
}

#[test]
fn summary_counts_match_comparison_sheet_row_counts() {
    let tmp = TestDir::new();
    let path_file_out = tmp.path().join("counts.xlsx");
    let options = derive_test_options(path_file_out.clone());

    let report = run_deg_report(&derive_demo_design(), &BTreeMap::new(), &options)
        .expect("run pipeline");

    let book = umya_spreadsheet::reader::xlsx::read(&path_file_out).expect("read workbook");
    let ws_summary = book.get_sheet_by_name("summary").expect("summary sheet");

    assert_eq!(ws_summary.get_value((1, 1)), "comparison");
    assert_eq!(ws_summary.get_value((2, 1)), "DEGcount");

    let n_rows_summary = ws_summary.get_highest_row();
    assert!(n_rows_summary > 1, "demo design must yield DEGs");
    let mut cnt_deg_total: u64 = 0;
    for n_row in 2..=n_rows_summary {
        let c_comparison = ws_summary.get_value((1, n_row));
        let cnt_deg: u32 = ws_summary
            .get_value((2, n_row))
            .parse()
            .expect("integer DEG count");
        cnt_deg_total += u64::from(cnt_deg);

        let ws_comparison = book
            .get_sheet_by_name(&c_comparison)
            .expect("comparison sheet named on summary");
        // Header row plus one row per DEG.
        assert_eq!(ws_comparison.get_highest_row(), cnt_deg + 1);
        assert_eq!(ws_comparison.get_value((1, 1)), "gene_id");
        assert_eq!(ws_comparison.get_value((4, 1)), "log2_fold_change");
        assert_eq!(ws_comparison.get_value((5, 1)), "adj_p_value");
    }

    // The partition covers every filtered row: summary counts sum to the
    // DEG total, so no row is dropped between filter and workbook.
    assert_eq!(cnt_deg_total, report.cnt_rows_deg);
}

#[test]
fn impossible_cutoff_leaves_only_empty_summary() {
    let tmp = TestDir::new();
    let path_file_out = tmp.path().join("empty.xlsx");
    let mut options = derive_test_options(path_file_out.clone());
    options.cutoffs.log2fc_min = 1e9;

    let report = run_deg_report(&derive_demo_design(), &BTreeMap::new(), &options)
        .expect("run pipeline");
    assert_eq!(report.cnt_rows_deg, 0);
    assert_eq!(report.cnt_sheets_written, 1);

    let book = umya_spreadsheet::reader::xlsx::read(&path_file_out).expect("read workbook");
    assert_eq!(book.get_sheet_collection().len(), 1);
    let ws_summary = book.get_sheet_by_name("summary").expect("summary sheet");
    // Header only.
    assert_eq!(ws_summary.get_highest_row(), 1);
}

#[test]
fn overlong_comparison_key_fails_and_leaves_no_file() {
    let tmp = TestDir::new();
    let path_file_out = tmp.path().join("overlong.xlsx");
    let mut options = derive_test_options(path_file_out.clone());
    // Admit every row so the offending comparison is guaranteed a sheet.
    options.cutoffs = SpecDegCutoffs {
        log2fc_min: 0.0,
        adj_pval_max: 1.0,
    };

    let l_design = vec![SpecDesignGroup {
        treatment: "t".repeat(31),
        timepoint: 1,
        effect_sd: 1.0,
        frac_null: 0.5,
    }];

    let err = run_deg_report(&l_design, &BTreeMap::new(), &options)
        .expect_err("comparison key over 31 chars must fail");
    assert!(matches!(err, DegReportError::SheetName { .. }));
    assert!(!path_file_out.exists());
}

#[test]
fn illegal_character_in_treatment_fails() {
    let tmp = TestDir::new();
    let path_file_out = tmp.path().join("illegal.xlsx");
    let mut options = derive_test_options(path_file_out.clone());
    options.cutoffs = SpecDegCutoffs {
        log2fc_min: 0.0,
        adj_pval_max: 1.0,
    };

    let l_design = vec![SpecDesignGroup {
        treatment: "A/B".to_string(),
        timepoint: 1,
        effect_sd: 1.0,
        frac_null: 0.5,
    }];

    let err = run_deg_report(&l_design, &BTreeMap::new(), &options)
        .expect_err("slash in treatment must fail");
    assert!(matches!(err, DegReportError::SheetName { .. }));
    assert!(!path_file_out.exists());
}

#[test]
fn identical_seeds_yield_identical_run_reports() {
    let tmp = TestDir::new();
    let options_a = derive_test_options(tmp.path().join("seed_a.xlsx"));
    let options_b = derive_test_options(tmp.path().join("seed_b.xlsx"));

    let l_design = derive_demo_design();
    let report_a = run_deg_report(&l_design, &BTreeMap::new(), &options_a).expect("run a");
    let report_b = run_deg_report(&l_design, &BTreeMap::new(), &options_b).expect("run b");

    assert_eq!(report_a.cnt_rows_generated, report_b.cnt_rows_generated);
    assert_eq!(report_a.cnt_rows_deg, report_b.cnt_rows_deg);
    assert_eq!(report_a.cnt_comparisons, report_b.cnt_comparisons);
    assert_eq!(report_a.cnt_sheets_written, report_b.cnt_sheets_written);
}

#[test]
fn annotations_appear_on_comparison_sheets() {
    let tmp = TestDir::new();
    let path_file_out = tmp.path().join("annotated.xlsx");
    let mut options = derive_test_options(path_file_out.clone());
    options.cutoffs = SpecDegCutoffs {
        log2fc_min: 0.0,
        adj_pval_max: 1.0,
    };
    options.n_per_group = 3;

    let l_design = vec![SpecDesignGroup {
        treatment: "A".to_string(),
        timepoint: 1,
        effect_sd: 1.0,
        frac_null: 0.5,
    }];
    let mut dict_annotations = BTreeMap::new();
    dict_annotations.insert(
        "gene1".to_string(),
        SpecGeneAnnotation {
            gene_name: Some("TP53".to_string()),
            description: Some("tumor protein p53".to_string()),
        },
    );

    run_deg_report(&l_design, &dict_annotations, &options).expect("run pipeline");

    let book = umya_spreadsheet::reader::xlsx::read(&path_file_out).expect("read workbook");
    let ws = book.get_sheet_by_name("A_1").expect("comparison sheet");
    assert_eq!(ws.get_value((6, 1)), "gene_name");
    assert_eq!(ws.get_value((6, 2)), "TP53");
    assert_eq!(ws.get_value((7, 2)), "tumor protein p53");
    // Unannotated genes stay blank.
    assert_eq!(ws.get_value((6, 3)), "");
}
