//! `degkit_pipeline` v1:
//! End-to-end pipeline turning per-gene differential-expression statistics
//! into a multi-sheet XLSX summary workbook.
//!
//! Architecture:
//! - `conf`     : default presets and report schema constants
//! - `spec`     : data model, run options, errors
//! - `util`     : comparison keys and input validation
//! - `datagen`  : seeded synthetic statistics generator
//! - `filter`   : significance cutoff predicates
//! - `group`    : per-comparison partitioning and DEG count aggregation
//! - `workbook` : sheet assembly and workbook write
//! - `report`   : run report model
//! - `run`      : top-level orchestration
pub mod conf;
pub mod datagen;
pub mod filter;
pub mod group;
pub mod report;
pub mod run;
pub mod spec;
pub mod util;
pub mod workbook;

pub use conf::{derive_default_run_options, derive_demo_design};
pub use datagen::generate_deg_table;
pub use filter::{apply_deg_cutoffs, apply_deg_cutoffs_where, is_deg_row};
pub use group::{partition_by_comparison, summarize_deg_counts};
pub use report::ReportDegRun;
pub use run::run_deg_report;
pub use spec::{
    DegReportError, SpecDegCutoffs, SpecDegRow, SpecDesignGroup, SpecGeneAnnotation,
    SpecRunOptions, SpecSummaryRow,
};
pub use util::{derive_comparison_key, validate_cutoffs, validate_design};
pub use workbook::{build_comparison_sheet, build_summary_sheet, write_deg_workbook};
