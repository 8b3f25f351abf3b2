//! Run report model.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Counters describing one completed report run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportDegRun {
    /// Rows generated across all design groups.
    pub cnt_rows_generated: u64,
    /// Rows passing the significance cutoffs.
    pub cnt_rows_deg: u64,
    /// Distinct comparisons among the DEG rows.
    pub cnt_comparisons: u64,
    /// Sheets written to the workbook, summary included.
    pub cnt_sheets_written: u64,
    /// Output workbook path.
    pub path_file_out: PathBuf,
}

impl ReportDegRun {
    /// Convert the report to an ordered key/value map.
    pub fn to_dict(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "cnt_rows_generated".to_string(),
                self.cnt_rows_generated.to_string(),
            ),
            ("cnt_rows_deg".to_string(), self.cnt_rows_deg.to_string()),
            (
                "cnt_comparisons".to_string(),
                self.cnt_comparisons.to_string(),
            ),
            (
                "cnt_sheets_written".to_string(),
                self.cnt_sheets_written.to_string(),
            ),
            (
                "path_file_out".to_string(),
                self.path_file_out.to_string_lossy().to_string(),
            ),
        ])
    }

    /// Format the report as one prefixed line per counter.
    pub fn format(&self, prefix: &str) -> String {
        self.to_dict()
            .iter()
            .map(|(c_key, c_val)| format!("{prefix} {c_key}: {c_val}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ReportDegRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[DEG]"))
    }
}
