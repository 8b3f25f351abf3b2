//! Default presets and report schema constants.

use std::path::PathBuf;

use crate::spec::{SpecDegCutoffs, SpecDesignGroup, SpecRunOptions};

/// Name of the leading summary sheet.
pub const NAME_SHEET_SUMMARY: &str = "summary";
/// Summary sheet comparison-key column header.
pub const NAME_COL_COMPARISON: &str = "comparison";
/// Summary sheet DEG count column header.
pub const NAME_COL_DEG_COUNT: &str = "DEGcount";
/// Gene identifier prefix used by the synthetic generator.
pub const PREFIX_GENE_ID: &str = "gene";
/// Separator between treatment and timepoint in a comparison key.
pub const SEP_COMPARISON_KEY: &str = "_";

/// Build the demo experimental design: two treatments crossed with two
/// timepoints, with one clearly null group and one clearly active group.
pub fn derive_demo_design() -> Vec<SpecDesignGroup> {
    vec![
        SpecDesignGroup {
            treatment: "A".to_string(),
            timepoint: 1,
            effect_sd: 2.0,
            frac_null: 0.5,
        },
        SpecDesignGroup {
            treatment: "A".to_string(),
            timepoint: 2,
            effect_sd: 2.0,
            frac_null: 0.7,
        },
        SpecDesignGroup {
            treatment: "B".to_string(),
            timepoint: 1,
            effect_sd: 0.5,
            frac_null: 0.9,
        },
        SpecDesignGroup {
            treatment: "B".to_string(),
            timepoint: 2,
            effect_sd: 3.0,
            frac_null: 0.3,
        },
    ]
}

/// Build default run options.
pub fn derive_default_run_options() -> SpecRunOptions {
    SpecRunOptions {
        n_per_group: 2000,
        seed: 42,
        cutoffs: SpecDegCutoffs {
            log2fc_min: 1.5,
            adj_pval_max: 0.05,
        },
        path_file_out: PathBuf::from("deg_summary.xlsx"),
    }
}
