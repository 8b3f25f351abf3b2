//! `degkit` command-line entry point.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use degkit_pipeline::{
    SpecDegCutoffs, SpecRunOptions, derive_default_run_options, derive_demo_design, run_deg_report,
};

/// Generate a synthetic differential-expression summary workbook.
#[derive(Parser, Debug)]
#[command(name = "degkit", version, about)]
struct Cli {
    /// Genes generated per design group.
    #[arg(long, default_value_t = 2000)]
    n_per_group: usize,

    /// RNG seed; identical seeds reproduce identical workbooks.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Minimum absolute log2 fold change (inclusive).
    #[arg(long, default_value_t = 1.5)]
    log2fc_cut: f64,

    /// Maximum adjusted p-value (exclusive).
    #[arg(long, default_value_t = 0.05)]
    adj_pval_cut: f64,

    /// Output workbook path.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let options_default = derive_default_run_options();
    let options = SpecRunOptions {
        n_per_group: cli.n_per_group,
        seed: cli.seed,
        cutoffs: SpecDegCutoffs {
            log2fc_min: cli.log2fc_cut,
            adj_pval_max: cli.adj_pval_cut,
        },
        path_file_out: cli.output.unwrap_or(options_default.path_file_out),
    };

    match run_deg_report(&derive_demo_design(), &BTreeMap::new(), &options) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("degkit: {err}");
            ExitCode::FAILURE
        }
    }
}
