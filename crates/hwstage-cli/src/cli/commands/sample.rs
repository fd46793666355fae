//! `hwstage sample` – truncated UTF-8 sample CSVs.

use anyhow::Result;
use hwstage_core::config::StageConfig;
use hwstage_core::stage::Step;

use super::run::run_step;

/// Run the sample step, with optional per-invocation overrides of the row cap and file count.
pub fn run_sample(mut cfg: StageConfig, rows: Option<usize>, files: Option<usize>) -> Result<()> {
    if let Some(rows) = rows {
        cfg.sample.row_cap = rows;
    }
    if let Some(files) = files {
        cfg.sample.max_files = files;
    }
    run_step(&cfg, Step::Sample)
}
