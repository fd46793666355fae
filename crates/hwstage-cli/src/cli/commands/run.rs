//! `hwstage run` and the single-step commands.

use anyhow::Result;
use hwstage_core::config::StageConfig;
use hwstage_core::stage::{self, Step};

use super::print::{self, Progress};

pub fn run_stage(cfg: &StageConfig, json: bool) -> Result<()> {
    if json {
        let report = stage::run_stage(cfg)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Preparing Seoul heatwave course data for shared-drive upload\n");
    let mut progress = Progress::default();
    let report = stage::run_steps_with(cfg, Step::ALL, |event, report| {
        progress.on_event(event, report)
    })?;
    print::print_upload_hints(cfg, &report);
    Ok(())
}

pub fn run_step(cfg: &StageConfig, step: Step) -> Result<()> {
    let mut progress = Progress::default();
    stage::run_steps_with(cfg, &[step], |event, report| progress.on_event(event, report))?;
    Ok(())
}

/// `hwstage layout` – create the staged tree and nothing else.
pub fn run_layout(cfg: &StageConfig) -> Result<()> {
    let report = stage::run_steps(cfg, &[])?;
    println!("Created directory structure under {}", report.course_root.display());
    Ok(())
}
