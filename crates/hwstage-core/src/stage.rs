//! The staging pipeline: layout, S-DoT copy, external data, bundle, samples.
//!
//! Each step appends to a [`StageReport`]. Missing source directories are
//! warnings; only a missing source root or an I/O failure on the staged side
//! stops the run.

use anyhow::Result;

use crate::archive;
use crate::checksum;
use crate::config::StageConfig;
use crate::copy;
use crate::layout::{self, StageLayout};
use crate::manifest;
use crate::report::{BundleSummary, ExternalOutcome, StageReport};
use crate::sample;

/// One pipeline step. Steps always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Sdot,
    External,
    Bundle,
    Sample,
}

impl Step {
    pub const ALL: &'static [Step] = &[Step::Sdot, Step::External, Step::Bundle, Step::Sample];
}

/// Progress notification emitted around each step of [`run_steps_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Started(Step),
    /// The report already holds this step's outcome and warnings.
    Finished(Step),
}

/// Copy the S-DoT weekly files under their staged names.
pub fn stage_sdot(layout: &StageLayout, report: &mut StageReport) -> Result<()> {
    if !layout.sdot_source.is_dir() {
        report.warn(format!(
            "S-DoT source directory not found: {}",
            layout.sdot_source.display()
        ));
        return Ok(());
    }
    let outcome = copy::copy_renamed(&layout.sdot_source, &layout.sdot_target, manifest::SDOT_FILES)?;
    tracing::info!(
        copied = outcome.copied.len(),
        missing = outcome.missing.len(),
        "S-DoT files staged"
    );
    report.sdot = Some(outcome);
    Ok(())
}

/// Copy the sensor-location workbook and zip each SGIS boundary folder.
pub fn stage_external(layout: &StageLayout, report: &mut StageReport) -> Result<()> {
    if !layout.external_source.is_dir() {
        report.warn(format!(
            "external data directory not found: {}",
            layout.external_source.display()
        ));
        return Ok(());
    }

    let mut outcome = ExternalOutcome {
        sensor_locations: copy::copy_renamed(
            &layout.external_source,
            &layout.external_target,
            manifest::SENSOR_LOCATIONS,
        )?,
        ..ExternalOutcome::default()
    };

    if layout.sgis_source.is_dir() {
        for (dir_name, zip_name) in manifest::SGIS_BOUNDARIES {
            let dir = layout.sgis_source.join(dir_name);
            if !dir.is_dir() {
                tracing::debug!(path = %dir.display(), "boundary folder not present");
                outcome.missing_boundaries.push((*dir_name).to_string());
                continue;
            }
            let zip = archive::zip_dir_flat(&dir, &layout.sgis_target.join(zip_name))?;
            outcome.boundary_zips.push(zip);
        }
    } else {
        tracing::debug!(path = %layout.sgis_source.display(), "no SGIS boundaries folder");
    }

    report.external = Some(outcome);
    Ok(())
}

/// Zip the whole staged data tree into the bundle and hash it.
pub fn build_bundle(layout: &StageLayout, report: &mut StageReport) -> Result<()> {
    let archive = archive::zip_tree(&layout.data_root, &layout.output_root, &layout.bundle_path)?;
    let sha256 = checksum::sha256_path(&archive.path)?;
    tracing::info!(sha256 = %sha256, "bundle ready: {}", archive.path.display());
    report.bundle = Some(BundleSummary { archive, sha256 });
    Ok(())
}

/// Write the truncated UTF-8 sample CSVs next to the staged data.
pub fn stage_samples(layout: &StageLayout, cfg: &StageConfig, report: &mut StageReport) -> Result<()> {
    if !layout.sdot_source.is_dir() {
        tracing::debug!("no S-DoT source, skipping samples");
        return Ok(());
    }
    report.samples = sample::write_samples(&layout.sdot_source, &layout.sample_dir, &cfg.sample)?;
    Ok(())
}

/// Run the given steps (in pipeline order) after creating the staged layout.
pub fn run_steps(cfg: &StageConfig, steps: &[Step]) -> Result<StageReport> {
    run_steps_with(cfg, steps, |_, _| {})
}

/// Like [`run_steps`], calling `on_event` before and after every step so
/// callers can report progress while long steps (the bundle) run.
pub fn run_steps_with<F>(cfg: &StageConfig, steps: &[Step], mut on_event: F) -> Result<StageReport>
where
    F: FnMut(StepEvent, &StageReport),
{
    if !cfg.source_root.is_dir() {
        anyhow::bail!(
            "'{}' directory not found; run from the course directory or set source_root",
            cfg.source_root.display()
        );
    }

    let layout = layout::prepare(cfg)?;
    let mut report = StageReport {
        course_root: layout.course_root.clone(),
        ..StageReport::default()
    };

    let mut steps = steps.to_vec();
    steps.sort();
    steps.dedup();
    for step in steps {
        tracing::debug!(?step, "running step");
        on_event(StepEvent::Started(step), &report);
        match step {
            Step::Sdot => stage_sdot(&layout, &mut report)?,
            Step::External => stage_external(&layout, &mut report)?,
            Step::Bundle => build_bundle(&layout, &mut report)?,
            Step::Sample => stage_samples(&layout, cfg, &mut report)?,
        }
        on_event(StepEvent::Finished(step), &report);
    }
    Ok(report)
}

/// Full pipeline, equivalent to running every step.
pub fn run_stage(cfg: &StageConfig) -> Result<StageReport> {
    run_steps(cfg, Step::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cfg_in(root: &std::path::Path) -> StageConfig {
        StageConfig {
            source_root: root.join("data"),
            output_root: root.join("drive_upload"),
            ..StageConfig::default()
        }
    }

    #[test]
    fn missing_source_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_stage(&cfg_in(dir.path())).unwrap_err();
        assert!(err.to_string().contains("directory not found"));
        assert!(!dir.path().join("drive_upload").exists());
    }

    #[test]
    fn empty_source_root_warns_and_still_bundles() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        let cfg = cfg_in(dir.path());

        let report = run_stage(&cfg).unwrap();

        assert_eq!(report.warnings.len(), 2);
        assert!(report.sdot.is_none());
        assert!(report.external.is_none());
        assert!(report.samples.is_empty());
        let bundle = report.bundle.expect("bundle written");
        assert_eq!(bundle.archive.entries, 0);
        assert!(cfg.output_root.join("seoul_heatwave_data.zip").is_file());
    }

    #[test]
    fn steps_run_once_in_pipeline_order() {
        let dir = tempfile::tempdir().unwrap();
        let sdot = dir.path().join("data").join("raw").join("s-dot");
        fs::create_dir_all(&sdot).unwrap();
        fs::write(sdot.join(manifest::SDOT_FILES[0].0), b"h\n1\n").unwrap();
        let cfg = cfg_in(dir.path());

        // Bundle listed first must still see the copied file.
        let report = run_steps(&cfg, &[Step::Bundle, Step::Sdot, Step::Bundle]).unwrap();
        assert_eq!(report.sdot.unwrap().copied.len(), 1);
        assert_eq!(report.bundle.unwrap().archive.entries, 1);
        assert!(report.samples.is_empty());
    }

    #[test]
    fn events_bracket_each_step_with_its_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let sdot = dir.path().join("data").join("raw").join("s-dot");
        fs::create_dir_all(&sdot).unwrap();
        fs::write(sdot.join(manifest::SDOT_FILES[0].0), b"h\n1\n").unwrap();
        let cfg = cfg_in(dir.path());

        let mut seen = Vec::new();
        run_steps_with(&cfg, Step::ALL, |event, report| {
            match event {
                StepEvent::Started(Step::Bundle) => assert!(report.bundle.is_none()),
                StepEvent::Finished(Step::Bundle) => assert!(report.bundle.is_some()),
                StepEvent::Finished(Step::Sdot) => assert!(report.sdot.is_some()),
                StepEvent::Finished(Step::External) => assert_eq!(report.warnings.len(), 1),
                _ => {}
            }
            seen.push(event);
        })
        .unwrap();

        let expected: Vec<StepEvent> = Step::ALL
            .iter()
            .flat_map(|s| [StepEvent::Started(*s), StepEvent::Finished(*s)])
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn missing_boundary_folders_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let sgis = dir.path().join("data").join("external").join("sgis_boundaries");
        let sido = sgis.join(manifest::SGIS_BOUNDARIES[0].0);
        fs::create_dir_all(&sido).unwrap();
        fs::write(sido.join("bnd_sido.shp"), b"shp").unwrap();
        let cfg = cfg_in(dir.path());

        let report = run_steps(&cfg, &[Step::External]).unwrap();
        let ext = report.external.unwrap();
        assert_eq!(ext.boundary_zips.len(), 1);
        assert!(ext.boundary_zips[0].path.ends_with("seoul_sido.zip"));
        assert_eq!(ext.missing_boundaries.len(), 2);
        assert_eq!(ext.sensor_locations.missing.len(), 1);
    }
}
