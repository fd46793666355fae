//! Source and staged directory layout.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::StageConfig;

/// All paths the staging run reads from or writes to, derived from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLayout {
    pub source_root: PathBuf,
    pub sdot_source: PathBuf,
    pub external_source: PathBuf,
    pub sgis_source: PathBuf,

    pub output_root: PathBuf,
    /// `<output_root>/<course_dir>`: the folder shared with students.
    pub course_root: PathBuf,
    /// `<course_root>/data`: the tree that goes into the bundle.
    pub data_root: PathBuf,
    pub sdot_target: PathBuf,
    pub external_target: PathBuf,
    pub sgis_target: PathBuf,
    pub processed_target: PathBuf,
    pub sample_dir: PathBuf,
    pub bundle_path: PathBuf,
}

impl StageLayout {
    pub fn from_config(cfg: &StageConfig) -> Self {
        let source_root = cfg.source_root.clone();
        let external_source = source_root.join("external");
        let course_root = cfg.output_root.join(&cfg.course_dir);
        let data_root = course_root.join("data");
        let external_target = data_root.join("external");
        StageLayout {
            sdot_source: source_root.join("raw").join("s-dot"),
            sgis_source: external_source.join("sgis_boundaries"),
            external_source,
            source_root,
            output_root: cfg.output_root.clone(),
            sdot_target: data_root.join("raw").join("s-dot"),
            sgis_target: external_target.join("sgis_boundaries"),
            external_target,
            processed_target: data_root.join("processed"),
            sample_dir: course_root.join("sample"),
            bundle_path: cfg.output_root.join(&cfg.bundle_name),
            data_root,
            course_root,
        }
    }

    /// Create the staged data tree. Existing directories are left as they are.
    pub fn prepare(&self) -> Result<()> {
        for dir in [&self.sdot_target, &self.sgis_target, &self.processed_target] {
            fs::create_dir_all(dir)
                .with_context(|| format!("create directory {}", dir.display()))?;
        }
        tracing::debug!(root = %self.data_root.display(), "staged directory tree ready");
        Ok(())
    }
}

/// Derive the layout from `cfg` and create the staged tree.
pub fn prepare(cfg: &StageConfig) -> Result<StageLayout> {
    let layout = StageLayout::from_config(cfg);
    layout.prepare()?;
    Ok(layout)
}
