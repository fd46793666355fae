use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample dataset parameters (optional `[sample]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SampleConfig {
    /// Maximum number of data rows (header excluded) kept per sample file.
    pub row_cap: usize,
    /// Number of S-DoT files sampled, taken in file-name order.
    pub max_files: usize,
    /// WHATWG encoding label of the raw S-DoT CSVs.
    pub source_encoding: String,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            row_cap: 10_000,
            max_files: 3,
            source_encoding: "euc-kr".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/hwstage/config.toml`.
///
/// Relative paths are resolved against the working directory the CLI runs in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StageConfig {
    /// Root of the local data tree (`raw/s-dot`, `external`).
    pub source_root: PathBuf,
    /// Folder that is uploaded to the shared drive.
    pub output_root: PathBuf,
    /// Course folder created under `output_root`.
    pub course_dir: String,
    /// File name of the compressed bundle written into `output_root`.
    pub bundle_name: String,
    pub sample: SampleConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("data"),
            output_root: PathBuf::from("drive_upload"),
            course_dir: "seoul_heatwave_course".to_string(),
            bundle_name: "seoul_heatwave_data.zip".to_string(),
            sample: SampleConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hwstage")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<StageConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = StageConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<StageConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: StageConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
