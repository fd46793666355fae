//! CLI for staging the Seoul heatwave course data.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hwstage_core::config::{self, StageConfig};
use hwstage_core::stage::Step;
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_layout, run_sample, run_stage, run_step};

/// Top-level CLI. With no subcommand the full pipeline runs with defaults.
#[derive(Debug, Parser)]
#[command(name = "hwstage")]
#[command(about = "Stage Seoul heatwave course data for shared-drive upload", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Options that apply to every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default: ~/.config/hwstage/config.toml, created on first run).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Local data root containing raw/s-dot and external.
    #[arg(long, global = true, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Folder to build the upload tree and bundle in.
    #[arg(long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the whole pipeline: layout, S-DoT, external data, bundle, samples.
    Run {
        /// Print the run report as JSON instead of the console summary.
        #[arg(long)]
        json: bool,
    },

    /// Create the staged directory tree only.
    Layout,

    /// Copy the weekly S-DoT files under their staged names.
    Sdot,

    /// Copy the sensor workbook and zip the SGIS boundary folders.
    External,

    /// Zip the staged data tree into the upload bundle.
    Bundle,

    /// Write truncated UTF-8 sample CSVs.
    Sample {
        /// Data rows kept per sample (header excluded).
        #[arg(long, value_name = "N")]
        rows: Option<usize>,
        /// Number of S-DoT files to sample.
        #[arg(long, value_name = "N")]
        files: Option<usize>,
    },

    /// Compute SHA-256 of a file (e.g. the bundle after upload).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl GlobalArgs {
    /// Load the config (explicit file, or the XDG default) and apply path overrides.
    pub fn resolve_config(&self) -> Result<StageConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init().unwrap_or_else(|e| {
                tracing::warn!("using built-in defaults, config unavailable: {:#}", e);
                StageConfig::default()
            }),
        };
        if let Some(source) = &self.source {
            cfg.source_root = source.clone();
        }
        if let Some(output) = &self.output {
            cfg.output_root = output.clone();
        }
        Ok(cfg)
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let global = cli.global;
        let load = || -> Result<StageConfig> {
            let cfg = global.resolve_config()?;
            tracing::debug!("loaded config: {:?}", cfg);
            Ok(cfg)
        };

        match cli.command.unwrap_or(CliCommand::Run { json: false }) {
            CliCommand::Run { json } => run_stage(&load()?, json)?,
            CliCommand::Layout => run_layout(&load()?)?,
            CliCommand::Sdot => run_step(&load()?, Step::Sdot)?,
            CliCommand::External => run_step(&load()?, Step::External)?,
            CliCommand::Bundle => run_step(&load()?, Step::Bundle)?,
            CliCommand::Sample { rows, files } => run_sample(load()?, rows, files)?,
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
