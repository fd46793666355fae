//! Zip archive creation for boundary folders and the upload bundle.
//!
//! Archives are written to `<name>.part` and renamed into place once the
//! central directory is flushed, so a failed run never leaves a truncated
//! zip under the final name.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::report::ArchiveSummary;

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp archive: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Zip the regular files directly inside `dir` into `zip_path`.
///
/// Entries are named by bare file name and added in name order. Symlinks
/// are followed; subdirectories are not descended into.
pub fn zip_dir_flat(dir: &Path, zip_path: &Path) -> Result<ArchiveSummary> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        let path = entry.path();
        let meta = fs::metadata(&path).with_context(|| format!("stat {}", path.display()))?;
        if meta.is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push((name, path));
        }
    }
    files.sort();
    write_archive(zip_path, files)
}

/// Zip every regular file under `root` (recursively) into `zip_path`, naming
/// entries by their `/`-separated path relative to `base`.
///
/// `root` must lie inside `base`. The archive itself is never added even if
/// it sits inside `root`.
pub fn zip_tree(root: &Path, base: &Path, zip_path: &Path) -> Result<ArchiveSummary> {
    let part = temp_path(zip_path);
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path == zip_path || path == part {
            continue;
        }
        let rel = path.strip_prefix(base).with_context(|| {
            format!("{} is not under {}", path.display(), base.display())
        })?;
        files.push((entry_name(rel), path.to_path_buf()));
    }
    write_archive(zip_path, files)
}

/// Archive entry name for a relative path: components joined with `/`.
fn entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn write_archive(zip_path: &Path, files: Vec<(String, PathBuf)>) -> Result<ArchiveSummary> {
    let part = temp_path(zip_path);
    let out = File::create(&part).with_context(|| format!("create {}", part.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(out));

    let entries = files.len();
    for (name, path) in files {
        let mut src = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        let len = src
            .metadata()
            .with_context(|| format!("stat {}", path.display()))?
            .len();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(len >= u64::from(u32::MAX));
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("add {} to {}", name, zip_path.display()))?;
        io::copy(&mut src, &mut zip)
            .with_context(|| format!("compress {}", path.display()))?;
        tracing::debug!(entry = %name, bytes = len, "archived");
    }

    let writer = zip
        .finish()
        .with_context(|| format!("finish {}", part.display()))?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .and_then(|f| f.sync_all())
        .with_context(|| format!("flush {}", part.display()))?;

    fs::rename(&part, zip_path).with_context(|| {
        format!("failed to rename {} to {}", part.display(), zip_path.display())
    })?;
    let bytes = fs::metadata(zip_path)
        .with_context(|| format!("stat {}", zip_path.display()))?
        .len();
    tracing::info!("wrote {} ({} entries, {} bytes)", zip_path.display(), entries, bytes);

    Ok(ArchiveSummary {
        path: zip_path.to_path_buf(),
        entries,
        bytes,
    })
}
