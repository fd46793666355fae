//! Table-driven copy with rename.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::Path;

use crate::report::{CopiedFile, CopyOutcome};

/// Copy every `(old, new)` entry of `table` from `src_dir/old` to `dst_dir/new`.
///
/// Entries whose source is not a regular file are recorded as missing and
/// skipped. The destination keeps the source's permissions and modification
/// time. Existing destination files are overwritten.
pub fn copy_renamed(src_dir: &Path, dst_dir: &Path, table: &[(&str, &str)]) -> Result<CopyOutcome> {
    let mut outcome = CopyOutcome::default();
    for (old_name, new_name) in table {
        let from = src_dir.join(old_name);
        if !from.is_file() {
            tracing::debug!(path = %from.display(), "not present, skipping");
            outcome.missing.push((*old_name).to_string());
            continue;
        }
        let to = dst_dir.join(new_name);
        let bytes = copy_preserving_mtime(&from, &to)?;
        tracing::info!("copied {} -> {} ({} bytes)", from.display(), to.display(), bytes);
        outcome.copied.push(CopiedFile {
            from: (*old_name).to_string(),
            to: (*new_name).to_string(),
            bytes,
        });
    }
    Ok(outcome)
}

fn copy_preserving_mtime(from: &Path, to: &Path) -> Result<u64> {
    // A previous run may have left a read-only copy that fs::copy cannot open for writing.
    if to.is_file() {
        fs::remove_file(to).with_context(|| format!("replace {}", to.display()))?;
    }
    let bytes = fs::copy(from, to)
        .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
    let modified = fs::metadata(from)
        .and_then(|m| m.modified())
        .with_context(|| format!("read modification time of {}", from.display()))?;
    // futimens needs ownership, not write access: the copy may carry read-only permissions.
    File::open(to)
        .and_then(|f| f.set_modified(modified))
        .with_context(|| format!("set modification time of {}", to.display()))?;
    Ok(bytes)
}
