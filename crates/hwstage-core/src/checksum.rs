//! SHA-256 of staged artifacts, printed next to the bundle so uploads can be verified.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Streams through a 64 KiB buffer, so bundle size does not matter.
pub fn sha256_path(path: &Path) -> Result<String> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUF_SIZE, f);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).with_context(|| format!("read {}", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}

/// One line in `sha256sum` format: `<digest>  <file name>`.
pub fn sha256sum_line(path: &Path) -> Result<String> {
    let digest = sha256_path(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(format!("{digest}  {name}"))
}
