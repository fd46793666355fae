//! `hwstage checksum <path>` – SHA-256 of a file.

use anyhow::Result;
use hwstage_core::checksum;
use std::path::Path;

/// Compute and print SHA-256 of the given file in `sha256sum` format.
pub fn run_checksum(path: &Path) -> Result<()> {
    println!("{}", checksum::sha256sum_line(path)?);
    Ok(())
}
