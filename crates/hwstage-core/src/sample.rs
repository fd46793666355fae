//! Sample dataset: the first rows of a few S-DoT exports, re-encoded to UTF-8.
//!
//! S-DoT exports are EUC-KR. Each sample keeps the header row and at most
//! `row_cap` records; cells are copied verbatim.

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SampleConfig;
use crate::manifest;
use crate::report::SampleOutcome;

/// Failure while sampling one file. The run records it and moves on.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("file has no header row")]
    EmptyInput,
}

/// Resolve a WHATWG encoding label (e.g. `euc-kr`, `windows-949`).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow::anyhow!("unknown source encoding label: {label:?}"))
}

/// The first `max_files` `*.csv` files of `dir`, in file-name order.
pub fn select_sources(dir: &Path, max_files: usize) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "csv") {
            continue;
        }
        let meta = fs::metadata(&path).with_context(|| format!("stat {}", path.display()))?;
        if meta.is_file() {
            found.push(path);
        }
    }
    found.sort();
    found.truncate(max_files);
    Ok(found)
}

/// Copy the header and up to `row_cap` records of `src` into `dst` as UTF-8.
/// Returns the number of records written. A partial `dst` is removed on error.
pub fn sample_file(
    src: &Path,
    dst: &Path,
    encoding: &'static Encoding,
    row_cap: usize,
) -> Result<usize, SampleError> {
    let result = write_sample(src, dst, encoding, row_cap);
    if result.is_err() && dst.exists() {
        if let Err(e) = fs::remove_file(dst) {
            tracing::debug!(path = %dst.display(), "remove partial sample: {}", e);
        }
    }
    result
}

fn write_sample(
    src: &Path,
    dst: &Path,
    encoding: &'static Encoding,
    row_cap: usize,
) -> Result<usize, SampleError> {
    let decoded = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .build(File::open(src)?);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(decoded);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(SampleError::EmptyInput);
    }

    let mut writer = csv::Writer::from_path(dst)?;
    writer.write_record(&headers)?;

    let mut record = csv::StringRecord::new();
    let mut rows = 0;
    while rows < row_cap && reader.read_record(&mut record)? {
        writer.write_record(&record)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Write samples for the first `cfg.max_files` CSVs of `source_dir` into
/// `sample_dir`. Per-file failures are logged and returned as
/// [`SampleOutcome::Failed`]; only setup problems (bad encoding label,
/// unreadable directories) fail the whole step.
pub fn write_samples(
    source_dir: &Path,
    sample_dir: &Path,
    cfg: &SampleConfig,
) -> Result<Vec<SampleOutcome>> {
    let encoding = resolve_encoding(&cfg.source_encoding)?;
    fs::create_dir_all(sample_dir)
        .with_context(|| format!("create directory {}", sample_dir.display()))?;

    let sources = select_sources(source_dir, cfg.max_files)?;
    let mut outcomes = Vec::with_capacity(sources.len());
    for src in sources {
        let source = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = manifest::sample_name(&source);
        let dst = sample_dir.join(&output);

        match sample_file(&src, &dst, encoding, cfg.row_cap) {
            Ok(rows) => {
                tracing::info!("sampled {} -> {} ({} rows)", src.display(), dst.display(), rows);
                outcomes.push(SampleOutcome::Written { source, output, rows });
            }
            Err(e) => {
                tracing::warn!(path = %src.display(), "sample failed: {}", e);
                outcomes.push(SampleOutcome::Failed {
                    source,
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euc_kr(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    fn cfg(row_cap: usize, max_files: usize) -> SampleConfig {
        SampleConfig {
            row_cap,
            max_files,
            ..SampleConfig::default()
        }
    }

    #[test]
    fn resolve_encoding_labels() {
        assert_eq!(resolve_encoding("euc-kr").unwrap(), encoding_rs::EUC_KR);
        assert_eq!(resolve_encoding(" Windows-949 ").unwrap(), encoding_rs::EUC_KR);
        assert!(resolve_encoding("klingon").is_err());
    }

    #[test]
    fn truncates_and_reencodes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("S-DoT_NATURE_2025.04.28-05.04.csv");
        let mut text = String::from("모델번호,자치구,기온\n");
        for i in 0..25 {
            text.push_str(&format!("V02Q{i},종로구,{}.5\n", 20 + i));
        }
        fs::write(&src, euc_kr(&text)).unwrap();

        let dst = dir.path().join("out.csv");
        let rows = sample_file(&src, &dst, encoding_rs::EUC_KR, 10).unwrap();
        assert_eq!(rows, 10);

        let out = fs::read_to_string(&dst).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "모델번호,자치구,기온");
        assert_eq!(lines[1], "V02Q0,종로구,20.5");
        assert_eq!(lines[10], "V02Q9,종로구,29.5");
    }

    #[test]
    fn short_file_keeps_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.csv");
        fs::write(&src, euc_kr("구,값\n강남구,1\n서초구,2\n")).unwrap();
        let dst = dir.path().join("b.csv");
        assert_eq!(sample_file(&src, &dst, encoding_rs::EUC_KR, 10_000).unwrap(), 2);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "구,값\n강남구,1\n서초구,2\n");
    }

    #[test]
    fn quoted_fields_survive() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.csv");
        fs::write(&src, euc_kr("name,note\n\"서울, 중구\",ok\n")).unwrap();
        let dst = dir.path().join("b.csv");
        sample_file(&src, &dst, encoding_rs::EUC_KR, 5).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "name,note\n\"서울, 중구\",ok\n");
    }

    #[test]
    fn empty_file_is_rejected_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("empty.csv");
        fs::write(&src, b"").unwrap();
        let dst = dir.path().join("out.csv");
        let err = sample_file(&src, &dst, encoding_rs::EUC_KR, 5).unwrap_err();
        assert!(matches!(err, SampleError::EmptyInput));
        assert!(!dst.exists());
    }

    #[test]
    fn ragged_rows_fail_and_remove_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("bad.csv");
        fs::write(&src, b"a,b\n1,2\n3,4,5\n").unwrap();
        let dst = dir.path().join("out.csv");
        let err = sample_file(&src, &dst, encoding_rs::EUC_KR, 5).unwrap_err();
        assert!(matches!(err, SampleError::Csv(_)));
        assert!(!dst.exists());
    }

    #[test]
    fn select_sources_sorted_and_capped() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.csv", "a.csv", "d.csv", "b.csv", "notes.txt", "upper.CSV"] {
            fs::write(dir.path().join(name), b"h\n").unwrap();
        }
        fs::create_dir(dir.path().join("0.csv")).unwrap();
        let picked = select_sources(dir.path(), 3).unwrap();
        let names: Vec<_> = picked
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn write_samples_continues_past_failures() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(src.path().join("S-DoT_NATURE_A.csv"), euc_kr("h\n1\n2\n3\n")).unwrap();
        fs::write(src.path().join("S-DoT_NATURE_B.csv"), b"").unwrap();
        fs::write(src.path().join("S-DoT_NATURE_C.csv"), euc_kr("h\n1\n")).unwrap();

        let sample_dir = out.path().join("sample");
        let outcomes = write_samples(src.path(), &sample_dir, &cfg(2, 3)).unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes[0],
            SampleOutcome::Written {
                source: "S-DoT_NATURE_A.csv".into(),
                output: "sample_a_csv.csv".into(),
                rows: 2,
            }
        );
        assert!(matches!(outcomes[1], SampleOutcome::Failed { .. }));
        assert_eq!(outcomes[1].source(), "S-DoT_NATURE_B.csv");
        assert!(matches!(outcomes[2], SampleOutcome::Written { rows: 1, .. }));
        assert!(sample_dir.join("sample_c_csv.csv").exists());
        assert!(!sample_dir.join("sample_b_csv.csv").exists());
    }

    #[test]
    fn write_samples_rejects_unknown_encoding_before_io() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let sample_dir = out.path().join("sample");
        let bad = SampleConfig {
            source_encoding: "not-an-encoding".into(),
            ..SampleConfig::default()
        };
        assert!(write_samples(src.path(), &sample_dir, &bad).is_err());
        assert!(!sample_dir.exists());
    }
}
