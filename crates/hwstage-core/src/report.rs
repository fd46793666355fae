//! Outcome records for a staging run. Serializable so the CLI can emit JSON.

use serde::Serialize;
use std::path::PathBuf;

/// One file copied under its staged name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    pub from: String,
    pub to: String,
    pub bytes: u64,
}

/// Result of copying one rename table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyOutcome {
    pub copied: Vec<CopiedFile>,
    /// Table entries whose source file was not found.
    pub missing: Vec<String>,
}

/// A zip archive written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

impl ArchiveSummary {
    /// Archive size in MiB, as shown in the console summary.
    pub fn size_mb(&self) -> f64 {
        self.bytes as f64 / (1024.0 * 1024.0)
    }
}

/// The upload bundle plus its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSummary {
    #[serde(flatten)]
    pub archive: ArchiveSummary,
    pub sha256: String,
}

/// Per-file result of sample generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SampleOutcome {
    Written {
        source: String,
        output: String,
        rows: usize,
    },
    Failed {
        source: String,
        error: String,
    },
}

impl SampleOutcome {
    pub fn source(&self) -> &str {
        match self {
            SampleOutcome::Written { source, .. } | SampleOutcome::Failed { source, .. } => source,
        }
    }
}

/// External data step: workbook copy and boundary zips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalOutcome {
    pub sensor_locations: CopyOutcome,
    pub boundary_zips: Vec<ArchiveSummary>,
    /// Boundary folders listed in the table but absent on disk.
    pub missing_boundaries: Vec<String>,
}

/// Everything a full run did, in pipeline order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageReport {
    pub course_root: PathBuf,
    pub sdot: Option<CopyOutcome>,
    pub external: Option<ExternalOutcome>,
    pub bundle: Option<BundleSummary>,
    pub samples: Vec<SampleOutcome>,
    /// Missing source directories and similar non-fatal conditions.
    pub warnings: Vec<String>,
}

impl StageReport {
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn failed_samples(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| matches!(s, SampleOutcome::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mb_uses_binary_megabytes() {
        let a = ArchiveSummary {
            path: PathBuf::from("x.zip"),
            entries: 1,
            bytes: 3 * 1024 * 1024 / 2,
        };
        assert!((a.size_mb() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn sample_outcome_serializes_with_status_tag() {
        let ok = SampleOutcome::Written {
            source: "a.csv".into(),
            output: "sample_a_csv.csv".into(),
            rows: 10,
        };
        let v = serde_json::to_value(&ok).unwrap();
        assert_eq!(v["status"], "written");
        assert_eq!(v["rows"], 10);

        let bad = SampleOutcome::Failed {
            source: "b.csv".into(),
            error: "boom".into(),
        };
        let v = serde_json::to_value(&bad).unwrap();
        assert_eq!(v["status"], "failed");
        assert_eq!(bad.source(), "b.csv");
    }

    #[test]
    fn warn_records_message() {
        let mut report = StageReport::default();
        report.warn("S-DoT source directory not found");
        assert_eq!(report.warnings, vec!["S-DoT source directory not found"]);
        assert_eq!(report.failed_samples(), 0);
    }
}
