//! Console rendering of a [`StageReport`], step by step as the run progresses.

use hwstage_core::config::StageConfig;
use hwstage_core::report::{CopyOutcome, SampleOutcome, StageReport};
use hwstage_core::stage::{Step, StepEvent};

/// Prints a heading when a step starts and its outcome when it finishes.
#[derive(Debug, Default)]
pub struct Progress {
    /// Warnings already shown; the report only ever appends.
    warned: usize,
}

impl Progress {
    pub fn on_event(&mut self, event: StepEvent, report: &StageReport) {
        match event {
            StepEvent::Started(step) => println!("{}", heading(step)),
            StepEvent::Finished(step) => {
                print_step(step, report);
                for w in &report.warnings[self.warned..] {
                    println!("  warning: {}", w);
                }
                self.warned = report.warnings.len();
            }
        }
    }
}

fn heading(step: Step) -> &'static str {
    match step {
        Step::Sdot => "Processing S-DoT files...",
        Step::External => "Processing external data...",
        Step::Bundle => "Creating compressed bundle...",
        Step::Sample => "Creating sample dataset...",
    }
}

fn print_copies(outcome: &CopyOutcome) {
    for c in &outcome.copied {
        println!("  ok {} -> {}", c.from, c.to);
    }
}

fn print_step(step: Step, report: &StageReport) {
    match step {
        Step::Sdot => {
            if let Some(sdot) = &report.sdot {
                print_copies(sdot);
                println!(
                    "  copied {} S-DoT files ({} listed but not found)",
                    sdot.copied.len(),
                    sdot.missing.len()
                );
            }
        }
        Step::External => {
            if let Some(ext) = &report.external {
                print_copies(&ext.sensor_locations);
                for zip in &ext.boundary_zips {
                    let name = zip
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    println!("  ok created {} ({} files)", name, zip.entries);
                }
                for missing in &ext.missing_boundaries {
                    println!("  skipped boundary folder not found: {}", missing);
                }
            }
        }
        Step::Bundle => {
            if let Some(bundle) = &report.bundle {
                println!(
                    "  ok created {} ({:.1} MB, {} files)",
                    bundle.archive.path.display(),
                    bundle.archive.size_mb(),
                    bundle.archive.entries
                );
                println!("  sha256 {}", bundle.sha256);
            }
        }
        Step::Sample => {
            if report.samples.is_empty() {
                println!("  no sample files written");
            }
            for s in &report.samples {
                match s {
                    SampleOutcome::Written { output, rows, .. } => {
                        println!("  ok created {} ({} rows)", output, rows)
                    }
                    SampleOutcome::Failed { source, error } => {
                        println!("  error with {}: {}", source, error)
                    }
                }
            }
        }
    }
}

pub fn print_upload_hints(cfg: &StageConfig, report: &StageReport) {
    println!("\nPreparation complete.");
    println!("\nUpload this folder to the shared drive: {}", report.course_root.display());
    if let Some(bundle) = &report.bundle {
        println!("Or upload the compressed bundle: {}", bundle.archive.path.display());
    }
    println!("\nTips:");
    println!("  1. Upload to: My Drive/{}/", cfg.course_dir);
    println!("  2. Share the folder with students (view-only)");
    println!("  3. Students can add a shortcut to their own drive");
    if report.failed_samples() > 0 {
        println!("\n{} sample file(s) failed; see messages above.", report.failed_samples());
    }
}
