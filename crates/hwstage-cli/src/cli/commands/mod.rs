//! CLI command handlers, one file per command family.

mod checksum;
mod print;
mod run;
mod sample;

pub use checksum::run_checksum;
pub use run::{run_layout, run_stage, run_step};
pub use sample::run_sample;
