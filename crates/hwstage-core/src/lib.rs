pub mod config;
pub mod logging;

pub mod archive;
pub mod checksum;
pub mod copy;
pub mod layout;
pub mod manifest;
pub mod report;
pub mod sample;
pub mod stage;
