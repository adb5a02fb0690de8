//! CLI subcommand implementations

pub mod endpoint;
pub mod nodes;
pub mod report;
pub mod usage;
pub mod workloads;
