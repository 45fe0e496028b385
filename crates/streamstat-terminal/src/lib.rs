//! Terminal output formatting for streamstat
//!
//! This crate provides table and JSON output formatters for ranked
//! tracks, ranked artists and monthly top-track reports.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
