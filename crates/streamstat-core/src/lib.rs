//! Core types, aggregation and ranking for streamstat
//!
//! This crate provides the listen event model, the track and artist
//! aggregators, stable rankings, the monthly bucketizer and the shared
//! error type used by all other streamstat crates.

pub mod aggregation;
pub mod aggregation_types;
pub mod error;
pub mod monthly;
pub mod provider;
pub mod ranking;
pub mod time_format;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, StreamstatError};
pub use types::{ArtistName, ListenEvent, TrackTitle, YearMonth};
