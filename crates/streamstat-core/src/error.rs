//! Error types for streamstat
//!
//! This module defines the error types used throughout the streamstat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use streamstat_core::error::{StreamstatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to StreamstatError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::YearMonth;

/// Main error type for streamstat operations
///
/// Two variants carry domain meaning: [`StreamstatError::MalformedRecord`]
/// when an input record fails validation and [`StreamstatError::MissingMonth`]
/// when a report asks for a month without any listens. Both abort the run.
#[derive(Error, Debug)]
pub enum StreamstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A history file could not be interpreted as a list of records
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// A single record is missing a field or carries a wrong type
    #[error("Malformed record #{index} in {file}: {source}")]
    MalformedRecord {
        /// The file holding the record
        file: PathBuf,
        /// Zero-based position of the record inside the file
        index: usize,
        /// What was wrong with it
        #[source]
        source: RecordError,
    },

    /// A requested report month has no listens at all
    #[error("No listening data for {0}")]
    MissingMonth(YearMonth),

    /// Data directory does not exist
    #[error("Data directory not found: {0}")]
    DataDirectoryNotFound(PathBuf),

    /// Data directory exists but holds no history files
    #[error("No streaming history files found in {0}")]
    NoHistoryFiles(PathBuf),

    /// Invalid month string or month number
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Reason a single streaming record was rejected
#[derive(Error, Debug)]
pub enum RecordError {
    /// Missing field or wrong field type
    #[error(transparent)]
    Schema(#[from] serde_json::Error),

    /// `msPlayed` is larger than any single play can be
    #[error("msPlayed {value} exceeds the maximum of {max}")]
    MsPlayedOutOfRange { value: u64, max: u64 },

    /// `endTime` is not in `YYYY-MM-DD HH:MM` form
    #[error("invalid endTime '{value}': {source}")]
    EndTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Convenience type alias for Results in streamstat
///
/// # Example
///
/// ```
/// use streamstat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, StreamstatError>;
