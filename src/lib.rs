//! streamstat - Rank tracks, artists and months from exported streaming history
//!
//! This library provides functionality to:
//! - Discover and strictly decode `StreamingHistory_music_*.json` export files
//! - Merge listens into per-track and per-artist summaries
//! - Rank summaries by listening time or play count
//! - Pick the most-listened track of each calendar month
//! - Generate reports in table and JSON formats
//!
//! # Examples
//!
//! ```no_run
//! use streamstat::{
//!     data_loader::DataLoader,
//!     provider::HistorySource,
//!     ranking::{RankKey, SortOrder},
//! };
//!
//! fn main() -> streamstat::Result<()> {
//!     let loader = DataLoader::from_dir("my_spotify_data", DataLoader::DEFAULT_PREFIX)?;
//!     let tracks = loader.load_tracks()?;
//!
//!     for track in tracks.ranked(RankKey::TotalTime, SortOrder::Descending).iter().take(10) {
//!         println!("{} - {}", track.title(), track.artist());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;

pub use streamstat_core::{
    aggregation, aggregation_types, error, monthly, provider, ranking, time_format, timezone,
    types,
};
pub use streamstat_spotify::data_loader;
pub use streamstat_terminal::output;

// Re-export commonly used types
pub use error::{Result, StreamstatError};
pub use types::{ArtistName, ListenEvent, TrackTitle, YearMonth};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
