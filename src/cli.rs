//! CLI interface for streamstat
//!
//! This module defines the command-line interface using clap. Global
//! flags select where the streaming history comes from and how results are
//! printed; the subcommand selects the report.
//!
//! When the command is omitted, streamstat ranks artists by play count.
//!
//! # Example
//!
//! ```bash
//! # Top 20 tracks by listening time from an unpacked export
//! streamstat --dir my_spotify_data tracks --top 20
//!
//! # Top track of each month of 2024, months in Berlin time
//! streamstat --timezone Europe/Berlin monthly --from 2024-01 --months 12
//!
//! # Artists by play count as JSON
//! STREAMSTAT_DATA_DIR=my_spotify_data streamstat --json artists --sort plays
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use streamstat_core::ranking::{RankKey, SortOrder};
use streamstat_core::types::YearMonth;
use streamstat_spotify::DataLoader;

/// Number of months a monthly report covers unless told otherwise
pub const DEFAULT_MONTHS: usize = 13;

/// Longest monthly report accepted, one hundred years
pub const MAX_MONTHS: usize = 1200;

/// Rank tracks, artists and months from exported streaming history
#[derive(Parser, Debug, Clone)]
#[command(name = "streamstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Folder holding the unpacked streaming history export
    #[arg(
        long,
        short = 'd',
        env = "STREAMSTAT_DATA_DIR",
        default_value = ".",
        global = true
    )]
    pub dir: PathBuf,

    /// File name prefix of history files inside the folder
    #[arg(long, default_value = DataLoader::DEFAULT_PREFIX, global = true)]
    pub prefix: String,

    /// Read these files instead of searching the folder (repeatable, kept in order)
    #[arg(long = "file", short = 'f', global = true)]
    pub files: Vec<PathBuf>,

    /// Timezone for month grouping (e.g. "America/New_York", "Asia/Tokyo", "UTC")
    /// If not specified, months are computed in UTC
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use the system's local timezone for month grouping
    #[arg(long, global = true, conflicts_with = "timezone")]
    pub local: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

// ---------------------------------------------------------------------------
// Report arguments
// ---------------------------------------------------------------------------

/// Arguments shared by the track and artist rankings
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RankArgs {
    /// Rank by total listening time or by number of plays
    #[arg(long, short = 's', default_value_t = RankKey::TotalTime)]
    pub sort: RankKey,

    /// Smallest first instead of largest first
    #[arg(long)]
    pub ascending: bool,

    /// Only show the first N entries
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

impl RankArgs {
    /// Requested ranking direction
    pub fn order(&self) -> SortOrder {
        if self.ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// Arguments for the monthly top-track report
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MonthlyArgs {
    /// First month of the report (YYYY-MM); defaults to ending at the latest month with data
    #[arg(long)]
    pub from: Option<YearMonth>,

    /// Number of consecutive months to report
    #[arg(
        long,
        short = 'm',
        default_value_t = DEFAULT_MONTHS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_MONTHS as u64)
    )]
    pub months: usize,

    /// Skip months without listens instead of failing
    #[arg(long)]
    pub skip_missing: bool,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank tracks by listening time or play count
    Tracks(RankArgs),

    /// Rank artists by listening time or play count
    Artists(RankArgs),

    /// Show the most-listened track of each month
    Monthly(MonthlyArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Artists(RankArgs {
            sort: RankKey::PlayCount,
            ascending: false,
            top: None,
        })
    }
}
