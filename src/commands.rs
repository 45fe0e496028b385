//! Report rendering for the CLI commands
//!
//! Each command turns an aggregated [`TrackTable`] into formatted output.
//! Loading and printing stay in `main`, so everything here can be driven
//! from tests with in-memory tables.

use crate::cli::{Command, MAX_MONTHS, MonthlyArgs, RankArgs};
use streamstat_core::aggregation::TrackTable;
use streamstat_core::aggregation_types::{MonthlyTop, Totals};
use streamstat_core::error::{Result, StreamstatError};
use streamstat_core::monthly::MonthlyBuckets;
use streamstat_core::timezone::TimezoneConfig;
use streamstat_core::types::YearMonth;
use streamstat_terminal::OutputFormatter;
use tracing::{info, warn};

/// Render `command` over `tracks`
pub fn render(
    command: &Command,
    tracks: &TrackTable,
    tz_config: &TimezoneConfig,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    match command {
        Command::Tracks(args) => Ok(render_tracks(args, tracks, formatter)),
        Command::Artists(args) => Ok(render_artists(args, tracks, formatter)),
        Command::Monthly(args) => {
            let report = monthly_report(args, tracks, tz_config)?;
            Ok(formatter.format_monthly(&report))
        }
    }
}

fn render_tracks(args: &RankArgs, tracks: &TrackTable, formatter: &dyn OutputFormatter) -> String {
    info!("Ranking {} tracks by {}", tracks.len(), args.sort);
    let mut ranked = tracks.ranked(args.sort, args.order());
    if let Some(top) = args.top {
        ranked.truncate(top);
    }
    formatter.format_tracks(&ranked, &Totals::from_tracks(tracks))
}

fn render_artists(args: &RankArgs, tracks: &TrackTable, formatter: &dyn OutputFormatter) -> String {
    let artists = tracks.artists();
    info!("Ranking {} artists by {}", artists.len(), args.sort);
    let mut ranked = artists.ranked(args.sort, args.order());
    if let Some(top) = args.top {
        ranked.truncate(top);
    }
    formatter.format_artists(&ranked, &Totals::from_tracks(tracks))
}

/// Top track of every month in the requested window
///
/// Without `--from` the window ends at the latest month holding a listen.
pub fn monthly_report(
    args: &MonthlyArgs,
    tracks: &TrackTable,
    tz_config: &TimezoneConfig,
) -> Result<Vec<MonthlyTop>> {
    if args.months == 0 {
        return Err(StreamstatError::InvalidArgument(
            "--months must be at least 1".to_string(),
        ));
    }
    if args.months > MAX_MONTHS {
        return Err(StreamstatError::InvalidArgument(format!(
            "--months must be at most {MAX_MONTHS}"
        )));
    }

    info!("Using timezone: {}", tz_config.display_name());
    let buckets = MonthlyBuckets::from_tracks(tracks, &tz_config.tz);

    let window = match args.from {
        Some(from) => YearMonth::window(from, args.months)?,
        None => match buckets.latest_month() {
            Some(latest) => YearMonth::window_ending(latest, args.months)?,
            None => {
                warn!("No listens found, monthly report is empty");
                return Ok(Vec::new());
            }
        },
    };

    if args.skip_missing {
        Ok(buckets.report_skipping_missing(&window))
    } else {
        buckets.report(&window)
    }
}
