//! Output formatting module for streamstat
//!
//! This module provides formatters for displaying listening reports in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use streamstat_core::aggregation::TrackTable;
//! use streamstat_core::aggregation_types::Totals;
//! use streamstat_core::ranking::{RankKey, SortOrder};
//! use streamstat_core::types::ListenEvent;
//! use streamstat_terminal::get_formatter;
//! use serde_json::json;
//!
//! let event = ListenEvent::decode(json!({
//!     "endTime": "2024-01-01 10:00",
//!     "artistName": "Burial",
//!     "trackName": "Archangel",
//!     "msPlayed": 238000
//! })).unwrap();
//! let tracks = TrackTable::from_events(vec![event]);
//! let ranked = tracks.ranked(RankKey::TotalTime, SortOrder::Descending);
//! let totals = Totals::from_tracks(&tracks);
//!
//! let formatter = get_formatter(true);
//! let output = formatter.format_tracks(&ranked, &totals);
//! assert!(output.contains("Archangel"));
//! ```

use colored::Colorize;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;
use streamstat_core::aggregation_types::{ArtistSummary, MonthlyTop, Totals, TrackSummary};
use streamstat_core::time_format::format_duration_ms;

/// Trait for output formatters
///
/// This trait defines the interface for formatting ranked summaries and
/// monthly reports. Implementations can provide different output formats.
pub trait OutputFormatter {
    /// Format ranked tracks with overall totals
    fn format_tracks(&self, data: &[&TrackSummary], totals: &Totals) -> String;

    /// Format ranked artists with overall totals
    fn format_artists(&self, data: &[&ArtistSummary<'_>], totals: &Totals) -> String;

    /// Format the per-month top tracks
    fn format_monthly(&self, data: &[MonthlyTop]) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. The summary line
/// under each table is colored unless `NO_COLOR` is set.
pub struct TableFormatter {
    /// Whether to use colored output
    colored_output: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Create a new TableFormatter, honouring `NO_COLOR`
    pub fn new() -> Self {
        Self {
            colored_output: std::env::var("NO_COLOR").is_err(),
        }
    }

    /// Force colors on or off
    pub fn with_color(mut self, colored_output: bool) -> Self {
        self.colored_output = colored_output;
        self
    }

    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    fn summary_line(&self, label: &str, totals: &Totals) -> String {
        let time = format_duration_ms(totals.total_ms_played);
        let counts = format!(
            "{} plays, {} tracks, {} artists",
            Self::format_number(totals.play_count),
            Self::format_number(totals.tracks as u64),
            Self::format_number(totals.artists as u64)
        );
        if self.colored_output {
            format!("{} {} ({})\n", label.bold(), time.green(), counts.dimmed())
        } else {
            format!("{label} {time} ({counts})\n")
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_tracks(&self, data: &[&TrackSummary], totals: &Totals) -> String {
        let mut table = Self::new_table();

        table.set_titles(row![
            b -> "#",
            b -> "Track",
            b -> "Artist",
            b -> "Plays",
            b -> "Listening Time"
        ]);

        for (position, track) in data.iter().enumerate() {
            table.add_row(row![
                r -> position + 1,
                track.title(),
                track.artist(),
                r -> Self::format_number(track.play_count()),
                r -> format_duration_ms(track.total_ms_played())
            ]);
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 5]));

        table.add_row(row![
            "",
            b -> "TOTAL",
            "",
            b -> Self::format_number(totals.play_count),
            b -> format_duration_ms(totals.total_ms_played)
        ]);

        let mut output = table.to_string();
        output.push_str(&self.summary_line("Listened:", totals));
        output
    }

    fn format_artists(&self, data: &[&ArtistSummary<'_>], totals: &Totals) -> String {
        let mut table = Self::new_table();

        table.set_titles(row![
            b -> "#",
            b -> "Artist",
            b -> "Tracks",
            b -> "Plays",
            b -> "Listening Time"
        ]);

        for (position, artist) in data.iter().enumerate() {
            table.add_row(row![
                r -> position + 1,
                artist.name(),
                r -> artist.tracks().len(),
                r -> Self::format_number(artist.play_count()),
                r -> format_duration_ms(artist.total_ms_played())
            ]);
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 5]));

        table.add_row(row![
            "",
            b -> "TOTAL",
            b -> Self::format_number(totals.tracks as u64),
            b -> Self::format_number(totals.play_count),
            b -> format_duration_ms(totals.total_ms_played)
        ]);

        let mut output = table.to_string();
        output.push_str(&self.summary_line("Listened:", totals));
        output
    }

    fn format_monthly(&self, data: &[MonthlyTop]) -> String {
        let mut table = Self::new_table();

        table.set_titles(row![
            b -> "Month",
            b -> "Top Track",
            b -> "Artist",
            b -> "Plays",
            b -> "Track Time",
            b -> "Month Total"
        ]);

        for top in data {
            table.add_row(row![
                top.month,
                top.title,
                top.artist,
                r -> Self::format_number(top.listens),
                r -> format_duration_ms(top.ms_played),
                r -> format_duration_ms(top.month_total_ms)
            ]);
        }

        let mut output = table.to_string();
        let total = data
            .iter()
            .map(|top| top.month_total_ms)
            .fold(0, u64::saturating_add);
        let line = format!("{} months, {} listened", data.len(), format_duration_ms(total));
        if self.colored_output {
            output.push_str(&format!("{}\n", line.green()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }
}

/// JSON formatter for machine-readable output
///
/// Produces structured JSON output with raw millisecond values alongside
/// the formatted durations.
pub struct JsonFormatter;

impl JsonFormatter {
    fn totals_json(totals: &Totals) -> serde_json::Value {
        json!({
            "total_ms_played": totals.total_ms_played,
            "listening_time": format_duration_ms(totals.total_ms_played),
            "play_count": totals.play_count,
            "tracks": totals.tracks,
            "artists": totals.artists,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_tracks(&self, data: &[&TrackSummary], totals: &Totals) -> String {
        let output = json!({
            "tracks": data.iter().enumerate().map(|(position, track)| {
                json!({
                    "rank": position + 1,
                    "title": track.title(),
                    "artist": track.artist(),
                    "play_count": track.play_count(),
                    "total_ms_played": track.total_ms_played(),
                    "listening_time": format_duration_ms(track.total_ms_played()),
                })
            }).collect::<Vec<_>>(),
            "totals": Self::totals_json(totals),
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_artists(&self, data: &[&ArtistSummary<'_>], totals: &Totals) -> String {
        let output = json!({
            "artists": data.iter().enumerate().map(|(position, artist)| {
                json!({
                    "rank": position + 1,
                    "name": artist.name(),
                    "play_count": artist.play_count(),
                    "total_ms_played": artist.total_ms_played(),
                    "listening_time": format_duration_ms(artist.total_ms_played()),
                    "tracks": artist.tracks().iter().map(|t| t.title()).collect::<Vec<_>>(),
                })
            }).collect::<Vec<_>>(),
            "totals": Self::totals_json(totals),
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_monthly(&self, data: &[MonthlyTop]) -> String {
        let output = json!({ "monthly": data });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Get appropriate formatter based on output preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}
