//! Aggregation data types for streamstat
//!
//! Pure data structures for aggregated listening summaries. The builders
//! that produce them live in [`crate::aggregation`] and [`crate::monthly`].

use crate::types::{ArtistName, ListenEvent, TrackTitle, YearMonth};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One listen of a track, kept after its event has been folded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Milliseconds played
    pub ms_played: u64,
    /// When playback ended
    pub end_time: DateTime<Utc>,
}

/// Aggregate of every listen sharing a title
///
/// `total_ms_played` always equals the sum of `ms_played` over
/// `occurrences`; the fields are private so only the aggregator can grow
/// them together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSummary {
    title: TrackTitle,
    artist: ArtistName,
    total_ms_played: u64,
    occurrences: Vec<Occurrence>,
}

impl TrackSummary {
    /// Start a summary from the first listen of a title
    pub(crate) fn new(event: ListenEvent) -> Self {
        Self {
            title: event.track,
            artist: event.artist,
            total_ms_played: event.ms_played,
            occurrences: vec![Occurrence {
                ms_played: event.ms_played,
                end_time: event.end_time,
            }],
        }
    }

    /// Fold a later listen of the same title into the summary
    ///
    /// The artist stays the one seen first.
    pub(crate) fn record(&mut self, ms_played: u64, end_time: DateTime<Utc>) {
        self.total_ms_played = self.total_ms_played.saturating_add(ms_played);
        self.occurrences.push(Occurrence {
            ms_played,
            end_time,
        });
    }

    pub fn title(&self) -> &TrackTitle {
        &self.title
    }

    /// Artist of record (the artist of the first listen)
    pub fn artist(&self) -> &ArtistName {
        &self.artist
    }

    pub fn total_ms_played(&self) -> u64 {
        self.total_ms_played
    }

    /// Listens in input order
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Number of individual listens
    pub fn play_count(&self) -> u64 {
        self.occurrences.len() as u64
    }
}

/// Aggregate of every track sharing an artist
///
/// Borrows its tracks from the [`crate::aggregation::TrackTable`] it was
/// built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSummary<'a> {
    name: &'a ArtistName,
    total_ms_played: u64,
    play_count: u64,
    tracks: Vec<&'a TrackSummary>,
}

impl<'a> ArtistSummary<'a> {
    pub(crate) fn new(track: &'a TrackSummary) -> Self {
        Self {
            name: track.artist(),
            total_ms_played: track.total_ms_played(),
            play_count: track.play_count(),
            tracks: vec![track],
        }
    }

    pub(crate) fn add_track(&mut self, track: &'a TrackSummary) {
        self.total_ms_played = self.total_ms_played.saturating_add(track.total_ms_played());
        self.play_count = self.play_count.saturating_add(track.play_count());
        self.tracks.push(track);
    }

    pub fn name(&self) -> &'a ArtistName {
        self.name
    }

    pub fn total_ms_played(&self) -> u64 {
        self.total_ms_played
    }

    /// Individual listens across all tracks, not the number of tracks
    pub fn play_count(&self) -> u64 {
        self.play_count
    }

    /// Tracks credited to this artist, in track-table order
    pub fn tracks(&self) -> &[&'a TrackSummary] {
        &self.tracks
    }
}

/// Most listened track of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTop {
    /// The reported month
    pub month: YearMonth,
    /// Winning track
    pub title: TrackTitle,
    /// Artist of record of the winning track
    pub artist: ArtistName,
    /// Summed play time of the winning track within the month
    pub ms_played: u64,
    /// Listens of the winning track within the month
    pub listens: u64,
    /// Summed play time of every track within the month
    pub month_total_ms: u64,
}

/// Overall figures shown under a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_ms_played: u64,
    pub play_count: u64,
    pub tracks: usize,
    pub artists: usize,
}

impl Totals {
    pub fn from_tracks<'a>(tracks: impl IntoIterator<Item = &'a TrackSummary>) -> Self {
        let mut totals = Self::default();
        let mut artists = std::collections::HashSet::new();
        for track in tracks {
            totals.total_ms_played = totals.total_ms_played.saturating_add(track.total_ms_played());
            totals.play_count = totals.play_count.saturating_add(track.play_count());
            totals.tracks += 1;
            artists.insert(track.artist());
        }
        totals.artists = artists.len();
        totals
    }
}
