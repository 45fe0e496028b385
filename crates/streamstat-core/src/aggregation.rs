//! Aggregation of listen events into track and artist summaries
//!
//! Track aggregation is a fold: each [`ListenEvent`] is moved into an owned
//! [`TrackTable`] accumulator which is handed back for the next event. The
//! finished table is never mutated again; artist summaries and monthly
//! buckets borrow from it.
//!
//! # Ordering
//!
//! Both tables iterate in first-occurrence order. This order is what
//! [`crate::ranking::rank`] falls back on for ties, so feeding the same files
//! in the same order always yields the same rankings.
//!
//! # Examples
//!
//! ```
//! use streamstat_core::aggregation::TrackTable;
//! use streamstat_core::types::{ArtistName, ListenEvent, TrackTitle};
//! use chrono::{TimeZone, Utc};
//!
//! let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let events = vec![
//!     ListenEvent::new(TrackTitle::new("X"), ArtistName::new("A"), 1000, at),
//!     ListenEvent::new(TrackTitle::new("X"), ArtistName::new("B"), 500, at),
//! ];
//!
//! let tracks = TrackTable::from_events(events);
//! let x = tracks.get("X").unwrap();
//! assert_eq!(x.artist().as_str(), "A");
//! assert_eq!(x.total_ms_played(), 1500);
//!
//! let artists = tracks.artists();
//! assert_eq!(artists.get("A").unwrap().play_count(), 2);
//! ```

use crate::aggregation_types::{ArtistSummary, TrackSummary};
use crate::error::{Result, StreamstatError};
use crate::types::{ListenEvent, TrackTitle};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Every distinct title with its summary, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTable {
    tracks: Vec<TrackSummary>,
    index: HashMap<TrackTitle, usize>,
}

impl TrackTable {
    /// Aggregate already decoded events
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = ListenEvent>,
    {
        let table = events.into_iter().fold(Self::default(), Self::with_event);
        debug!("Aggregated {} distinct tracks", table.len());
        table
    }

    /// Aggregate events straight from a loader, stopping at the first error
    ///
    /// A malformed record anywhere aborts the whole run; no partial table is
    /// returned.
    pub fn try_from_events<I>(events: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<ListenEvent>>,
    {
        let table = events
            .into_iter()
            .try_fold(Self::default(), |table, event| {
                Ok::<_, StreamstatError>(table.with_event(event?))
            })?;
        debug!("Aggregated {} distinct tracks", table.len());
        Ok(table)
    }

    fn with_event(mut self, event: ListenEvent) -> Self {
        match self.index.get(event.track.as_str()) {
            Some(&position) => {
                let summary = &mut self.tracks[position];
                if summary.artist() != &event.artist {
                    debug!(
                        "Track '{}' also reported by '{}', keeping '{}'",
                        event.track,
                        event.artist,
                        summary.artist()
                    );
                }
                summary.record(event.ms_played, event.end_time);
            }
            None => {
                trace!("New track '{}' by '{}'", event.track, event.artist);
                self.index.insert(event.track.clone(), self.tracks.len());
                self.tracks.push(TrackSummary::new(event));
            }
        }
        self
    }

    /// Look up a track by title
    pub fn get(&self, title: &str) -> Option<&TrackSummary> {
        self.index.get(title).map(|&position| &self.tracks[position])
    }

    /// Tracks in first-occurrence order
    pub fn iter(&self) -> std::slice::Iter<'_, TrackSummary> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Play time summed over every track
    pub fn total_ms_played(&self) -> u64 {
        self.tracks
            .iter()
            .map(TrackSummary::total_ms_played)
            .fold(0, u64::saturating_add)
    }

    /// Roll the tracks up by artist of record
    pub fn artists(&self) -> ArtistTable<'_> {
        ArtistTable::from_tracks(self)
    }
}

impl<'a> IntoIterator for &'a TrackTable {
    type Item = &'a TrackSummary;
    type IntoIter = std::slice::Iter<'a, TrackSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Every distinct artist with its summary, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistTable<'a> {
    artists: Vec<ArtistSummary<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ArtistTable<'a> {
    /// Group finalized tracks by artist in a single pass
    pub fn from_tracks(tracks: &'a TrackTable) -> Self {
        let mut table = Self::default();
        for track in tracks {
            match table.index.get(track.artist().as_str()) {
                Some(&position) => table.artists[position].add_track(track),
                None => {
                    table
                        .index
                        .insert(track.artist().as_str(), table.artists.len());
                    table.artists.push(ArtistSummary::new(track));
                }
            }
        }
        debug!("Aggregated {} distinct artists", table.len());
        table
    }

    /// Look up an artist by name
    pub fn get(&self, name: &str) -> Option<&ArtistSummary<'a>> {
        self.index.get(name).map(|&position| &self.artists[position])
    }

    /// Artists in first-occurrence order
    pub fn iter(&self) -> std::slice::Iter<'_, ArtistSummary<'a>> {
        self.artists.iter()
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

impl<'t, 'a> IntoIterator for &'t ArtistTable<'a> {
    type Item = &'t ArtistSummary<'a>;
    type IntoIter = std::slice::Iter<'t, ArtistSummary<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
