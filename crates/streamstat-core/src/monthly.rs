//! Month-bucketed listening reports
//!
//! [`MonthlyBuckets`] regroups every occurrence of every track by the
//! calendar month its playback ended in. Buckets hold one `(title, ms)`
//! entry per listen; summing per title only happens when a month is
//! reported.
//!
//! The months to report are always passed in by the caller, usually built
//! with [`YearMonth::window`] or [`YearMonth::window_ending`].
//!
//! # Examples
//!
//! ```
//! use streamstat_core::aggregation::TrackTable;
//! use streamstat_core::monthly::MonthlyBuckets;
//! use streamstat_core::types::{ArtistName, ListenEvent, TrackTitle, YearMonth};
//! use chrono::{TimeZone, Utc};
//! use chrono_tz::Tz;
//!
//! let jan = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
//! let tracks = TrackTable::from_events(vec![
//!     ListenEvent::new(TrackTitle::new("X"), ArtistName::new("A"), 100, jan),
//!     ListenEvent::new(TrackTitle::new("Y"), ArtistName::new("B"), 50, jan),
//!     ListenEvent::new(TrackTitle::new("Y"), ArtistName::new("B"), 60, jan),
//! ]);
//!
//! let buckets = MonthlyBuckets::from_tracks(&tracks, &Tz::UTC);
//! let top = buckets.top_track(YearMonth::new(2024, 1).unwrap()).unwrap();
//! assert_eq!(top.title.as_str(), "Y");
//! assert_eq!(top.ms_played, 110);
//! ```

use crate::aggregation::TrackTable;
use crate::aggregation_types::MonthlyTop;
use crate::error::{Result, StreamstatError};
use crate::types::{TrackTitle, YearMonth};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One listen inside a monthly bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyListen<'a> {
    pub title: &'a TrackTitle,
    pub ms_played: u64,
}

/// Listens grouped by calendar month, borrowing titles from a [`TrackTable`]
#[derive(Debug, Clone)]
pub struct MonthlyBuckets<'a> {
    tracks: &'a TrackTable,
    buckets: BTreeMap<YearMonth, Vec<MonthlyListen<'a>>>,
}

impl<'a> MonthlyBuckets<'a> {
    /// Bucket every occurrence by the month it ended in, as seen in `tz`
    pub fn from_tracks(tracks: &'a TrackTable, tz: &Tz) -> Self {
        let mut buckets: BTreeMap<YearMonth, Vec<MonthlyListen<'a>>> = BTreeMap::new();

        for track in tracks {
            for occurrence in track.occurrences() {
                let month = YearMonth::from_datetime(&occurrence.end_time.with_timezone(tz));
                buckets.entry(month).or_default().push(MonthlyListen {
                    title: track.title(),
                    ms_played: occurrence.ms_played,
                });
            }
        }

        debug!("Bucketed listens into {} months", buckets.len());
        Self { tracks, buckets }
    }

    /// Listens of one month, in track-table order
    pub fn bucket(&self, month: YearMonth) -> Option<&[MonthlyListen<'a>]> {
        self.buckets.get(&month).map(Vec::as_slice)
    }

    /// Months holding at least one listen, oldest first
    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.buckets.keys().copied()
    }

    /// Most recent month holding a listen
    pub fn latest_month(&self) -> Option<YearMonth> {
        self.buckets.keys().next_back().copied()
    }

    /// The track with the largest summed play time in `month`
    ///
    /// Equal sums go to the lexicographically smallest title.
    ///
    /// # Errors
    ///
    /// [`StreamstatError::MissingMonth`] when no listen fell in `month`.
    pub fn top_track(&self, month: YearMonth) -> Result<MonthlyTop> {
        let listens = self
            .buckets
            .get(&month)
            .ok_or(StreamstatError::MissingMonth(month))?;

        let mut summed: BTreeMap<&TrackTitle, (u64, u64)> = BTreeMap::new();
        for listen in listens {
            let entry = summed.entry(listen.title).or_default();
            entry.0 = entry.0.saturating_add(listen.ms_played);
            entry.1 += 1;
        }
        let month_total_ms = summed
            .values()
            .map(|&(ms, _)| ms)
            .fold(0, u64::saturating_add);

        let (title, (ms_played, listens)) = summed
            .into_iter()
            .max_by(|(a_title, (a_ms, _)), (b_title, (b_ms, _))| {
                a_ms.cmp(b_ms).then_with(|| b_title.cmp(a_title))
            })
            .ok_or(StreamstatError::MissingMonth(month))?;

        let artist = self
            .tracks
            .get(title.as_str())
            .map(|track| track.artist().clone())
            .ok_or(StreamstatError::MissingMonth(month))?;

        Ok(MonthlyTop {
            month,
            title: title.clone(),
            artist,
            ms_played,
            listens,
            month_total_ms,
        })
    }

    /// Top track for every requested month, failing on the first empty one
    pub fn report(&self, months: &[YearMonth]) -> Result<Vec<MonthlyTop>> {
        months.iter().map(|&month| self.top_track(month)).collect()
    }

    /// Top track for every requested month that has data
    pub fn report_skipping_missing(&self, months: &[YearMonth]) -> Vec<MonthlyTop> {
        months
            .iter()
            .filter_map(|&month| match self.top_track(month) {
                Ok(top) => Some(top),
                Err(e) => {
                    warn!("Skipping {}: {}", month, e);
                    None
                }
            })
            .collect()
    }
}
