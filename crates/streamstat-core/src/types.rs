//! Core domain types for streamstat
//!
//! This module contains the fundamental types used throughout the streamstat
//! crates: strongly-typed track and artist names, the decoded listen event,
//! and the calendar month key used for monthly reports.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{RecordError, Result, StreamstatError};

/// Format of the `endTime` field in streaming history exports
pub const END_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Largest `msPlayed` a single record may carry (about 49 days)
///
/// Keeping each play within `u32` range means no realistic number of
/// records can overflow the `u64` sums built from them.
pub const MAX_MS_PLAYED: u64 = u32::MAX as u64;

/// Strongly-typed track title wrapper
///
/// Titles are the merge key for track aggregation: two listens with the
/// same title are the same track, whatever artist they report.
///
/// # Examples
/// ```
/// use streamstat_core::types::TrackTitle;
///
/// let title = TrackTitle::new("Windowlicker");
/// assert_eq!(title.as_str(), "Windowlicker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackTitle(String);

impl TrackTitle {
    /// Create a new TrackTitle from any string-like type
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for TrackTitle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed artist name wrapper
///
/// # Examples
/// ```
/// use streamstat_core::types::ArtistName;
///
/// let artist = ArtistName::new("Aphex Twin");
/// assert_eq!(artist.to_string(), "Aphex Twin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtistName(String);

impl ArtistName {
    /// Create a new ArtistName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ArtistName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Calendar month used as the monthly bucket key
///
/// Orders chronologically, displays as `YYYY-MM`, and parses from either
/// `YYYY-MM` or the unpadded `YYYY-M` form.
///
/// # Examples
/// ```
/// use streamstat_core::types::YearMonth;
///
/// let month: YearMonth = "2024-8".parse().unwrap();
/// assert_eq!(month.to_string(), "2024-08");
///
/// let window = YearMonth::window(month, 13).unwrap();
/// assert_eq!(window.len(), 13);
/// assert_eq!(window[12].to_string(), "2025-08");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Earliest year a month can be built for
    pub const MIN_YEAR: i32 = 1;
    /// Latest year a month can be built for
    pub const MAX_YEAR: i32 = 9999;

    /// Create a new YearMonth, rejecting months outside 1..=12 and years
    /// outside [`Self::MIN_YEAR`]..=[`Self::MAX_YEAR`]
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(StreamstatError::InvalidMonth(format!(
                "Year must be between {}-{}, got {year}",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(StreamstatError::InvalidMonth(format!(
                "Month must be between 1-12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given instant, in the instant's own timezone
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month, `None` past the end of [`Self::MAX_YEAR`]
    pub fn succ(self) -> Option<Self> {
        if self.month < 12 {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        } else if self.year < Self::MAX_YEAR {
            Some(Self {
                year: self.year + 1,
                month: 1,
            })
        } else {
            None
        }
    }

    /// The preceding calendar month, `None` before the start of [`Self::MIN_YEAR`]
    pub fn pred(self) -> Option<Self> {
        if self.month > 1 {
            Some(Self {
                year: self.year,
                month: self.month - 1,
            })
        } else if self.year > Self::MIN_YEAR {
            Some(Self {
                year: self.year - 1,
                month: 12,
            })
        } else {
            None
        }
    }

    /// `count` consecutive months starting at `start`
    ///
    /// # Errors
    ///
    /// [`StreamstatError::InvalidMonth`] if the window runs past [`Self::MAX_YEAR`].
    pub fn window(start: Self, count: usize) -> Result<Vec<Self>> {
        let months: Vec<Self> = std::iter::successors(Some(start), |month| month.succ())
            .take(count)
            .collect();
        if months.len() < count {
            return Err(StreamstatError::InvalidMonth(format!(
                "{count} months from {start} run past year {}",
                Self::MAX_YEAR
            )));
        }
        Ok(months)
    }

    /// `count` consecutive months ending at (and including) `end`
    ///
    /// # Errors
    ///
    /// [`StreamstatError::InvalidMonth`] if the window starts before [`Self::MIN_YEAR`].
    pub fn window_ending(end: Self, count: usize) -> Result<Vec<Self>> {
        let mut start = end;
        for _ in 1..count {
            start = start.pred().ok_or_else(|| {
                StreamstatError::InvalidMonth(format!(
                    "{count} months up to {end} start before year {}",
                    Self::MIN_YEAR
                ))
            })?;
        }
        Self::window(start, count)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = StreamstatError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s.trim().split_once('-').ok_or_else(|| {
            StreamstatError::InvalidMonth(format!(
                "Invalid month format '{s}', expected YYYY-MM"
            ))
        })?;
        let year = year
            .parse::<i32>()
            .map_err(|_| StreamstatError::InvalidMonth(format!("Invalid year in '{s}'")))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| StreamstatError::InvalidMonth(format!("Invalid month in '{s}'")))?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw record as it appears in a `StreamingHistory_music_*.json` export
///
/// Every field is required and strictly typed; `msPlayed` must be a
/// non-negative integer. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStreamingRecord {
    /// End of playback, `YYYY-MM-DD HH:MM` in UTC
    pub end_time: String,
    /// Artist as reported by the service
    pub artist_name: String,
    /// Track title
    pub track_name: String,
    /// Milliseconds actually played
    pub ms_played: u64,
}

/// One recorded play of a track
///
/// # Examples
/// ```
/// use streamstat_core::types::ListenEvent;
/// use serde_json::json;
///
/// let event = ListenEvent::decode(json!({
///     "endTime": "2024-01-01 10:00",
///     "artistName": "Boards of Canada",
///     "trackName": "Roygbiv",
///     "msPlayed": 151000
/// })).unwrap();
/// assert_eq!(event.track.as_str(), "Roygbiv");
/// assert_eq!(event.ms_played, 151000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenEvent {
    /// Track title
    pub track: TrackTitle,
    /// Artist name
    pub artist: ArtistName,
    /// Milliseconds played
    pub ms_played: u64,
    /// When playback ended
    pub end_time: DateTime<Utc>,
}

impl ListenEvent {
    /// Create a listen event from already validated parts
    pub fn new(
        track: TrackTitle,
        artist: ArtistName,
        ms_played: u64,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            track,
            artist,
            ms_played,
            end_time,
        }
    }

    /// Decode one JSON record, validating every field
    pub fn decode(value: serde_json::Value) -> std::result::Result<Self, RecordError> {
        let raw: RawStreamingRecord = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Create from a raw streaming record
    pub fn from_raw(raw: RawStreamingRecord) -> std::result::Result<Self, RecordError> {
        if raw.ms_played > MAX_MS_PLAYED {
            return Err(RecordError::MsPlayedOutOfRange {
                value: raw.ms_played,
                max: MAX_MS_PLAYED,
            });
        }

        let end_time = NaiveDateTime::parse_from_str(&raw.end_time, END_TIME_FORMAT)
            .map_err(|source| RecordError::EndTime {
                value: raw.end_time.clone(),
                source,
            })?
            .and_utc();

        Ok(Self {
            track: TrackTitle::new(raw.track_name),
            artist: ArtistName::new(raw.artist_name),
            ms_played: raw.ms_played,
            end_time,
        })
    }
}
