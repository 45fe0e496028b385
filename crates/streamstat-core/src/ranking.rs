//! Stable rankings of track and artist summaries
//!
//! # Examples
//!
//! ```
//! use streamstat_core::ranking::{RankKey, SortOrder};
//!
//! let key: RankKey = "plays".parse().unwrap();
//! assert_eq!(key, RankKey::PlayCount);
//! assert_eq!(SortOrder::default(), SortOrder::Descending);
//! ```

use crate::aggregation::{ArtistTable, TrackTable};
use crate::aggregation_types::{ArtistSummary, TrackSummary};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

/// Numeric key a ranking sorts by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankKey {
    /// Summed milliseconds played
    #[default]
    TotalTime,
    /// Number of individual listens
    PlayCount,
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalTime => write!(f, "time"),
            Self::PlayCount => write!(f, "plays"),
        }
    }
}

impl std::str::FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" | "total-time" => Ok(Self::TotalTime),
            "plays" | "play-count" => Ok(Self::PlayCount),
            _ => Err(format!("Invalid sort key: {s} (expected 'time' or 'plays')")),
        }
    }
}

/// Direction of a ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Anything that can be ranked by total time or play count
pub trait Rankable {
    fn total_ms_played(&self) -> u64;

    fn play_count(&self) -> u64;

    fn rank_value(&self, key: RankKey) -> u64 {
        match key {
            RankKey::TotalTime => self.total_ms_played(),
            RankKey::PlayCount => self.play_count(),
        }
    }
}

impl Rankable for TrackSummary {
    fn total_ms_played(&self) -> u64 {
        TrackSummary::total_ms_played(self)
    }

    fn play_count(&self) -> u64 {
        TrackSummary::play_count(self)
    }
}

impl Rankable for ArtistSummary<'_> {
    fn total_ms_played(&self) -> u64 {
        ArtistSummary::total_ms_played(self)
    }

    fn play_count(&self) -> u64 {
        ArtistSummary::play_count(self)
    }
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn total_ms_played(&self) -> u64 {
        (**self).total_ms_played()
    }

    fn play_count(&self) -> u64 {
        (**self).play_count()
    }
}

/// Order summaries by `key`
///
/// The sort is stable in both directions: items with equal keys keep the
/// order they were given in, which for table iteration is first-occurrence
/// order.
pub fn rank<T, I>(items: I, key: RankKey, order: SortOrder) -> Vec<T>
where
    T: Rankable,
    I: IntoIterator<Item = T>,
{
    let mut ranked: Vec<T> = items.into_iter().collect();
    match order {
        SortOrder::Ascending => ranked.sort_by_key(|item| item.rank_value(key)),
        SortOrder::Descending => ranked.sort_by_key(|item| Reverse(item.rank_value(key))),
    }
    ranked
}

impl TrackTable {
    /// Tracks ranked by `key`
    pub fn ranked(&self, key: RankKey, order: SortOrder) -> Vec<&TrackSummary> {
        rank(self.iter(), key, order)
    }
}

impl<'a> ArtistTable<'a> {
    /// Artists ranked by `key`
    pub fn ranked(&self, key: RankKey, order: SortOrder) -> Vec<&ArtistSummary<'a>> {
        rank(self.iter(), key, order)
    }
}
