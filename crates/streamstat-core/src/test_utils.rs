//! Shared test utilities for unit tests
//!
//! Integration tests cannot reach this module because it is
//! `#[cfg(test)]`; they carry their own builders in `tests/common/mod.rs`.

use crate::types::{ArtistName, END_TIME_FORMAT, ListenEvent, TrackTitle};
use chrono::NaiveDateTime;

/// Build a listen event from literals, `end` in export format
pub fn listen(title: &str, artist: &str, ms_played: u64, end: &str) -> ListenEvent {
    let end_time = NaiveDateTime::parse_from_str(end, END_TIME_FORMAT)
        .unwrap_or_else(|e| panic!("bad test timestamp '{end}': {e}"))
        .and_utc();
    ListenEvent::new(
        TrackTitle::new(title),
        ArtistName::new(artist),
        ms_played,
        end_time,
    )
}
