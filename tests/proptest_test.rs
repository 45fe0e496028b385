//! Property-based tests for streamstat using proptest

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use streamstat::{
    aggregation::TrackTable,
    monthly::MonthlyBuckets,
    ranking::{RankKey, SortOrder, rank},
    time_format::format_duration_ms,
    timezone::TimezoneConfig,
    types::{ArtistName, ListenEvent, TrackTitle, YearMonth},
};

// Strategies for generating test data

prop_compose! {
    fn arb_listen()(
        title in prop::sample::select(vec!["Archangel", "Roygbiv", "Teardrop", "Windowlicker", "Xtal"]),
        artist in prop::sample::select(vec!["Burial", "Boards of Canada", "Massive Attack", "Aphex Twin"]),
        ms_played in 0u64..600_000,
        minutes in 0i64..(3 * 365 * 24 * 60),
    ) -> ListenEvent {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        ListenEvent::new(
            TrackTitle::new(title),
            ArtistName::new(artist),
            ms_played,
            start + chrono::Duration::minutes(minutes),
        )
    }
}

fn arb_listens() -> impl Strategy<Value = Vec<ListenEvent>> {
    prop::collection::vec(arb_listen(), 0..200)
}

proptest! {
    #[test]
    fn track_totals_conserve_event_time(events in arb_listens()) {
        let expected: u64 = events.iter().map(|e| e.ms_played).sum();
        let tracks = TrackTable::from_events(events.clone());

        prop_assert_eq!(tracks.total_ms_played(), expected);
        prop_assert_eq!(
            tracks.iter().map(|t| t.play_count()).sum::<u64>(),
            events.len() as u64
        );
        for track in &tracks {
            prop_assert_eq!(
                track.total_ms_played(),
                track.occurrences().iter().map(|o| o.ms_played).sum::<u64>()
            );
        }
    }

    #[test]
    fn artist_totals_sum_their_tracks(events in arb_listens()) {
        let tracks = TrackTable::from_events(events);
        let artists = tracks.artists();

        for artist in &artists {
            prop_assert_eq!(
                artist.total_ms_played(),
                artist.tracks().iter().map(|t| t.total_ms_played()).sum::<u64>()
            );
            prop_assert_eq!(
                artist.play_count(),
                artist.tracks().iter().map(|t| t.play_count()).sum::<u64>()
            );
            for track in artist.tracks() {
                prop_assert_eq!(track.artist(), artist.name());
            }
        }
        prop_assert_eq!(
            artists.iter().map(|a| a.total_ms_played()).sum::<u64>(),
            tracks.total_ms_played()
        );
    }

    #[test]
    fn first_seen_artist_is_kept(events in arb_listens()) {
        let tracks = TrackTable::from_events(events.clone());
        for track in &tracks {
            let first = events.iter().find(|e| &e.track == track.title()).unwrap();
            prop_assert_eq!(track.artist(), &first.artist);
        }
    }

    #[test]
    fn ranking_is_sorted_and_idempotent(events in arb_listens(), plays in any::<bool>(), ascending in any::<bool>()) {
        let key = if plays { RankKey::PlayCount } else { RankKey::TotalTime };
        let order = if ascending { SortOrder::Ascending } else { SortOrder::Descending };
        let tracks = TrackTable::from_events(events);

        let ranked = tracks.ranked(key, order);
        prop_assert_eq!(ranked.len(), tracks.len());
        for pair in ranked.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (a, b) = match key {
                RankKey::TotalTime => (a.total_ms_played(), b.total_ms_played()),
                RankKey::PlayCount => (a.play_count(), b.play_count()),
            };
            match order {
                SortOrder::Ascending => prop_assert!(a <= b),
                SortOrder::Descending => prop_assert!(a >= b),
            }
        }

        let reranked = rank(ranked.clone(), key, order);
        prop_assert_eq!(reranked, ranked);
    }

    #[test]
    fn monthly_top_has_the_largest_month_sum(events in arb_listens()) {
        let tracks = TrackTable::from_events(events.clone());
        let buckets = MonthlyBuckets::from_tracks(&tracks, &TimezoneConfig::default().tz);

        for month in buckets.months() {
            let top = buckets.top_track(month).unwrap();
            let in_month = |e: &&ListenEvent| YearMonth::from_datetime(&e.end_time) == month;
            let month_total: u64 = events.iter().filter(in_month).map(|e| e.ms_played).sum();
            prop_assert_eq!(top.month_total_ms, month_total);

            for title in events.iter().filter(in_month).map(|e| &e.track) {
                let sum: u64 = events
                    .iter()
                    .filter(in_month)
                    .filter(|e| &e.track == title)
                    .map(|e| e.ms_played)
                    .sum();
                prop_assert!(sum <= top.ms_played);
            }
        }
    }

    #[test]
    fn formatted_duration_round_trips_to_millis(ms in any::<u32>()) {
        let formatted = format_duration_ms(u64::from(ms));
        let parts: Vec<u64> = formatted
            .split(' ')
            .map(|p| p.trim_end_matches(|c: char| c.is_ascii_alphabetic()).parse().unwrap())
            .collect();
        prop_assert_eq!(parts.len(), 4);
        prop_assert!(parts[1] < 60 && parts[2] < 60 && parts[3] < 1000);
        prop_assert_eq!(
            parts[0] * 3_600_000 + parts[1] * 60_000 + parts[2] * 1000 + parts[3],
            u64::from(ms)
        );
    }
}
