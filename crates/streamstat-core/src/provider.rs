//! Source trait for history loaders
//!
//! This module defines the `HistorySource` trait that loader crates
//! implement. It hands listen events to the aggregator one at a time, in
//! file order and then record order.

use crate::aggregation::TrackTable;
use crate::error::Result;
use crate::types::ListenEvent;

/// Anything that can produce listen events for aggregation
pub trait HistorySource {
    /// Every listen event, stopping after the first error
    fn events(&self) -> Box<dyn Iterator<Item = Result<ListenEvent>> + '_>;

    /// Aggregate all events of this source into a track table
    fn load_tracks(&self) -> Result<TrackTable> {
        TrackTable::try_from_events(self.events())
    }
}
