use serde::{Deserialize, Serialize};

use quarry_core::Interval;

use crate::timeline::TimelineEntry;

/// One (segment, requested-sub-interval) pairing surviving pruning.
///
/// The full on-disk interval is retained beside the narrowed one so workers
/// can open the segment while reading only the requested range. The same
/// segment matched through two requested intervals yields two descriptors
/// differing only in `query_interval`; both are kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RichSegmentDescriptor {
    /// Full interval the segment covers on disk.
    pub segment_interval: Interval,
    /// Narrowed interval actually requested.
    pub query_interval: Interval,
    /// Segment version.
    pub version: String,
    /// Partition number within the version.
    pub partition_num: u32,
}

impl RichSegmentDescriptor {
    /// Creates a descriptor from explicit parts.
    #[must_use]
    pub fn new(
        segment_interval: Interval,
        query_interval: Interval,
        version: impl Into<String>,
        partition_num: u32,
    ) -> Self {
        Self {
            segment_interval,
            query_interval,
            version: version.into(),
            partition_num,
        }
    }
}

impl From<&TimelineEntry> for RichSegmentDescriptor {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            segment_interval: entry.segment.interval,
            query_interval: entry.query_interval,
            version: entry.segment.version.clone(),
            partition_num: entry.segment.partition_num(),
        }
    }
}
