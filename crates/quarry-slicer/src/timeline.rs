//! Interval-indexed view of the used-segment snapshot.
//!
//! Within one interval the lexicographically highest version shadows lower
//! versions wholesale. Cross-interval overshadowing does not arise here: the
//! lookup authority already returns only the currently-used segment set, which
//! the slicer treats as ground truth for the call.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quarry_core::{Interval, SegmentMeta};

/// One segment matched by a range lookup, narrowed to the queried range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// The matched segment.
    pub segment: SegmentMeta,
    /// The sub-interval of the segment actually requested.
    pub query_interval: Interval,
}

impl TimelineEntry {
    /// Byte weight the entry contributes to a slice.
    #[must_use]
    pub fn weight(&self) -> u64 {
        self.segment.size_bytes
    }
}

struct VersionHolder {
    version: String,
    segments: Vec<SegmentMeta>,
}

/// Interval-indexed structure over a fixed segment snapshot.
pub struct SegmentTimeline {
    holders: BTreeMap<Interval, VersionHolder>,
}

impl SegmentTimeline {
    /// Builds a timeline, keeping only the highest version per interval.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = SegmentMeta>) -> Self {
        let mut holders: BTreeMap<Interval, VersionHolder> = BTreeMap::new();
        for segment in segments {
            match holders.entry(segment.interval) {
                Entry::Vacant(vacant) => {
                    vacant.insert(VersionHolder {
                        version: segment.version.clone(),
                        segments: vec![segment],
                    });
                }
                Entry::Occupied(mut occupied) => {
                    let holder = occupied.get_mut();
                    match segment.version.cmp(&holder.version) {
                        Ordering::Greater => {
                            holder.version = segment.version.clone();
                            holder.segments = vec![segment];
                        }
                        Ordering::Equal => holder.segments.push(segment),
                        Ordering::Less => {}
                    }
                }
            }
        }
        for holder in holders.values_mut() {
            holder.segments.sort_by_key(SegmentMeta::partition_num);
        }
        Self { holders }
    }

    /// True when the timeline holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// All segments overlapping `interval`, each narrowed to the overlap.
    ///
    /// Results are ordered by `(interval, partition_num)`; an interval
    /// matching nothing yields an empty list.
    #[must_use]
    pub fn lookup(&self, interval: &Interval) -> Vec<TimelineEntry> {
        let mut entries = Vec::new();
        for (key, holder) in &self.holders {
            // Keys sort by start; nothing at or past the query end can overlap.
            if key.start() >= interval.end() {
                break;
            }
            let Some(narrowed) = key.intersect(interval) else {
                continue;
            };
            for segment in &holder.segments {
                entries.push(TimelineEntry {
                    segment: segment.clone(),
                    query_interval: narrowed,
                });
            }
        }
        entries
    }
}
