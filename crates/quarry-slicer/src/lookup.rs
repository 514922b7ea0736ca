//! External authority for the used-segment set.
//!
//! The slicer treats the lookup result as ground truth for the duration of
//! one slicing call; there is no re-validation mid-call and no retry here.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use quarry_core::{Interval, SegmentId, SegmentMeta};

use crate::error::SlicerResult;

/// Snapshot of the used-segment set returned by the authority for one call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedSegments {
    /// Segments overlapping the requested intervals.
    pub segments: Vec<SegmentMeta>,
    /// Segments the authority flagged as not readable by workers.
    ///
    /// Pass-through bookkeeping; the slicer forwards these ids on every
    /// non-empty slice and never weighs or packs them.
    pub unusable: Vec<SegmentId>,
}

/// Authoritative lookup service for currently-used segments.
#[async_trait]
pub trait SegmentLookup: Send + Sync {
    /// Returns the used-segment snapshot for a datasource and interval list.
    ///
    /// An unknown datasource or a request matching nothing yields an empty
    /// snapshot, never an error. Errors are reserved for infrastructure
    /// failure and propagate to the caller unmodified.
    async fn lookup_used_segments(
        &self,
        datasource: &str,
        intervals: &[Interval],
    ) -> SlicerResult<UsedSegments>;
}

/// Map-backed lookup for tests and embedded deployments.
#[derive(Debug, Default)]
pub struct InMemorySegmentLookup {
    segments: HashMap<String, Vec<SegmentMeta>>,
    unusable: BTreeSet<SegmentId>,
}

impl InMemorySegmentLookup {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a lookup pre-populated with the given segments.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = SegmentMeta>) -> Self {
        let mut lookup = Self::new();
        for segment in segments {
            lookup.add_segment(segment);
        }
        lookup
    }

    /// Registers a segment.
    pub fn add_segment(&mut self, segment: SegmentMeta) {
        self.segments
            .entry(segment.datasource.clone())
            .or_default()
            .push(segment);
    }

    /// Flags a segment as not readable by workers.
    pub fn mark_unusable(&mut self, id: SegmentId) {
        self.unusable.insert(id);
    }
}

#[async_trait]
impl SegmentLookup for InMemorySegmentLookup {
    async fn lookup_used_segments(
        &self,
        datasource: &str,
        intervals: &[Interval],
    ) -> SlicerResult<UsedSegments> {
        let Some(known) = self.segments.get(datasource) else {
            return Ok(UsedSegments::default());
        };

        // Flagged segments are withheld from the usable set; only their ids
        // travel onward.
        let segments: Vec<SegmentMeta> = known
            .iter()
            .filter(|segment| intervals.iter().any(|i| segment.interval.overlaps(i)))
            .filter(|segment| !self.unusable.contains(&segment.id()))
            .cloned()
            .collect();
        let unusable: Vec<SegmentId> = self
            .unusable
            .iter()
            .filter(|id| id.datasource == datasource)
            .cloned()
            .collect();

        Ok(UsedSegments {
            segments,
            unusable,
        })
    }
}
