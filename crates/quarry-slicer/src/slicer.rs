//! Conversion of a logical table reference into bounded, assignable slices.
//!
//! Both slicing modes share one pipeline: fetch the used-segment snapshot,
//! look each requested interval up in the timeline, drop tombstones, prune
//! against the filter, then sort survivors into the deterministic
//! `(interval, version descending, partition)` order before packing.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use tracing::{debug, warn};

use quarry_core::SegmentId;

use crate::config::DynamicSliceLimits;
use crate::descriptor::RichSegmentDescriptor;
use crate::error::{SlicerError, SlicerResult};
use crate::lookup::SegmentLookup;
use crate::prune;
use crate::slice::{SegmentsSlice, WorkSlice};
use crate::spec::{SegmentSource, TableInputSpec};
use crate::timeline::{SegmentTimeline, TimelineEntry};

/// Slices table input specs into work units for parallel workers.
///
/// Each slicing call is a pure, single-pass transformation over a freshly
/// fetched segment snapshot; the slicer holds no state between calls and
/// concurrent calls need no coordination.
pub struct TableSlicer {
    lookup: Arc<dyn SegmentLookup>,
    source: SegmentSource,
}

impl TableSlicer {
    /// Creates a slicer over the given lookup authority.
    #[must_use]
    pub fn new(lookup: Arc<dyn SegmentLookup>, source: SegmentSource) -> Self {
        Self { lookup, source }
    }

    /// Whether dynamic slicing is supported for this spec's configuration.
    ///
    /// Realtime segments report unstable sizes, so a slicer drawing on them
    /// supports static slicing only. Callers must check this before invoking
    /// [`TableSlicer::slice_dynamic`].
    #[must_use]
    pub fn can_slice_dynamic(&self, _spec: &TableInputSpec) -> bool {
        self.source == SegmentSource::Published
    }

    /// Partitions the spec's segments into exactly `slot_count` slices.
    ///
    /// Slots that receive no work come back as [`WorkSlice::Empty`], so the
    /// result length always equals `slot_count`, including when the
    /// datasource is unknown or nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLimits` when `slot_count` is zero, or a lookup error
    /// when the external authority fails.
    pub async fn slice_static(
        &self,
        spec: &TableInputSpec,
        slot_count: usize,
    ) -> SlicerResult<Vec<WorkSlice>> {
        if slot_count < 1 {
            return Err(SlicerError::invalid_limits("slot_count must be at least 1"));
        }
        let (entries, excluded) = self.collect_entries(spec).await?;
        if entries.is_empty() {
            return Ok(vec![WorkSlice::Empty; slot_count]);
        }
        let groups = pack_static(&entries, slot_count);
        Ok(groups
            .into_iter()
            .map(|group| build_slice(&spec.datasource, group, &excluded))
            .collect())
    }

    /// Partitions the spec's segments into at most `limits.max_slices`
    /// slices, each respecting the per-slice file and byte budgets.
    ///
    /// No padding: nothing matching yields an empty list. A single entry
    /// larger than the byte budget occupies its own slice. Once
    /// `max_slices` slices exist, remaining entries overflow into the final
    /// slice rather than being dropped; the overflow is logged and callers
    /// can detect it by checking the final slice against the limits.
    ///
    /// # Errors
    ///
    /// Returns `DynamicUnsupported` when [`TableSlicer::can_slice_dynamic`]
    /// is false, `InvalidLimits` for zero bounds, or a lookup error when the
    /// external authority fails.
    pub async fn slice_dynamic(
        &self,
        spec: &TableInputSpec,
        limits: &DynamicSliceLimits,
    ) -> SlicerResult<Vec<WorkSlice>> {
        if !self.can_slice_dynamic(spec) {
            return Err(SlicerError::DynamicUnsupported {
                segment_source: self.source,
            });
        }
        limits.validate()?;
        let (entries, excluded) = self.collect_entries(spec).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let groups = pack_dynamic(&entries, limits);
        Ok(groups
            .into_iter()
            .map(|group| build_slice(&spec.datasource, group, &excluded))
            .collect())
    }

    /// Shared pipeline: lookup, timeline match, tombstone drop, prune, sort.
    async fn collect_entries(
        &self,
        spec: &TableInputSpec,
    ) -> SlicerResult<(Vec<TimelineEntry>, Vec<SegmentId>)> {
        let intervals = spec.effective_intervals();
        let snapshot = self
            .lookup
            .lookup_used_segments(&spec.datasource, &intervals)
            .await?;

        let timeline = SegmentTimeline::from_segments(snapshot.segments);
        let mut entries = Vec::new();
        for interval in &intervals {
            entries.extend(timeline.lookup(interval));
        }
        let matched = entries.len();

        entries.retain(|entry| !entry.segment.is_tombstone());
        let after_tombstones = entries.len();

        entries.retain(|entry| {
            !prune::can_prune(
                &entry.segment.shard_spec,
                spec.filter.as_ref(),
                spec.filter_fields.as_ref(),
            )
        });
        debug!(
            "datasource {}: {} matched, {} tombstones dropped, {} pruned, {} survivors",
            spec.datasource,
            matched,
            matched - after_tombstones,
            after_tombstones - entries.len(),
            entries.len()
        );

        entries.sort_by(compare_entries);
        entries.dedup_by(|a, b| {
            a.query_interval == b.query_interval && a.segment.id() == b.segment.id()
        });

        let mut excluded = snapshot.unusable;
        excluded.sort();
        excluded.dedup();

        Ok((entries, excluded))
    }
}

/// Deterministic descriptor order: interval, then version descending, then
/// partition number.
fn compare_entries(a: &TimelineEntry, b: &TimelineEntry) -> Ordering {
    a.query_interval
        .cmp(&b.query_interval)
        .then_with(|| b.segment.version.cmp(&a.segment.version))
        .then_with(|| a.segment.partition_num().cmp(&b.segment.partition_num()))
}

/// Greedy size-aware bin-pack into exactly `slot_count` groups.
///
/// Each entry goes to the slot with the smallest running byte total, ties to
/// the lowest slot index. An approximation of balanced load; the optimal
/// partition is NP-hard.
fn pack_static(entries: &[TimelineEntry], slot_count: usize) -> Vec<Vec<TimelineEntry>> {
    let mut groups: Vec<Vec<TimelineEntry>> = vec![Vec::new(); slot_count];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> =
        (0..slot_count).map(|slot| Reverse((0, slot))).collect();

    for entry in entries {
        if let Some(Reverse((assigned_bytes, slot))) = heap.pop() {
            groups[slot].push(entry.clone());
            heap.push(Reverse((assigned_bytes + entry.weight(), slot)));
        }
    }
    groups
}

/// Single-pass pack bounded by file count and byte budget per group, with at
/// most `limits.max_slices` groups.
fn pack_dynamic(entries: &[TimelineEntry], limits: &DynamicSliceLimits) -> Vec<Vec<TimelineEntry>> {
    let mut groups: Vec<Vec<TimelineEntry>> = Vec::new();
    let mut bytes_in_current: u64 = 0;
    let mut overflow_logged = false;

    for entry in entries {
        let weight = entry.weight();
        let current_full = match groups.last() {
            None => true,
            Some(current) => {
                current.len() >= limits.max_files_per_slice
                    || bytes_in_current.saturating_add(weight) > limits.max_bytes_per_slice
            }
        };
        if current_full && groups.len() < limits.max_slices {
            groups.push(Vec::new());
            bytes_in_current = 0;
        } else if current_full && !overflow_logged {
            warn!(
                "reached max_slices={} with descriptors remaining; the final slice will exceed its bounds",
                limits.max_slices
            );
            overflow_logged = true;
        }
        if let Some(current) = groups.last_mut() {
            current.push(entry.clone());
        }
        bytes_in_current = bytes_in_current.saturating_add(weight);
    }
    groups
}

fn build_slice(datasource: &str, group: Vec<TimelineEntry>, excluded: &[SegmentId]) -> WorkSlice {
    if group.is_empty() {
        return WorkSlice::Empty;
    }
    let descriptors: Vec<RichSegmentDescriptor> =
        group.iter().map(RichSegmentDescriptor::from).collect();
    WorkSlice::Segments(SegmentsSlice::new(
        datasource,
        descriptors,
        excluded.to_vec(),
    ))
}
