//! Segment-to-task slicing for the Quarry query engine.
//!
//! Converts a logical table reference (a datasource plus optional time
//! intervals and a value filter) into a bounded set of work slices that can
//! be handed to parallel workers. Two packing strategies are offered:
//! [`TableSlicer::slice_static`] fills an exact number of slots with a greedy
//! load-balancing bin-pack, and [`TableSlicer::slice_dynamic`] produces as
//! many slices as needed under per-slice file and byte budgets.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod lookup;
pub mod prune;
pub mod slice;
pub mod slicer;
pub mod spec;
pub mod timeline;

pub use config::DynamicSliceLimits;
pub use descriptor::RichSegmentDescriptor;
pub use error::{SlicerError, SlicerResult};
pub use lookup::{InMemorySegmentLookup, SegmentLookup, UsedSegments};
pub use prune::{can_prune, prune_outcome, PruneOutcome};
pub use slice::{SegmentsSlice, WorkSlice};
pub use slicer::TableSlicer;
pub use spec::{SegmentSource, TableInputSpec};
pub use timeline::{SegmentTimeline, TimelineEntry};
