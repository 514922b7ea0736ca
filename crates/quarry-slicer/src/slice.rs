use serde::{Deserialize, Serialize};

use quarry_core::SegmentId;

use crate::descriptor::RichSegmentDescriptor;

/// Assignable unit of work produced by slicing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkSlice {
    /// Marker for a slot that received no work.
    ///
    /// Static slicing pads its output with these so callers always receive
    /// exactly the requested number of slots.
    Empty,
    /// A slot carrying segment descriptors to read.
    Segments(SegmentsSlice),
}

impl WorkSlice {
    /// True for the no-work marker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of descriptors assigned to this slice.
    #[must_use]
    pub fn descriptor_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Segments(slice) => slice.descriptors.len(),
        }
    }
}

/// Segment descriptors assigned to one worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentsSlice {
    /// Datasource the descriptors belong to.
    pub datasource: String,
    /// Descriptors in deterministic assignment order.
    pub descriptors: Vec<RichSegmentDescriptor>,
    /// Segment ids the lookup authority flagged as unusable.
    ///
    /// Forwarded bookkeeping so the assigned worker can surface the
    /// exclusion; never computed by the slicer itself.
    pub excluded: Vec<SegmentId>,
}

impl SegmentsSlice {
    /// Creates a slice from its parts.
    #[must_use]
    pub fn new(
        datasource: impl Into<String>,
        descriptors: Vec<RichSegmentDescriptor>,
        excluded: Vec<SegmentId>,
    ) -> Self {
        Self {
            datasource: datasource.into(),
            descriptors,
            excluded,
        }
    }
}
