use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::shard::ShardSpec;

/// Immutable unit of stored, versioned, partitioned data.
///
/// Segments for the same interval and version partition the key space
/// disjointly; partition numbers are stable identifiers within that version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMeta {
    /// Owning datasource name.
    pub datasource: String,
    /// Time interval the segment covers on disk.
    pub interval: Interval,
    /// Version string; lexicographically higher versions win.
    pub version: String,
    /// Partition specification within the version.
    pub shard_spec: ShardSpec,
    /// Approximate stored size in bytes.
    pub size_bytes: u64,
}

impl SegmentMeta {
    /// Creates a segment descriptor.
    #[must_use]
    pub fn new(
        datasource: impl Into<String>,
        interval: Interval,
        version: impl Into<String>,
        shard_spec: ShardSpec,
        size_bytes: u64,
    ) -> Self {
        Self {
            datasource: datasource.into(),
            interval,
            version: version.into(),
            shard_spec,
            size_bytes,
        }
    }

    /// Composite value identity of this segment.
    #[must_use]
    pub fn id(&self) -> SegmentId {
        SegmentId {
            datasource: self.datasource.clone(),
            interval: self.interval,
            version: self.version.clone(),
            partition_num: self.shard_spec.partition_num(),
        }
    }

    /// Stable partition number within the segment's version.
    #[must_use]
    pub fn partition_num(&self) -> u32 {
        self.shard_spec.partition_num()
    }

    /// True when the segment marks an empty time range.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        self.shard_spec.is_tombstone()
    }
}

/// Composite segment identity: `(datasource, interval, version, partition)`.
///
/// A value type rather than a reference so that the same segment matched
/// through two different requested intervals stays distinguishable by the
/// pair `(SegmentId, narrowed interval)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentId {
    /// Owning datasource name.
    pub datasource: String,
    /// Time interval the segment covers on disk.
    pub interval: Interval,
    /// Version string.
    pub version: String,
    /// Partition number within the version.
    pub partition_num: u32,
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}",
            self.datasource,
            self.interval.start().to_rfc3339(),
            self.interval.end().to_rfc3339(),
            self.version,
            self.partition_num
        )
    }
}
