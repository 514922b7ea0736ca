use serde::{Deserialize, Serialize};

/// Partition specification for a segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShardSpec {
    /// Contiguous range of a single dimension's values.
    Range(RangeShardSpec),
    /// Placeholder for a deliberately-empty time range. Never holds rows.
    Tombstone,
}

impl ShardSpec {
    /// Stable partition number within the segment's version.
    ///
    /// Tombstones always report partition 0.
    #[must_use]
    pub fn partition_num(&self) -> u32 {
        match self {
            Self::Range(range) => range.partition_num,
            Self::Tombstone => 0,
        }
    }

    /// True when this spec marks an empty time range.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }
}

/// Range partition over one dimension: values in `[lower, upper)`.
///
/// An absent `lower` means unbounded below and an absent `upper` means
/// unbounded above. The sentinels are handled explicitly at every comparison
/// site rather than through a null-aware ordering helper.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeShardSpec {
    /// Dimension the range partitions on.
    pub dimension: String,
    /// Inclusive lower bound; `None` is negative infinity.
    pub lower: Option<String>,
    /// Exclusive upper bound; `None` is positive infinity.
    pub upper: Option<String>,
    /// Stable partition number within the segment's version.
    pub partition_num: u32,
    /// Total partitions in the version.
    pub partition_count: u32,
}

impl RangeShardSpec {
    /// Creates a range shard spec.
    #[must_use]
    pub fn new(
        dimension: impl Into<String>,
        lower: Option<String>,
        upper: Option<String>,
        partition_num: u32,
        partition_count: u32,
    ) -> Self {
        Self {
            dimension: dimension.into(),
            lower,
            upper,
            partition_num,
            partition_count,
        }
    }

    /// True when `value` falls inside `[lower, upper)`.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        if let Some(lower) = &self.lower {
            if value < lower.as_str() {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            if value >= upper.as_str() {
                return false;
            }
        }
        true
    }
}
