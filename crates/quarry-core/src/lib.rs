//! Core domain types for the Quarry query engine.

pub mod error;
pub mod filter;
pub mod interval;
pub mod segment;
pub mod shard;

pub use error::{CoreError, CoreResult};
pub use filter::{DimFilter, ValueDomain};
pub use interval::Interval;
pub use segment::{SegmentId, SegmentMeta};
pub use shard::{RangeShardSpec, ShardSpec};
