use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use quarry_core::{DimFilter, Interval};

/// Logical table reference to be sliced into work units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInputSpec {
    /// Datasource name.
    pub datasource: String,
    /// Requested time intervals; `None` means all time.
    pub intervals: Option<Vec<Interval>>,
    /// Value filter, consumed only for partition pruning.
    pub filter: Option<DimFilter>,
    /// Dimensions the filter may be trusted to prune on.
    ///
    /// `None` means every dimension is eligible. A present-but-empty set
    /// disables filter pruning entirely.
    pub filter_fields: Option<BTreeSet<String>>,
}

impl TableInputSpec {
    /// Creates a spec covering all time with no filter.
    #[must_use]
    pub fn new(datasource: impl Into<String>) -> Self {
        Self {
            datasource: datasource.into(),
            intervals: None,
            filter: None,
            filter_fields: None,
        }
    }

    /// Restricts the spec to the given time intervals.
    #[must_use]
    pub fn with_intervals(mut self, intervals: Vec<Interval>) -> Self {
        self.intervals = Some(intervals);
        self
    }

    /// Attaches a value filter.
    #[must_use]
    pub fn with_filter(mut self, filter: DimFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Restricts which dimensions the filter may prune on.
    #[must_use]
    pub fn with_filter_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// The intervals to slice over; an absent list means one all-time interval.
    #[must_use]
    pub fn effective_intervals(&self) -> Vec<Interval> {
        match &self.intervals {
            Some(intervals) => intervals.clone(),
            None => vec![Interval::ETERNITY],
        }
    }
}

/// Which segment population slicing may draw on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSource {
    /// Only published deep-storage segments.
    Published,
    /// Published segments plus segments still held by ingestion workers.
    ///
    /// Realtime segments report unstable sizes, so dynamic slicing is not
    /// available in this mode.
    IncludeRealtime,
}

impl SegmentSource {
    /// Canonical lowercase rendering.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::IncludeRealtime => "include_realtime",
        }
    }
}

impl fmt::Display for SegmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
