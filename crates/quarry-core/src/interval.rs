use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Half-open UTC time interval `[start, end)`.
///
/// Intervals order by `(start, end)`, which gives slicing output its
/// deterministic descriptor ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// The all-time interval. Used when a request carries no interval list.
    pub const ETERNITY: Interval = Interval {
        start: DateTime::<Utc>::MIN_UTC,
        end: DateTime::<Utc>::MAX_UTC,
    };

    /// Creates an interval from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInterval` when `end` precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::invalid_interval(format!(
                "end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive start bound.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end bound.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True when the interval covers no time at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the two intervals share any instant.
    ///
    /// Empty intervals overlap nothing, including themselves.
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The shared sub-interval, or `None` when the intervals do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Interval {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

fn parse_bound(text: &str) -> CoreResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    if let Ok(year) = text.parse::<i32>() {
        if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
        }
    }
    Err(CoreError::parse(format!(
        "`{text}` is not an RFC 3339 timestamp, date, or year"
    )))
}

impl FromStr for Interval {
    type Err = CoreError;

    /// Parses `start/end`, where each side is an RFC 3339 timestamp, a
    /// `YYYY-MM-DD` date, or a bare year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| CoreError::parse(format!("interval `{s}` is missing `/`")))?;
        Interval::new(parse_bound(start)?, parse_bound(end)?)
    }
}
