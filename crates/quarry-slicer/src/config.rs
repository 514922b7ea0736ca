use serde::{Deserialize, Serialize};

use crate::error::{SlicerError, SlicerResult};

/// Bounds for dynamic slicing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicSliceLimits {
    /// Maximum number of slices to produce.
    pub max_slices: usize,
    /// Maximum number of segment files assigned to one slice.
    pub max_files_per_slice: usize,
    /// Maximum cumulative byte weight assigned to one slice.
    pub max_bytes_per_slice: u64,
}

impl DynamicSliceLimits {
    /// Default cap on produced slices.
    pub const DEFAULT_MAX_SLICES: usize = 1000;
    /// Default per-slice file budget.
    pub const DEFAULT_MAX_FILES_PER_SLICE: usize = 10_000;
    /// Default per-slice byte budget (10 GiB).
    pub const DEFAULT_MAX_BYTES_PER_SLICE: u64 = 10 * 1024 * 1024 * 1024;

    /// Creates explicit limits.
    #[must_use]
    pub fn new(max_slices: usize, max_files_per_slice: usize, max_bytes_per_slice: u64) -> Self {
        Self {
            max_slices,
            max_files_per_slice,
            max_bytes_per_slice,
        }
    }

    /// Validates that every bound is at least 1.
    ///
    /// # Errors
    ///
    /// Returns `SlicerError::InvalidLimits` naming the offending bound.
    pub fn validate(&self) -> SlicerResult<()> {
        if self.max_slices < 1 {
            return Err(SlicerError::invalid_limits("max_slices must be at least 1"));
        }
        if self.max_files_per_slice < 1 {
            return Err(SlicerError::invalid_limits(
                "max_files_per_slice must be at least 1",
            ));
        }
        if self.max_bytes_per_slice < 1 {
            return Err(SlicerError::invalid_limits(
                "max_bytes_per_slice must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for DynamicSliceLimits {
    fn default() -> Self {
        Self {
            max_slices: Self::DEFAULT_MAX_SLICES,
            max_files_per_slice: Self::DEFAULT_MAX_FILES_PER_SLICE,
            max_bytes_per_slice: Self::DEFAULT_MAX_BYTES_PER_SLICE,
        }
    }
}
