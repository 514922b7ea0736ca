use thiserror::Error;

use quarry_core::CoreError;

use crate::spec::SegmentSource;

/// Canonical error type for slicing operations.
#[derive(Debug, Error)]
pub enum SlicerError {
    /// External segment lookup failed for infrastructure reasons.
    ///
    /// "No matching segments" is never reported through this variant; an
    /// unknown datasource yields an empty snapshot instead.
    #[error("segment lookup failed: {message}")]
    Lookup {
        /// Human-readable description of the failure.
        message: String,
    },

    /// Caller-supplied slicing bounds are unusable.
    #[error("invalid slice limits: {message}")]
    InvalidLimits {
        /// Human-readable description of the bad bound.
        message: String,
    },

    /// Dynamic slicing is not available for the configured segment source.
    #[error("dynamic slicing is not supported for segment source `{segment_source}`")]
    DynamicUnsupported {
        /// The segment source the slicer was configured with.
        segment_source: SegmentSource,
    },

    /// Core domain error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SlicerError {
    /// Creates a `Lookup` variant.
    #[must_use]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Creates an `InvalidLimits` variant.
    #[must_use]
    pub fn invalid_limits(message: impl Into<String>) -> Self {
        Self::InvalidLimits {
            message: message.into(),
        }
    }
}

/// Convenient result alias for slicing operations.
pub type SlicerResult<T> = Result<T, SlicerError>;
