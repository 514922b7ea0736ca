use thiserror::Error;

/// Canonical error type for core domain operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Interval bounds are inverted or otherwise unusable.
    #[error("invalid interval: {message}")]
    InvalidInterval {
        /// Human-readable description of the bad bounds.
        message: String,
    },

    /// Input text could not be parsed into a domain value.
    #[error("parse error: {message}")]
    Parse {
        /// Human-readable description of the malformed input.
        message: String,
    },
}

impl CoreError {
    /// Creates an `InvalidInterval` variant.
    #[must_use]
    pub fn invalid_interval(message: impl Into<String>) -> Self {
        Self::InvalidInterval {
            message: message.into(),
        }
    }

    /// Creates a `Parse` variant.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Convenient result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
