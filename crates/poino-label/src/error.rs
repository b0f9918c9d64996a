//! Error types for the label frontend.

use poino_spec::BackendError;
use thiserror::Error;

/// Result type for label operations.
pub type LabelResult<T> = Result<T, LabelError>;

/// Errors that can occur while reading analyzer or sequence input.
#[derive(Debug, Error)]
pub enum LabelError {
    /// A time field does not fit in 64 bits.
    #[error("line {line}: invalid time value '{value}'")]
    InvalidTime {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// End time precedes start time.
    #[error("line {line}: end time {end} precedes start time {start}")]
    ReversedTimes {
        /// 1-based line number.
        line: usize,
        /// Start time in 100 ns ticks.
        start: u64,
        /// End time in 100 ns ticks.
        end: u64,
    },

    /// A sequence section is malformed.
    #[error("invalid sequence: {message}")]
    InvalidSequence {
        /// Error message.
        message: String,
    },
}

impl LabelError {
    /// Creates an invalid sequence error.
    pub fn invalid_sequence(message: impl Into<String>) -> Self {
        Self::InvalidSequence {
            message: message.into(),
        }
    }
}

impl BackendError for LabelError {
    fn code(&self) -> &'static str {
        match self {
            LabelError::InvalidTime { .. } => "LABEL_001",
            LabelError::ReversedTimes { .. } => "LABEL_002",
            LabelError::InvalidSequence { .. } => "LABEL_003",
        }
    }

    fn category(&self) -> &'static str {
        "label"
    }
}
