//! Error types for the timeline crate.

use thiserror::Error;

/// Result type alias for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Errors that can occur while reading and matching an export.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The export could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not fit any known schema
    #[error("Could not decode timeline JSON: {0}")]
    Decode(serde_json::Error),

    /// A range boundary that is not a recognised timestamp
    #[error("Invalid timestamp {0:?}: expected RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD")]
    InvalidTimestamp(String),

    /// A range whose start lies after its end
    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested start
        start: String,
        /// Requested end
        end: String,
    },
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            TimelineError::Io(err.into())
        } else {
            TimelineError::Decode(err)
        }
    }
}

/// Error code for integration with office-days-core error handling.
/// Range: 11xxx for timeline errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineErrorCode {
    /// File open/read failure
    Io = 11001,
    /// JSON decode failure
    Decode = 11002,
    /// Unparseable timestamp
    InvalidTimestamp = 11003,
    /// Inverted range
    InvalidRange = 11004,
}

impl TimelineError {
    /// Returns the error code for this error.
    pub fn code(&self) -> TimelineErrorCode {
        match self {
            TimelineError::Io(_) => TimelineErrorCode::Io,
            TimelineError::Decode(_) => TimelineErrorCode::Decode,
            TimelineError::InvalidTimestamp(_) => TimelineErrorCode::InvalidTimestamp,
            TimelineError::InvalidRange { .. } => TimelineErrorCode::InvalidRange,
        }
    }
}
