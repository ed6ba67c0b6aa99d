//! Event record error types.

use thiserror::Error;

/// Per-record rejection reasons. None of these are fatal; a rejected
/// record is dropped with a warning and processing continues.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Record has no track id field")]
    MissingTrackId,

    #[error("Record has no geometry field")]
    MissingGeometry,

    #[error("Record has no event timestamp field")]
    MissingTimestamp,

    #[error("Record decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl EventError {
    /// Stable label for the rejection metric.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingTrackId => "missing_track_id",
            Self::MissingGeometry => "missing_geometry",
            Self::MissingTimestamp => "missing_timestamp",
            Self::Decode(_) => "decode",
        }
    }
}

pub type EventResult<T> = Result<T, EventError>;
