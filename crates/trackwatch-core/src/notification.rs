//! Outbound idle notification type.

use chrono::{DateTime, Utc};
use geo::Geometry;
use serde::{Deserialize, Serialize};

/// Signal emitted when a track starts idling, is still idling, or
/// resumes moving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdleNotification {
    /// Track identity echoed from the observations.
    pub track_id: String,
    /// Whether the track is classified idle as of this notification.
    pub idling: bool,
    /// Idle duration in seconds, rounded to one decimal place.
    pub idle_duration_secs: f64,
    /// Timestamp of the anchor the duration is measured from.
    pub idle_start: DateTime<Utc>,
    /// Anchor geometry at the time the notification was produced.
    pub geometry: Geometry,
}

impl IdleNotification {
    /// Label for metrics and logging.
    pub fn kind(&self) -> &'static str {
        if self.idling {
            "idle"
        } else {
            "resume"
        }
    }
}
