//! Per-track mutable state record.

use chrono::{DateTime, Utc};
use geo::Geometry;
use trackwatch_core::Observation;

/// State record for a single track.
///
/// Holds the anchor the idle duration is measured from plus the current
/// classification. No business logic beyond field updates lives here; the
/// transition rules are in [`crate::detector`].
#[derive(Debug, Clone)]
pub struct TrackState {
    /// Track identity echoed into notifications.
    pub track_id: String,
    /// Position at which the track was last observed to start being
    /// stationary.
    pub anchor_geometry: Geometry,
    /// Timestamp of the anchor position.
    pub anchor_time: DateTime<Utc>,
    /// Timestamp of the immediately preceding observation. Also serves as
    /// the last-seen time for stale-track eviction.
    pub previous_time: DateTime<Utc>,
    /// Whether the track is currently classified idle.
    pub idling: bool,
    /// Last computed idle duration in seconds, one-decimal rounding.
    pub idle_duration_secs: f64,
}

impl TrackState {
    /// Seed a fresh record from the first observation for a key.
    pub fn seeded(observation: &Observation) -> Self {
        Self {
            track_id: observation.key.track_id.clone(),
            anchor_geometry: observation.geometry.clone(),
            anchor_time: observation.time,
            previous_time: observation.time,
            idling: false,
            idle_duration_secs: 0.0,
        }
    }

    /// Reset the anchor after the track has moved beyond tolerance.
    pub fn reset_anchor(&mut self, geometry: Geometry, time: DateTime<Utc>) {
        self.anchor_geometry = geometry;
        self.anchor_time = time;
        self.idling = false;
    }
}
