//! Inbound observation type.

use crate::key::TrackKey;
use chrono::{DateTime, Utc};
use geo::{Geometry, Point};
use serde::{Deserialize, Serialize};

/// One reported position/timestamp sample for a track.
///
/// Only point geometries are meaningful to the engine; the geometry is
/// carried as-is and validated at the movement-test boundary so a bad
/// shape rejects exactly one observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// The track this sample belongs to.
    pub key: TrackKey,
    /// Event timestamp as reported by the producer.
    pub time: DateTime<Utc>,
    /// Reported geometry, expected to be a WGS84 point.
    pub geometry: Geometry,
}

impl Observation {
    pub fn new(key: TrackKey, time: DateTime<Utc>, geometry: Geometry) -> Self {
        Self {
            key,
            time,
            geometry,
        }
    }

    /// Convenience constructor for a point observation.
    pub fn at_point(key: TrackKey, time: DateTime<Utc>, lon: f64, lat: f64) -> Self {
        Self::new(key, time, Geometry::Point(Point::new(lon, lat)))
    }
}
