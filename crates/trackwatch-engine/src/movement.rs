//! Geodesic movement test.
//!
//! Decides whether a track has moved beyond tolerance by computing the
//! WGS84 ellipsoidal distance between two reported points. Pure; holds no
//! state.

use crate::error::{EngineError, EngineResult};
use geo::{Distance, Geodesic, Geometry, Point};

/// Conversion factor matching the upstream feed conventions (tolerances
/// are configured in feet, geodesic distances come back in meters).
pub const FEET_PER_METER: f64 = 3.28084;

/// Returns true iff the geodesic distance between `a` and `b` is at least
/// `tolerance_feet`. The tolerance is a minimum-movement threshold, so a
/// displacement exactly equal to it counts as moved.
///
/// Both geometries must be points; anything else is a contract violation
/// reported as `UnsupportedGeometry`. A non-finite distance is reported as
/// `DistanceComputation` rather than silently treated as zero, which would
/// falsely classify the track as idle.
pub fn has_moved(a: &Geometry, b: &Geometry, tolerance_feet: f64) -> EngineResult<bool> {
    let pa = point_of(a)?;
    let pb = point_of(b)?;
    let meters = Geodesic.distance(pa, pb);
    if !meters.is_finite() {
        return Err(EngineError::DistanceComputation(format!(
            "non-finite distance between ({}, {}) and ({}, {})",
            pa.x(),
            pa.y(),
            pb.x(),
            pb.y()
        )));
    }
    Ok(meters * FEET_PER_METER >= tolerance_feet)
}

/// Extract the point of a geometry, rejecting every other shape.
pub(crate) fn point_of(geometry: &Geometry) -> EngineResult<Point> {
    match geometry {
        Geometry::Point(p) => Ok(*p),
        other => Err(EngineError::UnsupportedGeometry(kind_of(other))),
    }
}

fn kind_of(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
