//! Observation extraction.

use crate::error::{EventError, EventResult};
use crate::record::EventRecord;
use trackwatch_core::{Observation, TrackKey};

/// Build an engine observation from an inbound record.
///
/// A record missing its track id, geometry, or event timestamp is rejected
/// before it can reach the state machine. The track key is derived
/// deterministically from the record's owner, schema, and track id.
pub fn observation_from_record(record: &EventRecord) -> EventResult<Observation> {
    let track_id = record.track_id().ok_or(EventError::MissingTrackId)?;
    let geometry = record
        .geometry()
        .cloned()
        .ok_or(EventError::MissingGeometry)?;
    let time = record.start_time().ok_or(EventError::MissingTimestamp)?;

    let key = TrackKey::new(record.owner.clone(), record.schema.clone(), track_id);
    Ok(Observation::new(key, time, geometry))
}
