//! Notification record shaping.

use crate::record::{EventRecord, Field, FieldTag, FieldValue};
use serde::{Deserialize, Serialize};
use trackwatch_core::IdleNotification;

/// Schema name of the output records.
pub const IDLE_SCHEMA: &str = "TrackIdle";

/// Which triggering-observation fields the output record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Track id, geometry, and the idle fields only.
    #[default]
    Minimal,
    /// Every field of the triggering observation, with the idle fields
    /// appended or overriding same-named fields.
    KeepAll,
}

/// Shape an engine notification into an output record for the event sink.
pub fn notification_record(
    notification: &IdleNotification,
    triggering: &EventRecord,
    policy: FieldPolicy,
) -> EventRecord {
    let mut record = match policy {
        FieldPolicy::Minimal => EventRecord::new(triggering.owner.clone(), IDLE_SCHEMA)
            .with_field(Field::tagged(
                "trackId",
                FieldTag::TrackId,
                FieldValue::String(notification.track_id.clone()),
            ))
            .with_field(Field::tagged(
                "geometry",
                FieldTag::Geometry,
                FieldValue::Geometry(notification.geometry.clone()),
            )),
        FieldPolicy::KeepAll => {
            let mut copied = triggering.clone();
            copied.schema = IDLE_SCHEMA.to_string();
            copied
        }
    };

    record.set(Field::new("idle", FieldValue::Bool(notification.idling)));
    record.set(Field::new(
        "idleDuration",
        FieldValue::Double(notification.idle_duration_secs),
    ));
    record.set(Field::new(
        "idleStart",
        FieldValue::Timestamp(notification.idle_start),
    ));
    record
}
