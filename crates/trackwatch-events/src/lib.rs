//! Field-tagged event records for the trackwatch pipeline.
//!
//! Observations arrive as structured records whose fields are addressed by
//! name or by well-known tag (`TRACK_ID`, `GEOMETRY`, `START_TIME`) rather
//! than fixed position. This crate extracts engine observations from such
//! records and shapes engine notifications back into records for the
//! event sink.

pub mod error;
pub mod extract;
pub mod record;
pub mod shape;

pub use error::{EventError, EventResult};
pub use extract::observation_from_record;
pub use record::{EventRecord, Field, FieldTag, FieldValue};
pub use shape::{notification_record, FieldPolicy};
