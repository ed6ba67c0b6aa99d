//! Track identification.
//!
//! A track's state-machine instance is named by the owner namespace of its
//! event source, the schema the events conform to, and the track id carried
//! by each event. Two observations with the same key belong to the same
//! track and are serialized against the same state record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identifier for a track's state-machine instance.
///
/// Canonical string form: `{owner}/{schema}/{track_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackKey {
    /// Namespace of the event source that owns the schema.
    pub owner: String,
    /// Name of the event schema the observation conforms to.
    pub schema: String,
    /// Track identity carried by each observation.
    pub track_id: String,
}

impl TrackKey {
    pub fn new(
        owner: impl Into<String>,
        schema: impl Into<String>,
        track_id: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            schema: schema.into(),
            track_id: track_id.into(),
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.schema, self.track_id)
    }
}
