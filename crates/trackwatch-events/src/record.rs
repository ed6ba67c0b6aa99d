//! Structured event records with tagged fields.

use crate::error::EventResult;
use chrono::{DateTime, Utc};
use geo::Geometry;
use serde::{Deserialize, Serialize};

/// Well-known field roles. A field carries at most one tag; lookups fall
/// back to the conventional field name when no field is tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTag {
    TrackId,
    Geometry,
    StartTime,
}

impl FieldTag {
    /// Conventional field name used when a record carries no tags.
    fn default_name(self) -> &'static str {
        match self {
            Self::TrackId => "trackId",
            Self::Geometry => "geometry",
            Self::StartTime => "startTime",
        }
    }
}

/// Typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    String(String),
    Bool(bool),
    Double(f64),
    Timestamp(DateTime<Utc>),
    Geometry(Geometry),
}

/// One named, optionally tagged field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<FieldTag>,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            tag: None,
            value,
        }
    }

    pub fn tagged(name: impl Into<String>, tag: FieldTag, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag),
            value,
        }
    }
}

/// An ordered field list plus the schema identity it conforms to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Namespace of the source that owns the schema.
    pub owner: String,
    /// Schema name.
    pub schema: String,
    pub fields: Vec<Field>,
}

impl EventRecord {
    pub fn new(owner: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            schema: schema.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Replace the value of `name`, appending when absent.
    pub fn set(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First field carrying `tag`, falling back to the conventional name.
    pub fn by_tag(&self, tag: FieldTag) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.tag == Some(tag))
            .or_else(|| self.field(tag.default_name()))
    }

    pub fn track_id(&self) -> Option<&str> {
        match self.by_tag(FieldTag::TrackId)?.value {
            FieldValue::String(ref s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match self.by_tag(FieldTag::Geometry)?.value {
            FieldValue::Geometry(ref g) => Some(g),
            _ => None,
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        match self.by_tag(FieldTag::StartTime)?.value {
            FieldValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Decode one JSON record.
    pub fn from_json(line: &str) -> EventResult<Self> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn to_json(&self) -> EventResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
