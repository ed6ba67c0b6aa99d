//! Core domain types for the trackwatch idle detection engine.
//!
//! This crate provides the fundamental types shared across the system:
//! - `TrackKey`: Unique identifier for a track's state-machine instance
//! - `Observation`: One reported position/timestamp sample for a track
//! - `IdleNotification`: The engine's output record

pub mod key;
pub mod notification;
pub mod observation;

pub use key::TrackKey;
pub use notification::IdleNotification;
pub use observation::Observation;
