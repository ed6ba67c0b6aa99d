//! Keyed idle-detection state machine.
//!
//! Classifies tracks as idle or active by comparing successive position
//! reports against a per-track anchor position. One state record exists
//! per track key; observations for different tracks are processed fully
//! in parallel while observations for the same track are serialized by
//! a per-key lock.

pub mod config;
pub mod detector;
pub mod error;
pub mod movement;
pub mod state;
pub mod store;

pub use config::{DetectorConfig, DurationMode, NotificationMode};
pub use detector::IdleDetector;
pub use error::{EngineError, EngineResult};
pub use state::TrackState;
pub use store::{StateEntry, TrackStateStore};
