//! Idle detection state machine.
//!
//! Consumes one observation at a time for a given track, drives the
//! movement test and the per-track state, and decides what notification
//! (if any) to produce.

use crate::config::{DetectorConfig, DurationMode, NotificationMode};
use crate::error::EngineResult;
use crate::movement;
use crate::state::TrackState;
use crate::store::TrackStateStore;
use chrono::Duration;
use std::sync::Arc;
use tracing::debug;
use trackwatch_core::{IdleNotification, Observation};

/// Per-track idle classifier.
///
/// The first observation for a key only seeds the anchor; every later
/// observation runs the transition:
/// - not moved beyond tolerance and stationary for at least the idle
///   limit: the track is idle, notified per the notification mode;
/// - moved beyond tolerance: the anchor resets, with an idle-end
///   notification when the track was idling.
///
/// Errors from a single observation leave that track's state untouched
/// and never affect any other track.
pub struct IdleDetector {
    config: DetectorConfig,
    store: Arc<TrackStateStore>,
}

impl IdleDetector {
    /// Create a detector with a fresh state store.
    ///
    /// Fails when the configuration is invalid; a detector is never built
    /// around a nonsensical idle limit.
    pub fn new(config: DetectorConfig) -> EngineResult<Self> {
        Self::with_store(config, Arc::new(TrackStateStore::new()))
    }

    /// Create a detector over an externally owned store (shared with an
    /// eviction sweep, for example).
    pub fn with_store(config: DetectorConfig, store: Arc<TrackStateStore>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<TrackStateStore> {
        &self.store
    }

    /// Process one observation, returning at most one notification.
    ///
    /// Observations for distinct keys run fully in parallel; the per-key
    /// write lock serializes observations for the same track.
    pub fn process(&self, observation: &Observation) -> EngineResult<Option<IdleNotification>> {
        let (entry, created) = self.store.get_or_create(observation)?;
        if created {
            debug!(key = %observation.key, "Seeded track state");
            return Ok(None);
        }
        let mut state = entry.write();
        self.transition(&mut state, observation)
    }

    fn transition(
        &self,
        state: &mut TrackState,
        observation: &Observation,
    ) -> EngineResult<Option<IdleNotification>> {
        // Run the movement test before touching any field so a geometry or
        // distance error rejects the observation with the state intact.
        let moved = movement::has_moved(
            &observation.geometry,
            &state.anchor_geometry,
            self.config.tolerance_feet,
        )?;

        let mut notification = None;
        if !moved {
            let elapsed = match self.config.duration_mode {
                DurationMode::Cumulative => observation.time - state.anchor_time,
                DurationMode::Incremental => observation.time - state.previous_time,
            };
            let duration = round_secs(elapsed);
            if duration >= self.config.idle_limit_secs as f64 {
                state.idle_duration_secs = duration;
                let newly_idle = !state.idling;
                if self.config.notification_mode == NotificationMode::Continuous || newly_idle {
                    notification = Some(self.notify(state, true));
                }
                state.idling = true;
            }
        } else {
            if state.idling {
                // The idle-end notification reports against the old anchor.
                let mut ending = self.notify(state, false);
                if !self.config.report_duration_on_idle_end {
                    ending.idle_duration_secs = 0.0;
                }
                notification = Some(ending);
            }
            state.reset_anchor(observation.geometry.clone(), observation.time);
        }
        state.previous_time = observation.time;
        Ok(notification)
    }

    fn notify(&self, state: &TrackState, idling: bool) -> IdleNotification {
        IdleNotification {
            track_id: state.track_id.clone(),
            idling,
            idle_duration_secs: state.idle_duration_secs,
            idle_start: state.anchor_time,
            geometry: state.anchor_geometry.clone(),
        }
    }
}

/// Absolute duration in seconds, rounded to one decimal place.
fn round_secs(elapsed: Duration) -> f64 {
    let secs = (elapsed.num_milliseconds() as f64 / 1000.0).abs();
    (secs * 10.0).round() / 10.0
}
