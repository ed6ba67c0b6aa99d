//! Concurrency-safe keyed state storage.
//!
//! One entry per track key, each behind its own lock so observations for
//! different tracks never contend while observations for the same track
//! are serialized.

use crate::error::EngineResult;
use crate::movement;
use crate::state::TrackState;
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;
use trackwatch_core::{Observation, TrackKey};

/// Shared handle to a single track's state.
pub type StateEntry = Arc<RwLock<TrackState>>;

/// Keyed store mapping a track key to its state record.
///
/// Entries live for the process lifetime unless [`evict_stale`] is wired
/// up; an unbounded feed of one-shot track ids will grow the map without
/// bound.
///
/// [`evict_stale`]: TrackStateStore::evict_stale
#[derive(Debug, Default)]
pub struct TrackStateStore {
    tracks: DashMap<TrackKey, StateEntry>,
}

impl TrackStateStore {
    pub fn new() -> Self {
        Self {
            tracks: DashMap::new(),
        }
    }

    /// Atomically return the state for `key`, creating it from the
    /// observation if absent. The boolean is true when this call won
    /// creation; concurrent first-observations for the same key resolve to
    /// a single winner.
    ///
    /// Creation validates that the seed geometry is a point. A non-point
    /// anchor would poison every later movement test for the track, so the
    /// observation is rejected before anything is inserted.
    pub fn get_or_create(&self, observation: &Observation) -> EngineResult<(StateEntry, bool)> {
        match self.tracks.entry(observation.key.clone()) {
            Entry::Occupied(entry) => Ok((entry.get().clone(), false)),
            Entry::Vacant(entry) => {
                movement::point_of(&observation.geometry)?;
                let state = Arc::new(RwLock::new(TrackState::seeded(observation)));
                entry.insert(state.clone());
                Ok((state, true))
            }
        }
    }

    /// Look up the state for a key without creating it.
    pub fn get(&self, key: &TrackKey) -> Option<StateEntry> {
        self.tracks.get(key).map(|entry| entry.value().clone())
    }

    /// Apply an in-place update to the state for `key` under that key's
    /// write lock. Other keys are never blocked. Returns `None` when the
    /// key is untracked.
    pub fn mutate<R>(&self, key: &TrackKey, f: impl FnOnce(&mut TrackState) -> R) -> Option<R> {
        let entry = self.get(key)?;
        let mut state = entry.write();
        Some(f(&mut state))
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Remove tracks whose last observation is older than `max_age` as of
    /// `now`. Returns the number of evicted entries.
    pub fn evict_stale(&self, max_age: Duration, now: DateTime<Utc>) -> usize {
        let before = self.tracks.len();
        self.tracks
            .retain(|_, state| now - state.read().previous_time <= max_age);
        let evicted = before.saturating_sub(self.tracks.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.tracks.len(), "Evicted stale tracks");
        }
        evicted
    }
}
