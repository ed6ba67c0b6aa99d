//! Prometheus metrics for the trackwatch pipeline.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration
//! failure means duplicate metric names, which should crash at startup
//! rather than fail silently. These panics only occur during static
//! initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter, IntCounterVec,
    IntGauge,
};

/// Total observations processed by the engine.
pub static OBSERVATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "trackwatch_observations_total",
        "Total observations processed"
    )
    .unwrap()
});

/// Total observations rejected before or inside the engine.
/// Labels: reason (missing_track_id/missing_geometry/missing_timestamp/
/// decode/unsupported_geometry/distance_computation)
pub static OBSERVATIONS_REJECTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "trackwatch_observations_rejected_total",
        "Total observations rejected by reason",
        &["reason"]
    )
    .unwrap()
});

/// Total idle notifications emitted.
/// Labels: kind (idle/resume)
pub static NOTIFICATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "trackwatch_notifications_total",
        "Total idle notifications emitted by kind",
        &["kind"]
    )
    .unwrap()
});

/// Number of track-state entries currently held.
pub static TRACKED_TRACKS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "trackwatch_tracked_tracks",
        "Track-state entries currently held"
    )
    .unwrap()
});

/// Total stale tracks removed by the eviction sweep.
pub static TRACKS_EVICTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "trackwatch_tracks_evicted_total",
        "Total stale tracks removed by the eviction sweep"
    )
    .unwrap()
});

/// Facade for metric updates.
pub struct Metrics;

impl Metrics {
    pub fn observation_processed() {
        OBSERVATIONS_TOTAL.inc();
    }

    pub fn observation_rejected(reason: &str) {
        OBSERVATIONS_REJECTED_TOTAL
            .with_label_values(&[reason])
            .inc();
    }

    pub fn notification_emitted(kind: &str) {
        NOTIFICATIONS_TOTAL.with_label_values(&[kind]).inc();
    }

    pub fn tracked_tracks_set(count: i64) {
        TRACKED_TRACKS.set(count);
    }

    pub fn tracks_evicted(count: u64) {
        TRACKS_EVICTED_TOTAL.inc_by(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let before = OBSERVATIONS_TOTAL.get();
        Metrics::observation_processed();
        Metrics::observation_processed();
        assert_eq!(OBSERVATIONS_TOTAL.get(), before + 2);

        Metrics::observation_rejected("missing_track_id");
        assert!(
            OBSERVATIONS_REJECTED_TOTAL
                .with_label_values(&["missing_track_id"])
                .get()
                >= 1
        );

        Metrics::tracked_tracks_set(3);
        assert_eq!(TRACKED_TRACKS.get(), 3);
    }
}
