//! Main application loop.
//!
//! Reads JSON event records line-by-line from stdin, runs the idle
//! detector, and writes notification records as JSON lines to stdout.
//! Malformed input is logged and skipped; a failure on one track never
//! affects another.

use crate::config::AppConfig;
use crate::error::AppResult;
use chrono::Utc;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use trackwatch_engine::{EngineError, IdleDetector, TrackStateStore};
use trackwatch_events::{notification_record, observation_from_record, EventRecord};
use trackwatch_telemetry::Metrics;

/// The wired-up service: detector plus pipeline policies.
pub struct Application {
    config: AppConfig,
    detector: IdleDetector,
}

impl Application {
    /// Build the application, validating all configuration up front.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let store = Arc::new(TrackStateStore::new());
        let detector = IdleDetector::with_store(config.detector.clone(), store)?;
        Ok(Self { config, detector })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn detector(&self) -> &IdleDetector {
        &self.detector
    }

    /// Handle one inbound record, returning the shaped output record when
    /// the engine produced a notification.
    pub fn handle_record(&self, record: &EventRecord) -> Option<EventRecord> {
        Metrics::observation_processed();

        let observation = match observation_from_record(record) {
            Ok(obs) => obs,
            Err(err) => {
                warn!(reason = err.reason(), %err, "Dropping malformed observation");
                Metrics::observation_rejected(err.reason());
                return None;
            }
        };

        let outcome = self.detector.process(&observation);
        Metrics::tracked_tracks_set(self.detector.store().len() as i64);

        match outcome {
            Ok(Some(notification)) => {
                info!(
                    key = %observation.key,
                    kind = notification.kind(),
                    duration_secs = notification.idle_duration_secs,
                    "Idle notification"
                );
                Metrics::notification_emitted(notification.kind());
                Some(notification_record(
                    &notification,
                    record,
                    self.config.pipeline.field_policy,
                ))
            }
            Ok(None) => None,
            Err(err) => {
                // Per-observation rejection: prior anchor retained, other
                // tracks unaffected.
                warn!(key = %observation.key, %err, "Skipping observation");
                Metrics::observation_rejected(engine_reason(&err));
                None
            }
        }
    }

    /// Run the stdin -> stdout pipeline until the input is exhausted.
    pub async fn run(&self) -> AppResult<()> {
        let sweep = self.spawn_sweep();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let record = match EventRecord::from_json(&line) {
                Ok(record) => record,
                Err(err) => {
                    warn!(%err, "Dropping undecodable record");
                    Metrics::observation_rejected(err.reason());
                    continue;
                }
            };
            if let Some(out) = self.handle_record(&record) {
                if !emit(&mut stdout, &out).await {
                    break;
                }
            }
        }

        info!(tracks = self.detector.store().len(), "Pipeline stopped");
        if let Some(handle) = sweep {
            handle.abort();
        }
        Ok(())
    }

    /// Periodic stale-track eviction, when enabled.
    fn spawn_sweep(&self) -> Option<JoinHandle<()>> {
        let interval_secs = self.config.pipeline.sweep_interval_secs;
        if interval_secs == 0 {
            return None;
        }
        let max_age = chrono::Duration::seconds(self.config.pipeline.sweep_max_age_secs as i64);
        let store = self.detector.store().clone();
        Some(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_secs(interval_secs));
            loop {
                ticker.tick().await;
                let evicted = store.evict_stale(max_age, Utc::now());
                if evicted > 0 {
                    info!(evicted, remaining = store.len(), "Sweep removed stale tracks");
                    Metrics::tracks_evicted(evicted as u64);
                }
                Metrics::tracked_tracks_set(store.len() as i64);
            }
        }))
    }
}

fn engine_reason(err: &EngineError) -> &'static str {
    match err {
        EngineError::UnsupportedGeometry(_) => "unsupported_geometry",
        EngineError::DistanceComputation(_) => "distance_computation",
        EngineError::InvalidConfig(_) => "invalid_config",
    }
}

/// Write one notification record as a JSON line. Returns `false` when the
/// sink has gone away (downstream consumer exited) and the pipeline should
/// stop cleanly instead of panicking on the next write.
async fn emit<W>(sink: &mut W, record: &EventRecord) -> bool
where
    W: AsyncWrite + Unpin,
{
    let mut json = match record.to_json() {
        Ok(json) => json,
        Err(err) => {
            warn!(%err, "Failed to encode notification record");
            return true;
        }
    };
    json.push('\n');
    let written = match sink.write_all(json.as_bytes()).await {
        Ok(()) => sink.flush().await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        warn!(%err, "Notification sink closed, stopping");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    struct ClosedSink;

    impl AsyncWrite for ClosedSink {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_emit_writes_one_json_line() {
        let record = EventRecord::new("acme", "TrackIdle");
        let mut buf = Vec::new();
        assert!(emit(&mut buf, &record).await);
        assert!(buf.ends_with(b"\n"));
    }

    #[tokio::test]
    async fn test_closed_sink_requests_clean_stop() {
        let record = EventRecord::new("acme", "TrackIdle");
        let mut sink = ClosedSink;
        assert!(!emit(&mut sink, &record).await);
    }
}
