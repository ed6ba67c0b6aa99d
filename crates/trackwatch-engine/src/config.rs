//! Detector configuration.
//!
//! The notification and duration-accounting rules are explicit orthogonal
//! enums so the state machine itself stays policy-free and testable in
//! isolation from output shaping.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// When idle status is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    /// One idle-start notification per idle episode, silent until the
    /// track moves again.
    #[default]
    OnChange,
    /// A notification on every observation that is still idle and over
    /// the limit.
    Continuous,
}

/// What the reported idle duration measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// Time since the track's position last changed beyond tolerance.
    #[default]
    Cumulative,
    /// Time since the previous observation, regardless of how long the
    /// track has been idle overall.
    Incremental,
}

/// Configuration for idle detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Notification policy while a track stays idle.
    #[serde(default)]
    pub notification_mode: NotificationMode,
    /// Non-movement time (seconds) beyond which a track is idle.
    #[serde(default = "default_idle_limit_secs")]
    pub idle_limit_secs: u64,
    /// Minimum geodesic displacement (feet) that counts as movement.
    #[serde(default = "default_tolerance_feet")]
    pub tolerance_feet: f64,
    /// Duration accounting policy.
    #[serde(default)]
    pub duration_mode: DurationMode,
    /// Whether the idle->moving notification carries the accumulated idle
    /// duration or reports zero.
    #[serde(default = "default_report_duration_on_idle_end")]
    pub report_duration_on_idle_end: bool,
}

fn default_idle_limit_secs() -> u64 {
    300
}

fn default_tolerance_feet() -> f64 {
    50.0
}

fn default_report_duration_on_idle_end() -> bool {
    true
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            notification_mode: NotificationMode::default(),
            idle_limit_secs: default_idle_limit_secs(),
            tolerance_feet: default_tolerance_feet(),
            duration_mode: DurationMode::default(),
            report_duration_on_idle_end: default_report_duration_on_idle_end(),
        }
    }
}

impl DetectorConfig {
    /// Validate configuration values.
    ///
    /// Checked once at startup; a limit of zero would classify every
    /// stationary observation as idle.
    pub fn validate(&self) -> EngineResult<()> {
        if self.idle_limit_secs == 0 {
            return Err(EngineError::InvalidConfig(
                "idle_limit_secs must be greater than zero".to_string(),
            ));
        }
        if !self.tolerance_feet.is_finite() || self.tolerance_feet < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "tolerance_feet ({}) must be a non-negative number",
                self.tolerance_feet
            )));
        }
        Ok(())
    }
}
