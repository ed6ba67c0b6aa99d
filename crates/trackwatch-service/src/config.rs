//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trackwatch_engine::DetectorConfig;
use trackwatch_events::FieldPolicy;

/// Pipeline-level settings that sit outside the detector itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Which triggering-observation fields the output records carry.
    #[serde(default)]
    pub field_policy: FieldPolicy,
    /// Stale-track sweep interval in seconds. 0 disables the sweep and
    /// the state store grows for the process lifetime.
    #[serde(default)]
    pub sweep_interval_secs: u64,
    /// Age beyond which an unseen track is evicted by the sweep.
    #[serde(default = "default_sweep_max_age_secs")]
    pub sweep_max_age_secs: u64,
}

fn default_sweep_max_age_secs() -> u64 {
    86_400
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            field_policy: FieldPolicy::default(),
            sweep_interval_secs: 0,
            sweep_max_age_secs: default_sweep_max_age_secs(),
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Resolve and load the configuration.
    ///
    /// Precedence: explicit path > `TRACKWATCH_CONFIG` env var > the
    /// default path, falling back to defaults when no file exists at the
    /// default path. An explicitly named file that cannot be read is an
    /// error.
    pub fn load(explicit_path: Option<String>) -> AppResult<Self> {
        let named = explicit_path.or_else(|| std::env::var("TRACKWATCH_CONFIG").ok());
        match named {
            Some(path) => Self::from_file(&path),
            None => {
                let default_path = "config/default.toml";
                if Path::new(default_path).exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {path}: {e}")))?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("cannot parse {path}: {e}")))
    }

    /// Startup validation; the service refuses to run on bad settings.
    pub fn validate(&self) -> AppResult<()> {
        self.detector.validate()?;
        if self.pipeline.sweep_interval_secs > 0 && self.pipeline.sweep_max_age_secs == 0 {
            return Err(AppError::Config(
                "sweep_max_age_secs must be greater than zero when the sweep is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
