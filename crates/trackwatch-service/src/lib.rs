//! Track idle detection service.
//!
//! Wires the engine to its collaborators: event records in, idle
//! notification records out, with configuration, logging, and an optional
//! stale-track sweep.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, PipelineConfig};
pub use error::{AppError, AppResult};
