//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Engine error: {0}")]
    Engine(#[from] trackwatch_engine::EngineError),

    #[error("Event error: {0}")]
    Event(#[from] trackwatch_events::EventError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] trackwatch_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
