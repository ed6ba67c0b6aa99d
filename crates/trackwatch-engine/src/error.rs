//! Engine error types.
//!
//! The taxonomy distinguishes per-observation rejections (unsupported
//! geometry, distance failure) from fatal configuration errors so callers
//! can choose per-category handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The movement test was given a non-point geometry. The distance
    /// metric is undefined for other shapes, so this rejects exactly one
    /// observation and leaves the stored state untouched.
    #[error("Unsupported geometry type: {0} (only points are supported)")]
    UnsupportedGeometry(&'static str),

    /// The geodesic computation produced a non-finite result. The
    /// observation is skipped and the prior anchor retained; defaulting to
    /// a zero distance would falsely advance the idle classification.
    #[error("Geodesic distance computation failed: {0}")]
    DistanceComputation(String),

    /// Rejected at startup, never per event.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
