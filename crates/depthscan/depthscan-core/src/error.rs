//! Error types for the scan core.

use thiserror::Error;

/// Configuration and parse failures. Pointer input never produces an error:
/// unusable events are dropped where they arrive.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// Loop duration must be a finite number of seconds greater than zero.
    #[error("invalid loop duration: {seconds}s (must be finite and > 0)")]
    InvalidLoopDuration { seconds: f32 },

    /// Pointer hand-off blend duration must be finite and greater than zero.
    #[error("invalid transition duration: {seconds}s (must be finite and > 0)")]
    InvalidTransitionDuration { seconds: f32 },

    /// Bezier x control points must lie in [0,1] for the timing curve to stay monotonic.
    #[error("invalid bezier easing control points {0:?}")]
    InvalidBezier([f32; 4]),

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScanError {
    /// Category label for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidLoopDuration { .. }
            | Self::InvalidTransitionDuration { .. }
            | Self::InvalidBezier(_) => "config",
            Self::Json(_) => "serialization",
        }
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, ScanError>;
