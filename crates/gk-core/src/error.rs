//! Error types for configuration and curve storage.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised while validating or loading an [`EditorConfig`](crate::EditorConfig).
///
/// All of these are fatal at startup: the host reports them and exits.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{axis} dimension must be non-zero (real {real}, virtual {virt})")]
    ZeroDimension {
        axis: &'static str,
        real: u32,
        virt: u32,
    },

    /// The real:virtual ratio must be a positive integer on each axis.
    #[error("{axis} scale {real}/{virt} is not a positive integer")]
    FractionalScale {
        axis: &'static str,
        real: u32,
        virt: u32,
    },

    #[error("max_points must be between 1 and 255, got {0}")]
    Capacity(usize),

    #[error(
        "curve_samples must be between 1 and {max}, got {0}",
        max = crate::config::MAX_CURVE_SAMPLES
    )]
    CurveSamples(u32),

    #[error(
        "guide_step must be between {min} and 1, got {0}",
        min = crate::config::MIN_GUIDE_STEP
    )]
    GuideStep(f64),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when growing a [`Curve`](crate::Curve).
#[derive(Error, Debug)]
pub enum CurveError {
    /// The curve already holds its configured maximum of points.
    /// Not fatal; the click that triggered it is dropped.
    #[error("curve is full ({max} points)")]
    Full { max: usize },

    /// The backing storage could not grow.
    #[error("failed to grow control point storage: {0}")]
    Alloc(#[from] TryReserveError),
}

impl CurveError {
    /// Whether the editor loop must stop on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CurveError::Alloc(_))
    }
}
