pub mod config;
pub mod coords;
pub mod curve;
pub mod error;
pub mod model;

pub use config::{EditorConfig, HitWindow, MAX_CURVE_SAMPLES, MIN_GUIDE_STEP, SizeMode};
pub use coords::{CoordinateMapper, VirtualBounds};
pub use curve::{CurveSample, evaluate, lerp, lerp_size, sample};
pub use error::{ConfigError, CurveError};
pub use model::*;
