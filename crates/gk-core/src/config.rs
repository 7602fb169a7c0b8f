//! Editor configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Hosts load it with [`EditorConfig::from_json`] and must call
//! [`EditorConfig::validate`] before building an editor.

use crate::coords::{CoordinateMapper, VirtualBounds};
use crate::error::ConfigError;
use crate::model::{DEFAULT_POINT_SIZE, MAX_POINTS};
use serde::{Deserialize, Serialize};

/// Upper bound for [`EditorConfig::curve_samples`].
pub const MAX_CURVE_SAMPLES: u32 = 100_000;

/// Smallest accepted [`EditorConfig::guide_step`].
pub const MIN_GUIDE_STEP: f64 = 1e-4;

/// How the pointer is matched against control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitWindow {
    /// Hit when within ±scale cells on each axis.
    #[default]
    Tolerance,
    /// Hit only on the exact cell.
    Exact,
}

/// Whether points carry a size that drives stroke thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    /// Stroke size is lerped from the first to the last point's size;
    /// the wheel resizes the hovered point.
    #[default]
    Interpolated,
    /// Unit stroke everywhere; wheel input is ignored.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Window title for hosts that open a window.
    pub title: String,
    pub real_width: u32,
    pub real_height: u32,
    pub virt_width: u32,
    pub virt_height: u32,
    pub hit_window: HitWindow,
    pub size_mode: SizeMode,
    pub default_point_size: f32,
    /// Lower bound applied when the wheel shrinks a point.
    pub min_point_size: f32,
    pub wheel_grow_step: f32,
    pub wheel_shrink_step: f32,
    pub max_points: usize,
    /// Number of parameter steps used to stroke the curve.
    pub curve_samples: u32,
    /// Parameter increment for guide lines.
    pub guide_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: "外積".to_string(),
            real_width: 1000,
            real_height: 1000,
            virt_width: 500,
            virt_height: 500,
            hit_window: HitWindow::Tolerance,
            size_mode: SizeMode::Interpolated,
            default_point_size: DEFAULT_POINT_SIZE,
            min_point_size: 0.2,
            wheel_grow_step: 0.5,
            wheel_shrink_step: 0.2,
            max_points: MAX_POINTS,
            curve_samples: 1000,
            guide_step: 0.01,
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check dimensions and capacity, returning the coordinate mapper they imply.
    pub fn validate(&self) -> Result<CoordinateMapper, ConfigError> {
        let scale_x = axis_scale("x", self.real_width, self.virt_width)?;
        let scale_y = axis_scale("y", self.real_height, self.virt_height)?;
        if self.max_points == 0 || self.max_points > MAX_POINTS {
            return Err(ConfigError::Capacity(self.max_points));
        }
        if !(1..=MAX_CURVE_SAMPLES).contains(&self.curve_samples) {
            return Err(ConfigError::CurveSamples(self.curve_samples));
        }
        if !(MIN_GUIDE_STEP..=1.0).contains(&self.guide_step) {
            return Err(ConfigError::GuideStep(self.guide_step));
        }
        CoordinateMapper::new(scale_x, scale_y).ok_or(ConfigError::FractionalScale {
            axis: "x",
            real: self.real_width,
            virt: self.virt_width,
        })
    }

    pub fn virtual_bounds(&self) -> VirtualBounds {
        VirtualBounds {
            width: self.virt_width as i32,
            height: self.virt_height as i32,
        }
    }
}

fn axis_scale(axis: &'static str, real: u32, virt: u32) -> Result<i32, ConfigError> {
    if real == 0 || virt == 0 {
        return Err(ConfigError::ZeroDimension { axis, real, virt });
    }
    if real < virt || real % virt != 0 || real > i32::MAX as u32 {
        return Err(ConfigError::FractionalScale { axis, real, virt });
    }
    Ok((real / virt) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_scale_is_two() {
        let mapper = EditorConfig::default().validate().unwrap();
        assert_eq!((mapper.scale_x(), mapper.scale_y()), (2, 2));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json(r#"{ "hit_window": "exact", "size_mode": "fixed" }"#)
            .unwrap();
        assert_eq!(cfg.hit_window, HitWindow::Exact);
        assert_eq!(cfg.size_mode, SizeMode::Fixed);
        assert_eq!(cfg.real_width, 1000);
        assert_eq!(cfg.default_point_size, 4.0);
    }

    #[test]
    fn rejects_fractional_scale() {
        let cfg = EditorConfig {
            real_width: 1000,
            virt_width: 300,
            ..EditorConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::FractionalScale { axis: "x", .. })
        ));
    }

    #[test]
    fn rejects_zero_dimension() {
        let cfg = EditorConfig {
            virt_height: 0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroDimension { axis: "y", .. })
        ));
    }

    #[test]
    fn rejects_capacity_outside_byte_range() {
        let cfg = EditorConfig {
            max_points: 256,
            ..EditorConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Capacity(256))));
    }

    #[test]
    fn rejects_sampling_that_would_stall_a_frame() {
        for guide_step in [1e-12, 0.0, -0.5, 1.5, f64::NAN] {
            let cfg = EditorConfig {
                guide_step,
                ..EditorConfig::default()
            };
            assert!(
                matches!(cfg.validate(), Err(ConfigError::GuideStep(_))),
                "guide_step {guide_step} accepted"
            );
        }
        for curve_samples in [0, MAX_CURVE_SAMPLES + 1] {
            let cfg = EditorConfig {
                curve_samples,
                ..EditorConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::CurveSamples(n)) if n == curve_samples
            ));
        }
        let edge = EditorConfig {
            guide_step: 1.0,
            curve_samples: MAX_CURVE_SAMPLES,
            ..EditorConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(
            EditorConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }
}
