//! De Casteljau evaluation for curves of any degree.
//!
//! Positions are integers on the virtual grid. Every interpolation step
//! floors its result, so higher-degree curves accumulate the rounding of
//! each reduction level. That is the expected on-screen shape.

use crate::config::SizeMode;
use crate::model::{ControlPoint, GridPoint};
use smallvec::SmallVec;

/// A point on the curve together with the stroke size at that parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub point: GridPoint,
    pub size: f32,
}

/// Component-wise linear interpolation, floored to the grid.
#[inline]
pub fn lerp(p1: GridPoint, p2: GridPoint, t: f64) -> GridPoint {
    let x = p1.x as f64 + t * (p2.x as f64 - p1.x as f64);
    let y = p1.y as f64 + t * (p2.y as f64 - p1.y as f64);
    GridPoint::new(x.floor() as i32, y.floor() as i32)
}

/// Linear interpolation of a scalar size.
#[inline]
pub fn lerp_size(first: f32, last: f32, t: f64) -> f32 {
    (first as f64 + t * (last as f64 - first as f64)) as f32
}

/// Evaluate the Bézier curve defined by `points` at parameter `t`.
///
/// Each reduction level replaces `n` points with the `n - 1` pairwise
/// lerps of neighbours until one point is left. Cost is O(n²) per call.
/// Returns `None` for an empty slice; a single point is returned as is.
pub fn evaluate<P>(points: &[P], t: f64) -> Option<GridPoint>
where
    P: Copy + Into<GridPoint>,
{
    let mut scratch: SmallVec<[GridPoint; 16]> = points.iter().map(|&p| p.into()).collect();
    let n = scratch.len();
    if n == 0 {
        return None;
    }
    Some(reduce(&mut scratch, n, t))
}

// Reduces `buf[..n]` in place. Writing left to right is safe: slot `i`
// reads slot `i + 1`, which is still from the previous level.
fn reduce(buf: &mut [GridPoint], n: usize, t: f64) -> GridPoint {
    if n == 1 {
        return buf[0];
    }
    for i in 0..n - 1 {
        buf[i] = lerp(buf[i], buf[i + 1], t);
    }
    reduce(buf, n - 1, t)
}

/// Evaluate the curve position and its stroke size at `t`.
///
/// In [`SizeMode::Interpolated`] the size runs linearly from the first
/// point's size to the last point's size; it does not go through the
/// de Casteljau reduction. In [`SizeMode::Fixed`] it is always `1.0`.
pub fn sample(points: &[ControlPoint], t: f64, mode: SizeMode) -> Option<CurveSample> {
    let point = evaluate(points, t)?;
    let size = match mode {
        SizeMode::Interpolated => {
            let first = points.first()?.size;
            let last = points.last()?.size;
            lerp_size(first, last, t)
        }
        SizeMode::Fixed => 1.0,
    };
    Some(CurveSample { point, size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gp(x: i32, y: i32) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn lerp_floors_instead_of_rounding() {
        assert_eq!(lerp(gp(0, 0), gp(3, 3), 0.5), gp(1, 1));
        assert_eq!(lerp(gp(3, 3), gp(0, 0), 0.5), gp(1, 1));
        assert_eq!(lerp(gp(0, 0), gp(-3, 0), 0.5), gp(-2, 0));
    }

    #[test]
    fn single_point_ignores_t() {
        for t in [0.0, 0.3, 1.0] {
            assert_eq!(evaluate(&[gp(7, 9)], t), Some(gp(7, 9)));
        }
    }

    #[test]
    fn two_points_match_lerp() {
        let a = gp(3, 40);
        let b = gp(91, -12);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_eq!(evaluate(&[a, b], t), Some(lerp(a, b, t)));
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let pts = [gp(10, 10), gp(250, 3), gp(499, 480), gp(42, 77), gp(0, 500)];
        assert_eq!(evaluate(&pts, 0.0), Some(pts[0]));
        assert_eq!(evaluate(&pts, 1.0), Some(pts[4]));
    }

    #[test]
    fn quadratic_midpoint() {
        // B(0.5) = 0.25·P0 + 0.5·P1 + 0.25·P2 = (17.5, 12.5)
        let pts = [gp(10, 10), gp(20, 10), gp(20, 20)];
        assert_eq!(evaluate(&pts, 0.5), Some(gp(17, 12)));
    }

    #[test]
    fn empty_has_no_point() {
        let pts: [GridPoint; 0] = [];
        assert_eq!(evaluate(&pts, 0.5), None);
    }

    #[test]
    fn handles_full_capacity_curve() {
        let pts: Vec<GridPoint> = (0..255).map(|i| gp(i, 255 - i)).collect();
        assert_eq!(evaluate(&pts, 0.0), Some(gp(0, 255)));
        assert_eq!(evaluate(&pts, 1.0), Some(gp(254, 1)));
        assert!(evaluate(&pts, 0.5).is_some());
    }

    #[test]
    fn sample_interpolates_size_between_ends() {
        let pts = [
            ControlPoint::new(0, 0, 2.0),
            ControlPoint::new(50, 100, 30.0),
            ControlPoint::new(100, 0, 6.0),
        ];
        let s = sample(&pts, 0.5, SizeMode::Interpolated).unwrap();
        assert_eq!(s.point, gp(50, 50));
        assert!((s.size - 4.0).abs() < 1e-6);

        let fixed = sample(&pts, 0.5, SizeMode::Fixed).unwrap();
        assert_eq!(fixed.size, 1.0);
    }
}
