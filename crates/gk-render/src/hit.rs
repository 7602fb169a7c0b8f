//! Hit testing: pointer position → control point lookup.
//!
//! Points may overlap inside the hit window. The point appended last is
//! treated as topmost, the same order the markers are painted in.

use gk_core::{CoordinateMapper, Curve, GridPoint, HitWindow, PointHandle};

/// Half-size of the hit window in virtual cells, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTolerance {
    pub dx: i32,
    pub dy: i32,
}

impl HitTolerance {
    pub const EXACT: HitTolerance = HitTolerance { dx: 0, dy: 0 };

    /// `±scale` for [`HitWindow::Tolerance`], zero for [`HitWindow::Exact`].
    pub fn new(window: HitWindow, mapper: &CoordinateMapper) -> Self {
        match window {
            HitWindow::Tolerance => Self {
                dx: mapper.scale_x(),
                dy: mapper.scale_y(),
            },
            HitWindow::Exact => Self::EXACT,
        }
    }

    fn matches(&self, point: GridPoint, pointer: GridPoint) -> bool {
        (point.x - pointer.x).abs() <= self.dx && (point.y - pointer.y).abs() <= self.dy
    }
}

/// Find the topmost point within the hit window around `pointer`.
/// Returns `None` if no point is hit.
pub fn hit_test(curve: &Curve, pointer: GridPoint, tolerance: HitTolerance) -> Option<PointHandle> {
    // Walk in reverse (last appended = topmost)
    curve
        .iter()
        .rev()
        .find(|(_, p)| tolerance.matches(p.position(), pointer))
        .map(|(handle, _)| handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::ControlPoint;
    use pretty_assertions::assert_eq;

    const WINDOW: HitTolerance = HitTolerance { dx: 2, dy: 2 };

    fn curve(points: &[(i32, i32)]) -> Curve {
        let mut c = Curve::new();
        for &(x, y) in points {
            c.append(ControlPoint::at(x, y)).unwrap();
        }
        c
    }

    #[test]
    fn hit_inside_window() {
        let c = curve(&[(10, 10)]);
        let first = c.iter().next().map(|(h, _)| h);
        assert_eq!(hit_test(&c, GridPoint::new(12, 8), WINDOW), first);
        assert_eq!(hit_test(&c, GridPoint::new(13, 10), WINDOW), None);
    }

    #[test]
    fn last_overlapping_point_wins() {
        let c = curve(&[(10, 10), (11, 11), (40, 40)]);
        let second = c.iter().nth(1).map(|(h, _)| h);
        assert_eq!(hit_test(&c, GridPoint::new(10, 10), WINDOW), second);
    }

    #[test]
    fn exact_window_needs_same_cell() {
        let c = curve(&[(10, 10)]);
        assert_eq!(hit_test(&c, GridPoint::new(11, 10), HitTolerance::EXACT), None);
        assert!(hit_test(&c, GridPoint::new(10, 10), HitTolerance::EXACT).is_some());
    }

    #[test]
    fn repeated_lookup_is_stable() {
        let c = curve(&[(5, 5), (6, 5), (7, 5)]);
        let p = GridPoint::new(6, 6);
        assert_eq!(hit_test(&c, p, WINDOW), hit_test(&c, p, WINDOW));
    }

    #[test]
    fn tolerance_follows_scale() {
        let mapper = CoordinateMapper::new(3, 2).unwrap();
        assert_eq!(
            HitTolerance::new(HitWindow::Tolerance, &mapper),
            HitTolerance { dx: 3, dy: 2 }
        );
        assert_eq!(HitTolerance::new(HitWindow::Exact, &mapper), HitTolerance::EXACT);
    }
}
