//! Virtual grid ↔ framebuffer pixel conversion.
//!
//! The curve is authored on a coarse virtual grid. Each virtual cell covers
//! a `scale_x × scale_y` block of real pixels.

use crate::model::GridPoint;

/// Integer-scale mapping between real pixels and virtual cells.
///
/// Performs no clamping; callers clamp with [`VirtualBounds::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    scale_x: i32,
    scale_y: i32,
}

impl CoordinateMapper {
    /// Build a mapper from per-axis scales.
    ///
    /// Returns `None` unless both scales are positive.
    pub fn new(scale_x: i32, scale_y: i32) -> Option<Self> {
        (scale_x > 0 && scale_y > 0).then_some(Self { scale_x, scale_y })
    }

    pub fn scale_x(&self) -> i32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> i32 {
        self.scale_y
    }

    /// Real pixel → virtual cell. Truncates toward zero.
    #[inline]
    pub fn to_virtual(&self, real_x: i32, real_y: i32) -> GridPoint {
        GridPoint::new(real_x / self.scale_x, real_y / self.scale_y)
    }

    /// Virtual cell → top-left real pixel of its block.
    #[inline]
    pub fn to_real(&self, vx: i32, vy: i32) -> (i64, i64) {
        (
            vx as i64 * self.scale_x as i64,
            vy as i64 * self.scale_y as i64,
        )
    }
}

/// Extent of the virtual grid.
///
/// Stored point coordinates lie in `[0, width] × [0, height]`, both ends
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualBounds {
    pub width: i32,
    pub height: i32,
}

impl VirtualBounds {
    pub fn clamp(&self, p: GridPoint) -> GridPoint {
        GridPoint::new(p.x.clamp(0, self.width), p.y.clamp(0, self.height))
    }

    /// Whether `p` addresses a drawable cell (`[0, width) × [0, height)`).
    pub fn contains_cell(&self, p: GridPoint) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }
}
