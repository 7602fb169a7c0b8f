//! Control-point data model.
//!
//! A document is exactly one open polyline of control points. Points live
//! in virtual grid space and are owned by the [`Curve`]; everything else
//! refers to them through a [`PointHandle`], which is an index into the
//! store. Points are never removed or reordered, so a handle stays valid
//! for the lifetime of the curve it came from.

use crate::error::CurveError;
use serde::{Deserialize, Serialize};

/// Size given to points created without an explicit size.
pub const DEFAULT_POINT_SIZE: f32 = 4.0;

/// Largest number of points a curve may hold.
pub const MAX_POINTS: usize = 255;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Pack as `0x00RRGGBB`, the layout of an XRGB8888 framebuffer.
    pub const fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_xrgb(packed: u32) -> Self {
        Self::rgb((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }
}

// ─── Points ──────────────────────────────────────────────────────────────

/// An integer position on the virtual grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A curve control point.
///
/// `size` drives stroke thickness in the interpolated size mode and is
/// ignored in the fixed mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: i32,
    pub y: i32,
    pub size: f32,
}

impl ControlPoint {
    pub const fn new(x: i32, y: i32, size: f32) -> Self {
        Self { x, y, size }
    }

    pub const fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, DEFAULT_POINT_SIZE)
    }

    pub const fn position(&self) -> GridPoint {
        GridPoint::new(self.x, self.y)
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

impl From<ControlPoint> for GridPoint {
    fn from(p: ControlPoint) -> Self {
        p.position()
    }
}

// ─── Curve ───────────────────────────────────────────────────────────────

/// Non-owning reference to a point inside a [`Curve`].
///
/// Only meaningful for the curve that issued it. Compare handles to test
/// identity; resolve through [`Curve::get`] to read the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointHandle(usize);

impl PointHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered, append-only store of control points.
///
/// Insertion order defines the curve topology.
#[derive(Debug, Clone)]
pub struct Curve {
    points: Vec<ControlPoint>,
    max_points: usize,
}

impl Default for Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve {
    pub fn new() -> Self {
        Self::with_max_points(MAX_POINTS)
    }

    /// Create an empty curve capped at `max_points` (at most [`MAX_POINTS`]).
    pub fn with_max_points(max_points: usize) -> Self {
        Self {
            points: Vec::new(),
            max_points: max_points.min(MAX_POINTS),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Append a point at the end of the polyline and return its handle.
    ///
    /// Existing handles keep referring to the same points after the call.
    pub fn append(&mut self, point: ControlPoint) -> Result<PointHandle, CurveError> {
        if self.points.len() >= self.max_points {
            return Err(CurveError::Full {
                max: self.max_points,
            });
        }
        self.points.try_reserve(1)?;
        self.points.push(point);
        let handle = PointHandle(self.points.len() - 1);
        log::debug!(
            "append point #{} at ({}, {}) size {}",
            handle.0,
            point.x,
            point.y,
            point.size
        );
        Ok(handle)
    }

    pub fn get(&self, handle: PointHandle) -> Option<&ControlPoint> {
        self.points.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: PointHandle) -> Option<&mut ControlPoint> {
        self.points.get_mut(handle.0)
    }

    /// Handles paired with their points, in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PointHandle, &ControlPoint)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointHandle(i), p))
    }

    pub fn first(&self) -> Option<&ControlPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ControlPoint> {
        self.points.last()
    }
}
