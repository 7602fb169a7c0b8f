//! Per-frame drawing.
//!
//! Paint order, back to front:
//!
//! 1. background and dot grid
//! 2. cursor cross (only while placing)
//! 3. the curve stroke
//! 4. guide lines between control points
//! 5. control-point markers, hovered one highlighted

use crate::raster::Rasterizer;
use crate::surface::FrameBuffer;
use gk_core::{
    Color, CoordinateMapper, Curve, EditorConfig, GridPoint, PointHandle, SizeMode, VirtualBounds,
};

/// Fixed colors of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub cursor: Color,
    pub curve: Color,
    pub guide: Color,
    pub marker: Color,
    pub marker_hover: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            grid: Color::gray(80),
            cursor: Color::gray(200),
            curve: Color::rgb(255, 0, 0),
            guide: Color::gray(100),
            marker: Color::gray(128),
            marker_hover: Color::gray(255),
        }
    }
}

const GRID_ORIGIN: i32 = 15;
const GRID_SPACING: usize = 20;
const CURSOR_ARM: i32 = 5;
const MARKER_RADIUS: i32 = 2;

/// What a frame shows: the editor state the renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub curve: &'a Curve,
    pub hover: Option<PointHandle>,
    /// Cursor cross position; `None` hides it.
    pub cursor: Option<GridPoint>,
}

pub struct FrameRenderer {
    raster: Rasterizer,
    bounds: VirtualBounds,
    size_mode: SizeMode,
    curve_samples: u32,
    guide_step: f64,
    palette: Palette,
}

impl FrameRenderer {
    pub fn new(config: &EditorConfig, mapper: CoordinateMapper) -> Self {
        Self {
            raster: Rasterizer::new(mapper),
            bounds: config.virtual_bounds(),
            size_mode: config.size_mode,
            curve_samples: config.curve_samples.max(1),
            guide_step: config.guide_step,
            palette: Palette::default(),
        }
    }

    /// Draw one complete frame. The caller holds the surface lock.
    pub fn render<F: FrameBuffer>(&self, frame: &mut F, view: &FrameView<'_>) {
        log::trace!(
            "render {} points, hover {:?}, cursor {:?}",
            view.curve.len(),
            view.hover,
            view.cursor
        );
        self.paint_background(frame);
        if let Some(cursor) = view.cursor {
            self.paint_cursor(frame, cursor);
        }
        self.paint_curve(frame, view.curve);
        self.paint_guides(frame, view.curve);
        self.paint_markers(frame, view.curve, view.hover);
    }

    fn paint_background<F: FrameBuffer>(&self, frame: &mut F) {
        frame.fill(self.palette.background);
        for x in (GRID_ORIGIN..self.bounds.width).step_by(GRID_SPACING) {
            for y in (GRID_ORIGIN..self.bounds.height).step_by(GRID_SPACING) {
                self.raster
                    .paint_cell_clipped(frame, GridPoint::new(x, y), self.palette.grid, 1.0);
            }
        }
    }

    fn paint_cursor<F: FrameBuffer>(&self, frame: &mut F, cursor: GridPoint) {
        let horizontal = (-CURSOR_ARM..=CURSOR_ARM).map(|d| GridPoint::new(cursor.x + d, cursor.y));
        let vertical = (-CURSOR_ARM..=CURSOR_ARM).map(|d| GridPoint::new(cursor.x, cursor.y + d));
        for cell in horizontal.chain(vertical) {
            if self.bounds.contains_cell(cell) {
                self.raster
                    .paint_cell_clipped(frame, cell, self.palette.cursor, 1.0);
            }
        }
    }

    fn paint_curve<F: FrameBuffer>(&self, frame: &mut F, curve: &Curve) {
        let points = curve.points();
        if points.len() < 2 {
            return;
        }
        let Some(mut prev) = gk_core::evaluate(points, 0.0) else {
            return;
        };
        for i in 0..=self.curve_samples {
            let t = i as f64 / self.curve_samples as f64;
            let Some(sample) = gk_core::sample(points, t, self.size_mode) else {
                continue;
            };
            self.raster
                .paint_line(frame, prev, sample.point, self.palette.curve, sample.size);
            prev = sample.point;
            self.raster
                .paint_cell_clipped(frame, prev, self.palette.curve, sample.size);
        }
    }

    fn paint_guides<F: FrameBuffer>(&self, frame: &mut F, curve: &Curve) {
        let points = curve.points();
        // Quadratics link every neighbour pair; higher degrees link handle
        // pairs (0,1), (2,3), …
        let stride = match points.len() {
            0..=2 => return,
            3 => 1,
            _ => 2,
        };
        for i in (0..points.len() - 1).step_by(stride) {
            self.raster.paint_parametric_line(
                frame,
                points[i].position(),
                points[i + 1].position(),
                self.palette.guide,
                self.guide_step,
            );
        }
    }

    fn paint_markers<F: FrameBuffer>(
        &self,
        frame: &mut F,
        curve: &Curve,
        hover: Option<PointHandle>,
    ) {
        for (handle, point) in curve.iter() {
            let color = if hover == Some(handle) {
                self.palette.marker_hover
            } else {
                self.palette.marker
            };
            for dy in -MARKER_RADIUS..=MARKER_RADIUS {
                for dx in -MARKER_RADIUS..=MARKER_RADIUS {
                    let cell = GridPoint::new(point.x + dx, point.y + dy);
                    self.raster.paint_cell_clipped(frame, cell, color, 1.0);
                }
            }
        }
    }
}
