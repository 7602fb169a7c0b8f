//! Cell and line rasterization on the virtual grid.
//!
//! One virtual cell covers a `scale × scale` block of real pixels. A cell
//! painted with size `s` covers `ceil(scale · s)` pixels on each side,
//! anchored at the cell's top-left corner.

use crate::surface::FrameBuffer;
use gk_core::{Color, CoordinateMapper, GridPoint, lerp};
use kurbo::Point;

#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    mapper: CoordinateMapper,
}

impl Rasterizer {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    /// Pixel extent `(w, h)` of a cell of the given size. Zero when `size <= 0`.
    pub fn cell_extent(&self, size: f32) -> (u32, u32) {
        let side = |scale: i32| {
            let px = (scale as f32 * size).ceil();
            if px > 0.0 { px as u32 } else { 0 }
        };
        (side(self.mapper.scale_x()), side(self.mapper.scale_y()))
    }

    /// Whether a cell of `size` at `cell` lies entirely inside the frame.
    pub fn fits<F: FrameBuffer>(&self, frame: &F, cell: GridPoint, size: f32) -> bool {
        let (rx, ry) = self.mapper.to_real(cell.x, cell.y);
        let (w, h) = self.cell_extent(size);
        rx >= 0
            && ry >= 0
            && rx + w as i64 <= frame.width() as i64
            && ry + h as i64 <= frame.height() as i64
    }

    /// Fill the pixel block of one cell with a flat color.
    ///
    /// Performs no bounds checking. The caller must ensure the block fits
    /// the frame (see [`Rasterizer::fits`]); otherwise the frame's
    /// `put_pixel` panics.
    pub fn paint_cell<F: FrameBuffer>(
        &self,
        frame: &mut F,
        cell: GridPoint,
        color: Color,
        size: f32,
    ) {
        debug_assert!(
            self.fits(frame, cell, size),
            "cell ({}, {}) size {size} outside frame",
            cell.x,
            cell.y
        );
        let (rx, ry) = self.mapper.to_real(cell.x, cell.y);
        let (w, h) = self.cell_extent(size);
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                frame.put_pixel((rx + dx) as u32, (ry + dy) as u32, color);
            }
        }
    }

    /// Paint the part of a cell's block that overlaps the frame.
    ///
    /// Returns `false` when nothing of the block lies inside the frame.
    pub fn paint_cell_clipped<F: FrameBuffer>(
        &self,
        frame: &mut F,
        cell: GridPoint,
        color: Color,
        size: f32,
    ) -> bool {
        let (rx, ry) = self.mapper.to_real(cell.x, cell.y);
        let (w, h) = self.cell_extent(size);
        let (x0, y0) = (rx.max(0), ry.max(0));
        let x1 = (rx + w as i64).min(frame.width() as i64);
        let y1 = (ry + h as i64).min(frame.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                frame.put_pixel(x as u32, y as u32, color);
            }
        }
        true
    }

    /// Walk from `p1` toward `p2` in unit steps, painting a cell at each
    /// rounded position, until within half a cell of `p2`.
    ///
    /// `p2` itself is not painted. A zero-length segment paints nothing.
    /// Cells are clipped to the frame.
    pub fn paint_line<F: FrameBuffer>(
        &self,
        frame: &mut F,
        p1: GridPoint,
        p2: GridPoint,
        color: Color,
        size: f32,
    ) {
        let start = Point::new(p1.x as f64, p1.y as f64);
        let end = Point::new(p2.x as f64, p2.y as f64);
        let delta = end - start;
        let len = delta.hypot();
        if len == 0.0 {
            return;
        }
        let dir = delta / len;

        // Distance to `end` drops by one per step, so it falls within 0.5
        // after at most ceil(len) steps.
        let max_steps = len.ceil() as usize + 1;
        let mut cursor = start;
        for _ in 0..max_steps {
            if cursor.distance(end) <= 0.5 {
                break;
            }
            let cell = GridPoint::new(cursor.x.round() as i32, cursor.y.round() as i32);
            self.paint_cell_clipped(frame, cell, color, size);
            cursor += dir;
        }
    }

    /// Paint unit cells at `lerp(p1, p2, t)` for `t = 0, step, 2·step, …` below 1.
    pub fn paint_parametric_line<F: FrameBuffer>(
        &self,
        frame: &mut F,
        p1: GridPoint,
        p2: GridPoint,
        color: Color,
        step: f64,
    ) {
        if step.is_nan() || step <= 0.0 {
            log::warn!("ignoring parametric line with step {step}");
            return;
        }
        let count = (1.0 / step).ceil() as u64;
        for i in 0..count {
            let t = i as f64 * step;
            if t >= 1.0 {
                break;
            }
            self.paint_cell_clipped(frame, lerp(p1, p2, t), color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{PixelBuffer, Surface};
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgb(255, 0, 0);

    fn raster() -> Rasterizer {
        Rasterizer::new(CoordinateMapper::new(2, 2).unwrap())
    }

    fn painted_cells(surface: &PixelBuffer, virt: u32) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for vy in 0..virt {
            for vx in 0..virt {
                if surface.presented_pixel(vx * 2, vy * 2) != Some(Color::BLACK) {
                    out.push((vx, vy));
                }
            }
        }
        out
    }

    #[test]
    fn cell_extent_scales_and_rounds_up() {
        let r = raster();
        assert_eq!(r.cell_extent(1.0), (2, 2));
        assert_eq!(r.cell_extent(4.3), (9, 9));
        assert_eq!(r.cell_extent(0.0), (0, 0));
        assert_eq!(r.cell_extent(-1.0), (0, 0));
    }

    #[test]
    fn paint_cell_fills_scaled_block() {
        let r = raster();
        let mut surface = PixelBuffer::new(10, 10).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            r.paint_cell(&mut frame, GridPoint::new(1, 2), RED, 1.0);
        }
        surface.present().unwrap();

        for (x, y) in [(2, 4), (3, 4), (2, 5), (3, 5)] {
            assert_eq!(surface.presented_pixel(x, y), Some(RED));
        }
        assert_eq!(surface.presented_pixel(4, 4), Some(Color::BLACK));
        assert_eq!(surface.presented_pixel(2, 6), Some(Color::BLACK));
    }

    #[test]
    fn clipped_cell_outside_frame_is_skipped() {
        let r = raster();
        let mut surface = PixelBuffer::new(10, 10).unwrap();
        let mut frame = surface.lock().unwrap();
        assert!(!r.paint_cell_clipped(&mut frame, GridPoint::new(-1, 0), RED, 1.0));
        assert!(!r.paint_cell_clipped(&mut frame, GridPoint::new(5, 0), RED, 1.0));
        assert!(!r.paint_cell_clipped(&mut frame, GridPoint::new(0, 5), RED, 4.0));
        assert!(r.paint_cell_clipped(&mut frame, GridPoint::new(4, 4), RED, 1.0));
    }

    #[test]
    fn clipped_cell_paints_the_part_inside_the_frame() {
        let r = raster();
        let mut surface = PixelBuffer::new(10, 10).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            // 8x8 block at (6, 6), of which 4x4 is on the frame.
            assert!(r.paint_cell_clipped(&mut frame, GridPoint::new(3, 3), RED, 4.0));
            // Starts left of the frame, one pixel column remains.
            assert!(r.paint_cell_clipped(&mut frame, GridPoint::new(-1, 0), RED, 1.5));
        }
        surface.present().unwrap();

        assert_eq!(surface.presented_pixel(6, 6), Some(RED));
        assert_eq!(surface.presented_pixel(9, 9), Some(RED));
        assert_eq!(surface.presented_pixel(5, 6), Some(Color::BLACK));
        assert_eq!(surface.presented_pixel(0, 0), Some(RED));
        assert_eq!(surface.presented_pixel(0, 2), Some(RED));
        assert_eq!(surface.presented_pixel(1, 0), Some(Color::BLACK));
        assert_eq!(surface.presented_pixel(0, 3), Some(Color::BLACK));
    }

    #[test]
    fn horizontal_line_terminates_and_excludes_end() {
        let r = raster();
        let mut surface = PixelBuffer::new(40, 40).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            r.paint_line(&mut frame, GridPoint::new(2, 5), GridPoint::new(8, 5), RED, 1.0);
        }
        surface.present().unwrap();
        let cells = painted_cells(&surface, 20);
        assert_eq!(cells, (2..8).map(|x| (x, 5)).collect::<Vec<_>>());
    }

    #[test]
    fn vertical_line_terminates() {
        let r = raster();
        let mut surface = PixelBuffer::new(40, 40).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            r.paint_line(&mut frame, GridPoint::new(3, 10), GridPoint::new(3, 4), RED, 1.0);
        }
        surface.present().unwrap();
        let cells = painted_cells(&surface, 20);
        assert_eq!(cells, (5..=10).map(|y| (3, y)).collect::<Vec<_>>());
    }

    #[test]
    fn zero_length_line_paints_nothing() {
        let r = raster();
        let mut surface = PixelBuffer::new(20, 20).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            r.paint_line(&mut frame, GridPoint::new(3, 3), GridPoint::new(3, 3), RED, 1.0);
        }
        surface.present().unwrap();
        assert!(painted_cells(&surface, 10).is_empty());
    }

    #[test]
    fn diagonal_line_stays_on_the_diagonal() {
        let r = raster();
        let mut surface = PixelBuffer::new(40, 40).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            r.paint_line(&mut frame, GridPoint::new(0, 0), GridPoint::new(10, 10), RED, 1.0);
        }
        surface.present().unwrap();
        let cells = painted_cells(&surface, 20);
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|&(x, y)| x.abs_diff(y) <= 1));
        assert!(!cells.contains(&(10, 10)));
    }

    #[test]
    fn parametric_line_samples_below_one() {
        let r = raster();
        let mut surface = PixelBuffer::new(40, 40).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            r.paint_parametric_line(
                &mut frame,
                GridPoint::new(0, 0),
                GridPoint::new(10, 0),
                RED,
                0.01,
            );
        }
        surface.present().unwrap();
        let cells = painted_cells(&surface, 20);
        assert_eq!(cells, (0..10).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn parametric_line_with_invalid_step_paints_nothing() {
        let r = raster();
        let mut surface = PixelBuffer::new(40, 40).unwrap();
        {
            let mut frame = surface.lock().unwrap();
            let (a, b) = (GridPoint::new(1, 1), GridPoint::new(5, 1));
            for step in [0.0, -1.0, f64::NAN] {
                r.paint_parametric_line(&mut frame, a, b, RED, step);
            }
        }
        surface.present().unwrap();
        assert!(painted_cells(&surface, 20).is_empty());
    }
}
