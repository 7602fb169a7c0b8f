//! Tool state machine for canvas interactions.
//!
//! Translates input events into edits of the [`Curve`] and tracks which
//! point is hovered.
//!
//! | Event | Placing | Dragging |
//! |-------|---------|----------|
//! | **PointerDown** | hover set → Dragging; else append a point | ignored |
//! | **PointerUp** | ignored | → Placing |
//! | **PointerMove** | recompute hover | move the hovered point |
//! | **WheelScroll** | resize the hovered point | resize the hovered point |
//!
//! Every positioned event updates the cursor, clamped to the virtual grid.

use crate::input::InputEvent;
use gk_core::{
    ControlPoint, CoordinateMapper, Curve, CurveError, EditorConfig, GridPoint, PointHandle,
    SizeMode, VirtualBounds,
};
use gk_render::{HitTolerance, hit_test};

/// The active interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Clicking empty space appends a point.
    #[default]
    Placing,
    /// The hovered point follows the pointer.
    Dragging,
}

/// Wheel resize steps and the floor they stop at.
#[derive(Debug, Clone, Copy)]
struct WheelSteps {
    grow: f32,
    shrink: f32,
    min: f32,
}

pub struct ToolStateMachine {
    state: ToolState,
    /// Point under the pointer. Always a handle into the live curve.
    hover: Option<PointHandle>,
    /// Last clamped pointer position.
    cursor: GridPoint,
    mapper: CoordinateMapper,
    bounds: VirtualBounds,
    tolerance: HitTolerance,
    size_mode: SizeMode,
    new_point_size: f32,
    wheel: WheelSteps,
}

impl ToolStateMachine {
    pub fn new(config: &EditorConfig, mapper: CoordinateMapper) -> Self {
        Self {
            state: ToolState::Placing,
            hover: None,
            cursor: GridPoint::default(),
            mapper,
            bounds: config.virtual_bounds(),
            tolerance: HitTolerance::new(config.hit_window, &mapper),
            size_mode: config.size_mode,
            new_point_size: config.default_point_size,
            wheel: WheelSteps {
                grow: config.wheel_grow_step,
                shrink: config.wheel_shrink_step,
                min: config.min_point_size,
            },
        }
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn hover(&self) -> Option<PointHandle> {
        self.hover
    }

    pub fn cursor(&self) -> GridPoint {
        self.cursor
    }

    /// Cursor cross to draw, hidden while dragging.
    pub fn cursor_overlay(&self) -> Option<GridPoint> {
        match self.state {
            ToolState::Placing => Some(self.cursor),
            ToolState::Dragging => None,
        }
    }

    /// Handle one event, editing `curve` in place.
    ///
    /// A failed append leaves the state unchanged and returns the error;
    /// the caller decides whether it is fatal.
    pub fn handle(&mut self, event: &InputEvent, curve: &mut Curve) -> Result<(), CurveError> {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y, curve)?,
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y, curve),
            InputEvent::WheelScroll { delta } => self.wheel(delta, curve),
            InputEvent::Quit => {}
        }
        Ok(())
    }

    fn clamped(&self, real_x: i32, real_y: i32) -> GridPoint {
        self.bounds.clamp(self.mapper.to_virtual(real_x, real_y))
    }

    fn pointer_down(&mut self, x: i32, y: i32, curve: &mut Curve) -> Result<(), CurveError> {
        if self.hover.is_some() {
            // Click on a point starts a drag; nothing is appended.
            self.state = ToolState::Dragging;
            log::debug!("drag start on {:?}", self.hover);
            return Ok(());
        }
        if self.state != ToolState::Placing {
            return Ok(());
        }

        let pos = self.clamped(x, y);
        curve.append(ControlPoint::new(pos.x, pos.y, self.new_point_size))?;
        // The store changed; hover is recomputed from it.
        self.hover = hit_test(curve, pos, self.tolerance);
        Ok(())
    }

    fn pointer_up(&mut self) {
        if self.state == ToolState::Dragging {
            self.state = ToolState::Placing;
            log::debug!("drag end on {:?}", self.hover);
        }
    }

    fn pointer_move(&mut self, x: i32, y: i32, curve: &mut Curve) {
        let pos = self.clamped(x, y);
        let dragged = match (self.state, self.hover) {
            (ToolState::Dragging, Some(handle)) => curve.get_mut(handle),
            _ => None,
        };
        match dragged {
            Some(point) => {
                point.x = pos.x;
                point.y = pos.y;
            }
            None => self.hover = hit_test(curve, pos, self.tolerance),
        }
        self.cursor = pos;
    }

    fn wheel(&mut self, delta: i32, curve: &mut Curve) {
        if self.size_mode == SizeMode::Fixed {
            return;
        }
        let Some(point) = self.hover.and_then(|h| curve.get_mut(h)) else {
            return;
        };
        // Growing and shrinking use different step sizes.
        if delta > 0 {
            point.size += self.wheel.grow;
        } else if delta < 0 {
            point.size = (point.size - self.wheel.shrink).max(self.wheel.min);
        }
        log::debug!("resize {:?} to {}", self.hover, point.size);
    }
}
