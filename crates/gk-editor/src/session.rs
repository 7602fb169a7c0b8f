//! The editor session: one curve, one tool state machine, one renderer.
//!
//! The loop is strictly sequential. Each iteration waits for one event,
//! applies it, then draws and presents a complete frame:
//!
//! ```text
//! EventSource ─▶ ToolStateMachine ─▶ Curve / hover / cursor
//!                                          │
//!                   Surface ◀─ FrameRenderer
//! ```

use crate::events::EventSource;
use crate::input::InputEvent;
use crate::tools::ToolStateMachine;
use gk_core::{ConfigError, Curve, CurveError, EditorConfig};
use gk_render::{FrameRenderer, FrameView, Surface, SurfaceError};
use std::ops::ControlFlow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub events: u64,
    pub frames: u64,
}

/// Owns all editor state. Hosts pass it by reference into the loop.
pub struct Editor {
    config: EditorConfig,
    curve: Curve,
    tools: ToolStateMachine,
    renderer: FrameRenderer,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        let mapper = config.validate()?;
        log::info!(
            "{}: {}x{} real, {}x{} virtual, scale {}x{}",
            config.title,
            config.real_width,
            config.real_height,
            config.virt_width,
            config.virt_height,
            mapper.scale_x(),
            mapper.scale_y()
        );
        Ok(Self {
            curve: Curve::with_max_points(config.max_points),
            tools: ToolStateMachine::new(&config, mapper),
            renderer: FrameRenderer::new(&config, mapper),
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn tools(&self) -> &ToolStateMachine {
        &self.tools
    }

    /// The state the next frame will show.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            curve: &self.curve,
            hover: self.tools.hover(),
            cursor: self.tools.cursor_overlay(),
        }
    }

    /// Apply one event. A full curve drops the event with a warning; only
    /// fatal curve errors end the session.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<(), EditorError> {
        match self.tools.handle(event, &mut self.curve) {
            Err(err) if !err.is_fatal() => {
                log::warn!("{err}, {event:?} ignored");
                Ok(())
            }
            result => Ok(result?),
        }
    }

    /// Draw the current state under the surface lock, then present it.
    pub fn render_to<S: Surface>(&self, surface: &mut S) -> Result<(), EditorError> {
        {
            let mut frame = surface.lock()?;
            self.renderer.render(&mut frame, &self.view());
        }
        surface.present()?;
        Ok(())
    }

    /// One loop iteration for an already received event.
    pub fn step<S: Surface>(
        &mut self,
        event: &InputEvent,
        surface: &mut S,
    ) -> Result<ControlFlow<()>, EditorError> {
        if *event == InputEvent::Quit {
            return Ok(ControlFlow::Break(()));
        }
        self.handle_event(event)?;
        self.render_to(surface)?;
        Ok(ControlFlow::Continue(()))
    }

    /// Run until the event source reports `Quit`.
    pub fn run<E, S>(&mut self, events: &mut E, surface: &mut S) -> Result<RunStats, EditorError>
    where
        E: EventSource,
        S: Surface,
    {
        if surface.width() != self.config.real_width || surface.height() != self.config.real_height
        {
            log::warn!(
                "surface is {}x{}, config expects {}x{}; cells are clipped to the surface",
                surface.width(),
                surface.height(),
                self.config.real_width,
                self.config.real_height
            );
        }

        let mut stats = RunStats::default();
        loop {
            let event = events.wait_next();
            stats.events += 1;
            if self.step(&event, surface)?.is_break() {
                break;
            }
            stats.frames += 1;
        }
        log::info!(
            "editor loop ended after {} events, {} frames",
            stats.events,
            stats.frames
        );
        Ok(stats)
    }
}
