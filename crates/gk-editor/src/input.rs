//! Input abstraction layer.
//!
//! Hosts translate their platform events into `InputEvent`s. Pointer
//! coordinates are real framebuffer pixels; the tool state machine maps
//! them to the virtual grid.

use serde::{Deserialize, Serialize};

/// A normalized input event.
///
/// Serialized with an internal `"type"` tag, so a recorded session is a
/// JSON array such as `[{"type": "pointer_down", "x": 20, "y": 20}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Window closed; ends the editor loop.
    Quit,

    /// Pointer pressed.
    PointerDown { x: i32, y: i32 },

    /// Pointer released.
    PointerUp,

    /// Pointer moved.
    PointerMove { x: i32, y: i32 },

    /// Wheel turned. Positive is away from the user (up).
    WheelScroll { delta: i32 },
}

impl InputEvent {
    /// Decode a recorded event script (a JSON array of events).
    pub fn parse_script(text: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
        serde_json::from_str(text)
    }
}
