pub mod events;
pub mod input;
pub mod session;
pub mod tools;

pub use events::{ChannelEvents, EventSource, ScriptedEvents};
pub use input::InputEvent;
pub use session::{Editor, EditorError, RunStats};
pub use tools::{ToolState, ToolStateMachine};
