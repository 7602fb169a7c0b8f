//! Event sources.
//!
//! The editor loop blocks on [`EventSource::wait_next`]; that call is its
//! only suspension point.

use crate::input::InputEvent;
use std::sync::mpsc::{self, Receiver, Sender};

/// Blocking queue of input events.
pub trait EventSource {
    /// Block until the next event is available.
    fn wait_next(&mut self) -> InputEvent;
}

/// Replays a fixed sequence of events, then reports `Quit` forever.
pub struct ScriptedEvents<I> {
    events: I,
}

impl<I> ScriptedEvents<I>
where
    I: Iterator<Item = InputEvent>,
{
    pub fn new(events: impl IntoIterator<IntoIter = I, Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl<I> EventSource for ScriptedEvents<I>
where
    I: Iterator<Item = InputEvent>,
{
    fn wait_next(&mut self) -> InputEvent {
        self.events.next().unwrap_or(InputEvent::Quit)
    }
}

/// Events delivered from another thread over a channel.
///
/// Dropping every sender ends the stream with `Quit`.
pub struct ChannelEvents {
    rx: Receiver<InputEvent>,
}

impl ChannelEvents {
    pub fn new() -> (Sender<InputEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl EventSource for ChannelEvents {
    fn wait_next(&mut self) -> InputEvent {
        self.rx.recv().unwrap_or_else(|_| {
            log::debug!("event channel closed");
            InputEvent::Quit
        })
    }
}
