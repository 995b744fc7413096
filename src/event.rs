// miniglut/src/event.rs
//
//! Events delivered by the platform, and the source that polls them.

use crate::lifecycle::SavedState;
use crate::window::NativeWindow;

use std::time::Duration;

/// A lifecycle notification from the platform to the application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// The platform wants the application state preserved.
    SaveState,
    /// A window is ready for rendering. Carries the window the platform currently holds.
    WindowCreated(Option<NativeWindow>),
    /// The window is being hidden or closed.
    WindowDestroyed,
    FocusGained,
    FocusLost,
    /// The activity itself is being destroyed.
    DestroyRequested,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A touch or pointer motion. Coordinates are those of the first pointer, in pixels.
    Motion { x: f32, y: f32 },
    /// Any other input, which the shim does not consume.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformEvent {
    Command(Command),
    Input(InputEvent),
}

/// The application's answer to a platform event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventResponse {
    /// The event was consumed.
    Handled,
    /// The event was not consumed; the platform may apply its default handling.
    Unhandled,
    /// Answer to `Command::SaveState`: the snapshot to persist.
    SaveState(SavedState),
}

/// A queue of platform events.
pub trait EventSource {
    /// Waits at most `timeout` for an event, then dispatches every pending event to `handler`
    /// and returns. A zero timeout never blocks.
    fn poll_events(&mut self,
                   timeout: Duration,
                   handler: &mut dyn FnMut(PlatformEvent) -> EventResponse);

    /// The state the platform preserved from a previous instance of the activity.
    fn saved_state(&self) -> Option<Vec<u8>>;
}
