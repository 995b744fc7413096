// miniglut/src/lifecycle.rs
//
//! The lifecycle bridge: turns platform commands and input into engine state changes.

use crate::backend::EglBackend;
use crate::context::{ContextAttributes, ContextManager};
use crate::event::{Command, EventResponse, InputEvent, PlatformEvent};
use crate::sensor::{Accelerometer, SensorQueue};
use crate::Error;

use std::mem;

/// The last pointer position, preserved across activity restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SavedState {
    pub x: i32,
    pub y: i32,
}

impl SavedState {
    /// Size of the serialized form: `x` then `y`, native-endian.
    pub const SIZE: usize = 8;

    pub fn to_bytes(&self) -> [u8; SavedState::SIZE] {
        let mut bytes = [0; SavedState::SIZE];
        bytes[0..4].copy_from_slice(&self.x.to_ne_bytes());
        bytes[4..8].copy_from_slice(&self.y.to_ne_bytes());
        bytes
    }

    /// Returns `None` if `bytes` is too short to hold a saved state.
    pub fn from_bytes(bytes: &[u8]) -> Option<SavedState> {
        if bytes.len() < SavedState::SIZE {
            return None;
        }
        let x = i32::from_ne_bytes(bytes[0..4].try_into().ok()?);
        let y = i32::from_ne_bytes(bytes[4..8].try_into().ok()?);
        Some(SavedState { x, y })
    }
}

/// Whether the main loop should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    /// The window (or the whole activity) is gone. GLUT has no way to tell the program that
    /// its context was lost, so the session ends; teardown happens after the loop exits.
    Terminating,
}

/// Progress of the window's context creation.
#[derive(Debug)]
pub enum WindowStatus {
    /// No window has been delivered yet.
    Pending,
    /// The context exists and is current.
    Ready,
    /// Creating the context failed.
    Failed(Error),
}

/// The engine state shared by every event handler and the main loop.
pub struct Engine<E, Q> where E: EglBackend, Q: SensorQueue {
    contexts: ContextManager<E>,
    accelerometer: Option<Accelerometer<Q>>,
    attributes: ContextAttributes,
    saved_state: SavedState,
    lifecycle: LifecycleState,
    window: WindowStatus,
}

impl<E, Q> Engine<E, Q> where E: EglBackend, Q: SensorQueue {
    pub fn new(contexts: ContextManager<E>, accelerometer: Option<Accelerometer<Q>>)
               -> Engine<E, Q> {
        Engine {
            contexts,
            accelerometer,
            attributes: ContextAttributes::default(),
            saved_state: SavedState::default(),
            lifecycle: LifecycleState::Running,
            window: WindowStatus::Pending,
        }
    }

    #[inline]
    pub fn contexts(&self) -> &ContextManager<E> {
        &self.contexts
    }

    /// True once a display, surface and context exist.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.contexts.is_initialized()
    }

    #[inline]
    pub fn saved_state(&self) -> SavedState {
        self.saved_state
    }

    #[inline]
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle
    }

    #[inline]
    pub fn window_status(&self) -> &WindowStatus {
        &self.window
    }

    /// Sets the attributes used when the window's context gets created.
    #[inline]
    pub fn set_context_attributes(&mut self, attributes: ContextAttributes) {
        self.attributes = attributes;
    }

    /// Restores the pointer position preserved by a previous instance of the activity.
    pub fn restore_saved_state(&mut self, bytes: &[u8]) {
        match SavedState::from_bytes(bytes) {
            Some(saved_state) => {
                debug!("Restored saved state {:?}", saved_state);
                self.saved_state = saved_state;
            }
            None => warn!("Ignoring a {}-byte saved state", bytes.len()),
        }
    }

    /// Takes the failure recorded by the last context creation, leaving the window pending.
    pub(crate) fn take_window_failure(&mut self) -> Option<Error> {
        match mem::replace(&mut self.window, WindowStatus::Pending) {
            WindowStatus::Failed(err) => Some(err),
            status => {
                self.window = status;
                None
            }
        }
    }

    pub fn dispatch(&mut self, event: PlatformEvent) -> EventResponse {
        match event {
            PlatformEvent::Command(command) => self.handle_command(command),
            PlatformEvent::Input(input) => self.handle_input(input),
        }
    }

    pub fn handle_command(&mut self, command: Command) -> EventResponse {
        match command {
            Command::SaveState => {
                debug!("Saving state {:?}", self.saved_state);
                return EventResponse::SaveState(self.saved_state);
            }
            Command::WindowCreated(None) => {
                debug!("Window created without a native window attached");
            }
            Command::WindowCreated(Some(window)) => {
                match self.contexts.create_context(window, &self.attributes) {
                    Ok(_) => self.window = WindowStatus::Ready,
                    Err(Error::WindowAlreadyExists) => {}
                    Err(err) => {
                        warn!("Couldn't create the window context: {:?}", err);
                        self.window = WindowStatus::Failed(err);
                    }
                }
            }
            Command::WindowDestroyed => {
                // The context is torn down after the main loop exits, not here.
                info!("Window destroyed; ending the session");
                self.lifecycle = LifecycleState::Terminating;
            }
            Command::DestroyRequested => {
                info!("Activity destroy requested; ending the session");
                self.lifecycle = LifecycleState::Terminating;
            }
            Command::FocusGained => {
                if let Some(ref mut accelerometer) = self.accelerometer {
                    if let Err(err) = accelerometer.start() {
                        warn!("Couldn't enable the accelerometer: {:?}", err);
                    }
                }
            }
            Command::FocusLost => {
                if let Some(ref mut accelerometer) = self.accelerometer {
                    if let Err(err) = accelerometer.stop() {
                        warn!("Couldn't disable the accelerometer: {:?}", err);
                    }
                }
            }
        }
        EventResponse::Handled
    }

    pub fn handle_input(&mut self, input: InputEvent) -> EventResponse {
        match input {
            InputEvent::Motion { x, y } => {
                self.saved_state = SavedState { x: x as i32, y: y as i32 };
                EventResponse::Handled
            }
            InputEvent::Other => EventResponse::Unhandled,
        }
    }

    /// Tears down the window's context. The window status goes back to `Pending`.
    pub fn destroy_context(&mut self) {
        self.contexts.destroy_context();
        if let WindowStatus::Ready = self.window {
            self.window = WindowStatus::Pending;
        }
    }

    /// Discards pending accelerometer samples.
    pub(crate) fn drain_sensors(&mut self) {
        if let Some(ref mut accelerometer) = self.accelerometer {
            accelerometer.drain();
        }
    }
}
