// miniglut/src/platform/android/events.rs
//
//! Platform events of an `android-activity` native activity.

use crate::event::{Command, EventResponse, EventSource, InputEvent, PlatformEvent};
use crate::window::NativeWindow;

use android_activity::input::{InputEvent as AndroidInputEvent, MotionEvent};
use android_activity::{AndroidApp, InputStatus, MainEvent, PollEvent};
use std::os::raw::c_void;
use std::time::Duration;

// Lifecycle events that are dispatched once `AndroidApp::poll_events` has returned.
enum Deferred {
    Command(Command),
    WindowCreated,
    InputAvailable,
}

/// Polls the activity's looper and translates its events.
pub struct AndroidEvents {
    app: AndroidApp,
    // Keeps the window acquired while the context renders to it.
    window: Option<ndk::native_window::NativeWindow>,
}

impl AndroidEvents {
    #[inline]
    pub fn new(app: AndroidApp) -> AndroidEvents {
        AndroidEvents { app, window: None }
    }

    fn dispatch_input(&self, handler: &mut dyn FnMut(PlatformEvent) -> EventResponse) {
        let mut events = match self.app.input_events_iter() {
            Ok(events) => events,
            Err(err) => {
                warn!("Couldn't read input events: {:?}", err);
                return;
            }
        };

        loop {
            let read = events.next(|event| {
                let input = match event {
                    AndroidInputEvent::MotionEvent(motion_event) => first_pointer(motion_event),
                    _ => InputEvent::Other,
                };
                match handler(PlatformEvent::Input(input)) {
                    EventResponse::Handled => InputStatus::Handled,
                    _ => InputStatus::Unhandled,
                }
            });
            if !read {
                break;
            }
        }
    }
}

fn first_pointer(motion_event: &MotionEvent) -> InputEvent {
    if motion_event.pointer_count() == 0 {
        return InputEvent::Other;
    }
    let pointer = motion_event.pointer_at_index(0);
    InputEvent::Motion { x: pointer.x(), y: pointer.y() }
}

impl EventSource for AndroidEvents {
    fn poll_events(&mut self,
                   timeout: Duration,
                   handler: &mut dyn FnMut(PlatformEvent) -> EventResponse) {
        let mut timeout = timeout;
        loop {
            let mut deferred = vec![];
            let mut received = false;

            self.app.poll_events(Some(timeout), |event| {
                let main_event = match event {
                    PollEvent::Main(main_event) => main_event,
                    _ => return,
                };
                received = true;
                match main_event {
                    // The saver is only valid during this callback.
                    MainEvent::SaveState { saver, .. } => {
                        let save = PlatformEvent::Command(Command::SaveState);
                        if let EventResponse::SaveState(state) = handler(save) {
                            saver.store(&state.to_bytes());
                        }
                    }
                    MainEvent::InitWindow { .. } => deferred.push(Deferred::WindowCreated),
                    MainEvent::TerminateWindow { .. } => {
                        deferred.push(Deferred::Command(Command::WindowDestroyed))
                    }
                    MainEvent::GainedFocus => deferred.push(Deferred::Command(Command::FocusGained)),
                    MainEvent::LostFocus => deferred.push(Deferred::Command(Command::FocusLost)),
                    MainEvent::Destroy => {
                        deferred.push(Deferred::Command(Command::DestroyRequested))
                    }
                    MainEvent::InputAvailable => deferred.push(Deferred::InputAvailable),
                    _ => {}
                }
            });

            for event in deferred {
                match event {
                    Deferred::Command(command) => {
                        handler(PlatformEvent::Command(command));
                    }
                    Deferred::WindowCreated => {
                        self.window = self.app.native_window();
                        let window = self.window.as_ref().and_then(|window| unsafe {
                            NativeWindow::from_ptr(window.ptr().as_ptr() as *mut c_void)
                        });
                        handler(PlatformEvent::Command(Command::WindowCreated(window)));
                    }
                    Deferred::InputAvailable => self.dispatch_input(handler),
                }
            }

            // Keep going without blocking until the queue is empty.
            if !received {
                break;
            }
            timeout = Duration::ZERO;
        }
    }

    fn saved_state(&self) -> Option<Vec<u8>> {
        self.app.saved_state()
    }
}
