//! A minimal GLUT-style windowing shim for OpenGL ES.
//!
//! `miniglut` lets tutorial-sized OpenGL ES programs written against the classic GLUT shape
//! (`init`, `create_window`, `display_func`, `idle_func`, `main_loop`) run inside an Android
//! native activity. It turns the activity's lifecycle and input events into a single-threaded
//! polling loop and manages the EGL display, surface and context bound to the native window.
//!
//! Only one window, three callbacks and a couple of queries are supported. Resizing and
//! orientation changes are not handled.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod platform;

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod backend;
pub use crate::backend::{ConfigHandle, ContextHandle, DisplayHandle, EglBackend, SurfaceHandle};

mod callbacks;
pub use crate::callbacks::{CallbackRegistry, DisplayCallback, IdleCallback, ReshapeCallback};

mod context;
pub use crate::context::{ContextAttributeFlags, ContextAttributes, ContextManager};
pub use crate::context::{DisplayMode, RenderContext};

mod event;
pub use crate::event::{Command, EventResponse, EventSource, InputEvent, PlatformEvent};

mod glut;
pub use crate::glut::{Glut, GlutConfig, GlutQuery, ReshapeSize, WindowID};

mod info;
pub use crate::info::GLVersion;

mod lifecycle;
pub use crate::lifecycle::{Engine, LifecycleState, SavedState, WindowStatus};

mod sensor;
pub use crate::sensor::{Accelerometer, SensorQueue, ACCELEROMETER_EVENT_INTERVAL};

pub mod shader;

mod window;
pub use crate::window::{Frame, NativeWindow, Window};

#[allow(non_camel_case_types, dead_code, clippy::all)]
pub(crate) mod egl {
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

#[cfg(test)]
mod tests;
