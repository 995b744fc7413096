// miniglut/src/window.rs
//
//! The native window handle and the view of the window handed to callbacks.

use crate::backend::EglBackend;
use crate::context::ContextManager;
use crate::Error;

use euclid::default::Size2D;
use std::os::raw::c_void;
use std::ptr::NonNull;
use std::time::{Duration, Instant};

/// An Android `ANativeWindow`, borrowed from the platform.
///
/// The platform keeps ownership; the handle stays valid until the platform reports that the
/// window is being destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeWindow(NonNull<c_void>);

impl NativeWindow {
    /// Wraps a raw `ANativeWindow` pointer. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// The pointer must refer to a live native window for as long as the handle is used.
    #[inline]
    pub unsafe fn from_ptr(raw: *mut c_void) -> Option<NativeWindow> {
        NonNull::new(raw).map(NativeWindow)
    }

    /// Returns the raw `ANativeWindow` pointer.
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Creates a native window from a `raw_window_handle::RawWindowHandle`.
    ///
    /// # Safety
    ///
    /// The handle must refer to a live native window for as long as the result is used.
    #[cfg(feature = "mg-raw-window-handle-06")]
    pub unsafe fn from_rwh(raw_handle: rwh_06::RawWindowHandle) -> Result<NativeWindow, Error> {
        use rwh_06::RawWindowHandle::AndroidNdk;

        match raw_handle {
            AndroidNdk(handle) => Ok(NativeWindow(handle.a_native_window)),
            _ => Err(Error::IncompatibleNativeWidget),
        }
    }
}

/// What a display, idle or reshape callback can do with the window.
pub trait Window {
    /// Presents the back buffer (`glutSwapBuffers`).
    fn swap_buffers(&self) -> Result<(), Error>;

    /// Time since `Glut::init` (`glutGet(GLUT_ELAPSED_TIME)`).
    fn elapsed_time(&self) -> Duration;

    /// The drawable size queried when the context was created. `None` without a context.
    fn drawable_size(&self) -> Option<Size2D<i32>>;

    /// Looks up an OpenGL ES entry point, for loaders such as `glow`.
    fn get_proc_address(&self, symbol_name: &str) -> *const c_void;
}

/// The window as seen from inside the main loop.
pub struct Frame<'a, E> where E: EglBackend {
    pub(crate) contexts: &'a ContextManager<E>,
    pub(crate) start_time: Instant,
}

impl<'a, E> Window for Frame<'a, E> where E: EglBackend {
    #[inline]
    fn swap_buffers(&self) -> Result<(), Error> {
        self.contexts.swap_buffers()
    }

    #[inline]
    fn elapsed_time(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[inline]
    fn drawable_size(&self) -> Option<Size2D<i32>> {
        self.contexts.drawable_size()
    }

    #[inline]
    fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        self.contexts.get_proc_address(symbol_name)
    }
}
