// miniglut/src/backend.rs
//
//! The EGL entry points the context manager is written against.
//!
//! `platform::egl::EglLibrary` forwards these to the system `libEGL`. Handles are plain copies
//! of the EGL pointers; ownership rules are enforced by `ContextManager`, not by the handles.

use crate::window::NativeWindow;
use crate::Error;

use std::os::raw::c_void;

macro_rules! egl_handle {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name(*const c_void);

        impl $name {
            /// Wraps a raw EGL handle.
            #[inline]
            pub fn from_raw(raw: *const c_void) -> $name {
                $name(raw)
            }

            /// Returns the raw EGL handle.
            #[inline]
            pub fn as_raw(self) -> *const c_void {
                self.0
            }

            /// Returns true if this is the EGL "no object" value.
            #[inline]
            pub fn is_none(self) -> bool {
                self.0.is_null()
            }
        }
    };
}

egl_handle! {
    /// An `EGLDisplay`.
    DisplayHandle
}
egl_handle! {
    /// An `EGLConfig`.
    ConfigHandle
}
egl_handle! {
    /// An `EGLSurface`.
    SurfaceHandle
}
egl_handle! {
    /// An `EGLContext`.
    ContextHandle
}

/// The subset of EGL needed to put an OpenGL ES context on a native window.
///
/// Attribute lists are `EGL_NONE`-terminated, exactly as EGL expects them.
pub trait EglBackend {
    /// `eglGetDisplay(EGL_DEFAULT_DISPLAY)` followed by `eglInitialize`.
    fn initialize_default_display(&self) -> Result<DisplayHandle, Error>;

    /// Returns every config matching `attributes`, best match first.
    fn choose_configs(&self, display: DisplayHandle, attributes: &[i32])
                      -> Result<Vec<ConfigHandle>, Error>;

    fn config_attrib(&self, display: DisplayHandle, config: ConfigHandle, attribute: i32)
                     -> Result<i32, Error>;

    /// Reconfigures the window buffers to the given native visual format, keeping the
    /// window's own size.
    fn set_window_buffers_format(&self, window: NativeWindow, format: i32) -> Result<(), Error>;

    fn create_window_surface(&self,
                             display: DisplayHandle,
                             config: ConfigHandle,
                             window: NativeWindow)
                             -> Result<SurfaceHandle, Error>;

    fn create_context(&self, display: DisplayHandle, config: ConfigHandle, attributes: &[i32])
                      -> Result<ContextHandle, Error>;

    /// Binds `surface` as both draw and read surface. `None` for both unbinds.
    fn make_current(&self,
                    display: DisplayHandle,
                    surface: Option<SurfaceHandle>,
                    context: Option<ContextHandle>)
                    -> Result<(), Error>;

    fn query_surface(&self, display: DisplayHandle, surface: SurfaceHandle, attribute: i32)
                     -> Result<i32, Error>;

    fn swap_buffers(&self, display: DisplayHandle, surface: SurfaceHandle) -> Result<(), Error>;

    fn destroy_context(&self, display: DisplayHandle, context: ContextHandle)
                       -> Result<(), Error>;

    fn destroy_surface(&self, display: DisplayHandle, surface: SurfaceHandle)
                       -> Result<(), Error>;

    fn terminate(&self, display: DisplayHandle) -> Result<(), Error>;

    /// Looks up an OpenGL ES entry point. Returns null if the symbol is unknown.
    fn get_proc_address(&self, symbol_name: &str) -> *const c_void;
}
