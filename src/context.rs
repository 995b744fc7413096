// miniglut/src/context.rs
//
//! The context manager: the EGL display, window surface and OpenGL ES context of the one
//! window.

use crate::backend::{ConfigHandle, ContextHandle, DisplayHandle, EglBackend, SurfaceHandle};
use crate::egl;
use crate::egl::types::EGLint;
use crate::info::GLVersion;
use crate::window::NativeWindow;
use crate::Error;

use euclid::default::Size2D;
use std::os::raw::c_void;

const RGB_CHANNEL_BIT_DEPTH: EGLint = 8;

bitflags! {
    /// The GLUT display mode bits (`GLUT_DOUBLE`, `GLUT_DEPTH`, ...).
    ///
    /// Only `ALPHA`, `DEPTH` and `STENCIL` influence the framebuffer configuration. Window
    /// surfaces on Android are always double-buffered.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DisplayMode: u32 {
        const INDEX       = 0x0001;
        const DOUBLE      = 0x0002;
        const ACCUM       = 0x0004;
        const ALPHA       = 0x0008;
        const DEPTH       = 0x0010;
        const STENCIL     = 0x0020;
        const MULTISAMPLE = 0x0080;
        const STEREO      = 0x0100;
        const LUMINANCE   = 0x0200;
    }
}

impl DisplayMode {
    pub const RGB: DisplayMode = DisplayMode::empty();
    pub const RGBA: DisplayMode = DisplayMode::empty();
    pub const SINGLE: DisplayMode = DisplayMode::empty();
}

impl Default for DisplayMode {
    /// `GLUT_RGB | GLUT_SINGLE`, GLUT's own default.
    #[inline]
    fn default() -> DisplayMode {
        DisplayMode::RGB | DisplayMode::SINGLE
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ContextAttributeFlags: u8 {
        const ALPHA   = 0x01;
        const DEPTH   = 0x02;
        const STENCIL = 0x04;
    }
}

/// What to ask EGL for when the window's context is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextAttributes {
    pub version: GLVersion,
    pub flags: ContextAttributeFlags,
}

impl ContextAttributes {
    pub fn from_display_mode(display_mode: DisplayMode, version: GLVersion) -> ContextAttributes {
        let mut flags = ContextAttributeFlags::empty();
        flags.set(ContextAttributeFlags::ALPHA, display_mode.contains(DisplayMode::ALPHA));
        flags.set(ContextAttributeFlags::DEPTH, display_mode.contains(DisplayMode::DEPTH));
        flags.set(ContextAttributeFlags::STENCIL, display_mode.contains(DisplayMode::STENCIL));
        ContextAttributes { version, flags }
    }

    /// The `EGL_NONE`-terminated list passed to `eglChooseConfig`.
    pub(crate) fn config_attributes(&self) -> Vec<EGLint> {
        let flags = self.flags;
        let alpha_size   = if flags.contains(ContextAttributeFlags::ALPHA)   { 8  } else { 0 };
        let depth_size   = if flags.contains(ContextAttributeFlags::DEPTH)   { 24 } else { 0 };
        let stencil_size = if flags.contains(ContextAttributeFlags::STENCIL) { 8  } else { 0 };
        let renderable_type = if self.version.major >= 3 {
            egl::OPENGL_ES3_BIT
        } else {
            egl::OPENGL_ES2_BIT
        };

        vec![
            egl::SURFACE_TYPE as EGLint,    egl::WINDOW_BIT as EGLint,
            egl::BLUE_SIZE as EGLint,       RGB_CHANNEL_BIT_DEPTH,
            egl::GREEN_SIZE as EGLint,      RGB_CHANNEL_BIT_DEPTH,
            egl::RED_SIZE as EGLint,        RGB_CHANNEL_BIT_DEPTH,
            egl::RENDERABLE_TYPE as EGLint, renderable_type as EGLint,
            egl::ALPHA_SIZE as EGLint,      alpha_size,
            egl::DEPTH_SIZE as EGLint,      depth_size,
            egl::STENCIL_SIZE as EGLint,    stencil_size,
            egl::NONE as EGLint,
        ]
    }

    /// The `EGL_NONE`-terminated list passed to `eglCreateContext`.
    pub(crate) fn context_attributes(&self) -> Vec<EGLint> {
        vec![
            egl::CONTEXT_CLIENT_VERSION as EGLint, self.version.major as EGLint,
            egl::NONE as EGLint,
        ]
    }
}

impl Default for ContextAttributes {
    #[inline]
    fn default() -> ContextAttributes {
        ContextAttributes::from_display_mode(DisplayMode::default(), GLVersion::default())
    }
}

/// The live EGL objects of the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    display: DisplayHandle,
    config: ConfigHandle,
    surface: SurfaceHandle,
    context: ContextHandle,
    size: Size2D<i32>,
}

impl RenderContext {
    #[inline]
    pub fn display(&self) -> DisplayHandle {
        self.display
    }

    #[inline]
    pub fn config(&self) -> ConfigHandle {
        self.config
    }

    #[inline]
    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    #[inline]
    pub fn context(&self) -> ContextHandle {
        self.context
    }

    /// The drawable size queried right after the context was made current.
    #[inline]
    pub fn size(&self) -> Size2D<i32> {
        self.size
    }
}

/// Owns the EGL display, surface and context of the window.
///
/// The resources exist if and only if `is_initialized()` returns true. No viewport is set on
/// creation; callers pick one from `drawable_size()` or their own assumptions.
pub struct ContextManager<E> where E: EglBackend {
    egl: E,
    current: Option<RenderContext>,
}

impl<E> ContextManager<E> where E: EglBackend {
    #[inline]
    pub fn new(egl: E) -> ContextManager<E> {
        ContextManager { egl, current: None }
    }

    #[inline]
    pub fn backend(&self) -> &E {
        &self.egl
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    #[inline]
    pub fn render_context(&self) -> Option<RenderContext> {
        self.current
    }

    #[inline]
    pub fn drawable_size(&self) -> Option<Size2D<i32>> {
        self.current.map(|current| current.size)
    }

    /// Creates a display, window surface and context for `window` and makes the context
    /// current on the calling thread.
    ///
    /// Fails with `WindowAlreadyExists`, leaving the live objects untouched, if a context
    /// already exists. On any other failure nothing is left allocated.
    pub fn create_context(&mut self, window: NativeWindow, attributes: &ContextAttributes)
                          -> Result<RenderContext, Error> {
        if self.current.is_some() {
            warn!("A window context already exists; refusing to create another");
            return Err(Error::WindowAlreadyExists);
        }

        let display = self.egl.initialize_default_display()?;
        match self.create_context_on_display(display, window, attributes) {
            Ok(render_context) => {
                info!("Created OpenGL ES {}.{} context, drawable size {}x{}",
                      attributes.version.major,
                      attributes.version.minor,
                      render_context.size.width,
                      render_context.size.height);
                self.current = Some(render_context);
                Ok(render_context)
            }
            Err(err) => {
                if let Err(terminate_err) = self.egl.terminate(display) {
                    warn!("eglTerminate failed after a failed context creation: {:?}",
                          terminate_err);
                }
                Err(err)
            }
        }
    }

    fn create_context_on_display(&self,
                                 display: DisplayHandle,
                                 window: NativeWindow,
                                 attributes: &ContextAttributes)
                                 -> Result<RenderContext, Error> {
        let config = self.choose_config(display, attributes)?;

        // EGL_NATIVE_VISUAL_ID is guaranteed to be accepted by
        // ANativeWindow_setBuffersGeometry().
        let format = self.egl.config_attrib(display, config, egl::NATIVE_VISUAL_ID as EGLint)?;
        self.egl.set_window_buffers_format(window, format)?;

        let surface = self.egl.create_window_surface(display, config, window)?;
        let context = match self.egl.create_context(display,
                                                    config,
                                                    &attributes.context_attributes()) {
            Ok(context) => context,
            Err(err) => {
                self.release(display, surface, None);
                return Err(err);
            }
        };

        match self.activate(display, surface, context) {
            Ok(size) => Ok(RenderContext { display, config, surface, context, size }),
            Err(err) => {
                self.release(display, surface, Some(context));
                Err(err)
            }
        }
    }

    // Picks the first config whose color channels are exactly 8 bits wide. Drivers are free
    // to return deeper configs first.
    fn choose_config(&self, display: DisplayHandle, attributes: &ContextAttributes)
                     -> Result<ConfigHandle, Error> {
        let configs = self.egl.choose_configs(display, &attributes.config_attributes())?;
        let required_config_attributes = [
            egl::RED_SIZE as EGLint,
            egl::GREEN_SIZE as EGLint,
            egl::BLUE_SIZE as EGLint,
        ];

        for config in configs {
            let mut matches = true;
            for &attribute in &required_config_attributes {
                if self.egl.config_attrib(display, config, attribute)? != RGB_CHANNEL_BIT_DEPTH {
                    matches = false;
                    break;
                }
            }
            if matches {
                return Ok(config);
            }
        }

        Err(Error::NoPixelFormatFound)
    }

    fn activate(&self, display: DisplayHandle, surface: SurfaceHandle, context: ContextHandle)
                -> Result<Size2D<i32>, Error> {
        if let Err(err) = self.egl.make_current(display, Some(surface), Some(context)) {
            warn!("Unable to eglMakeCurrent: {:?}", err);
            return Err(err);
        }

        let width = self.egl.query_surface(display, surface, egl::WIDTH as EGLint)?;
        let height = self.egl.query_surface(display, surface, egl::HEIGHT as EGLint)?;
        if width <= 0 || height <= 0 {
            warn!("Window surface reported an empty drawable ({}x{})", width, height);
            return Err(Error::EmptyDrawable);
        }

        Ok(Size2D::new(width, height))
    }

    // Releases objects of a half-built context. The display is terminated by the caller.
    fn release(&self, display: DisplayHandle, surface: SurfaceHandle, context: Option<ContextHandle>) {
        if let Err(err) = self.egl.make_current(display, None, None) {
            debug!("Unbinding a half-built context failed: {:?}", err);
        }
        if let Some(context) = context {
            if let Err(err) = self.egl.destroy_context(display, context) {
                warn!("eglDestroyContext failed: {:?}", err);
            }
        }
        if let Err(err) = self.egl.destroy_surface(display, surface) {
            warn!("eglDestroySurface failed: {:?}", err);
        }
    }

    /// Unbinds and destroys the context and surface and terminates the display.
    ///
    /// Safe to call any number of times, with or without a live context. Failures of the
    /// individual EGL calls are logged; the objects are forgotten regardless.
    pub fn destroy_context(&mut self) {
        let current = match self.current.take() {
            None => return,
            Some(current) => current,
        };

        if let Err(err) = self.egl.make_current(current.display, None, None) {
            warn!("Unable to unbind the context before destroying it: {:?}", err);
        }
        if let Err(err) = self.egl.destroy_context(current.display, current.context) {
            warn!("eglDestroyContext failed: {:?}", err);
        }
        if let Err(err) = self.egl.destroy_surface(current.display, current.surface) {
            warn!("eglDestroySurface failed: {:?}", err);
        }
        if let Err(err) = self.egl.terminate(current.display) {
            warn!("eglTerminate failed: {:?}", err);
        }
        info!("Destroyed the window context");
    }

    /// Presents the window surface.
    pub fn swap_buffers(&self) -> Result<(), Error> {
        match self.current {
            None => Err(Error::NoCurrentContext),
            Some(current) => self.egl.swap_buffers(current.display, current.surface),
        }
    }

    #[inline]
    pub fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        self.egl.get_proc_address(symbol_name)
    }
}

impl<E> Drop for ContextManager<E> where E: EglBackend {
    fn drop(&mut self) {
        self.destroy_context();
    }
}
