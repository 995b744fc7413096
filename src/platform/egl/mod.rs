// miniglut/src/platform/egl/mod.rs
//
//! The system EGL library, loaded with `dlopen`.

use crate::backend::{ConfigHandle, ContextHandle, DisplayHandle, EglBackend, SurfaceHandle};
use crate::egl::types::{EGLConfig, EGLenum, EGLint};
use crate::egl::{self, Egl};
use crate::window::NativeWindow;
use crate::{Error, WindowingApiError};

use libc::{dlopen, dlsym, RTLD_LAZY};
use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::OnceLock;

thread_local! {
    static EGL_FUNCTIONS: Egl = Egl::load_with(get_proc_address);
}

static EGL_LIBRARY: OnceLock<Library> = OnceLock::new();
static GLES_LIBRARY: OnceLock<Library> = OnceLock::new();

struct Library(*mut c_void);

// `dlopen` handles stay valid for the whole process and may be used from any thread.
unsafe impl Send for Library {}
unsafe impl Sync for Library {}

impl Library {
    fn open(names: &[&[u8]]) -> Library {
        for name in names {
            let handle = unsafe { dlopen(name.as_ptr() as *const c_char, RTLD_LAZY) };
            if !handle.is_null() {
                return Library(handle);
            }
        }
        Library(ptr::null_mut())
    }

    fn symbol(&self, symbol_name: &str) -> *const c_void {
        if self.0.is_null() {
            return ptr::null();
        }
        match CString::new(symbol_name) {
            Ok(symbol_name) => unsafe { dlsym(self.0, symbol_name.as_ptr()) as *const c_void },
            Err(_) => ptr::null(),
        }
    }
}

fn egl_library() -> &'static Library {
    EGL_LIBRARY.get_or_init(|| Library::open(&[b"libEGL.so\0", b"libEGL.so.1\0"]))
}

fn gles_library() -> &'static Library {
    GLES_LIBRARY.get_or_init(|| Library::open(&[b"libGLESv2.so\0", b"libGLESv2.so.2\0"]))
}

fn get_proc_address(symbol_name: &str) -> *const c_void {
    egl_library().symbol(symbol_name)
}

/// `EglBackend` implementation calling into the system `libEGL`.
pub struct EglLibrary {
    _private: (),
}

impl EglLibrary {
    /// Opens `libEGL`. Fails if the library isn't installed.
    pub fn load() -> Result<EglLibrary, Error> {
        if egl_library().0.is_null() {
            return Err(Error::NoGLLibraryFound);
        }
        Ok(EglLibrary { _private: () })
    }
}

fn last_error() -> WindowingApiError {
    let code = EGL_FUNCTIONS.with(|egl| unsafe { egl.GetError() });
    windowing_api_error(code as EGLenum)
}

pub(crate) fn windowing_api_error(code: EGLenum) -> WindowingApiError {
    match code {
        egl::NOT_INITIALIZED => WindowingApiError::NotInitialized,
        egl::BAD_ACCESS => WindowingApiError::BadAccess,
        egl::BAD_ALLOC => WindowingApiError::BadAlloc,
        egl::BAD_ATTRIBUTE => WindowingApiError::BadAttribute,
        egl::BAD_CONFIG => WindowingApiError::BadConfig,
        egl::BAD_CONTEXT => WindowingApiError::BadContext,
        egl::BAD_CURRENT_SURFACE => WindowingApiError::BadCurrentSurface,
        egl::BAD_DISPLAY => WindowingApiError::BadDisplay,
        egl::BAD_SURFACE => WindowingApiError::BadSurface,
        egl::BAD_MATCH => WindowingApiError::BadMatch,
        egl::BAD_PARAMETER => WindowingApiError::BadParameter,
        egl::BAD_NATIVE_PIXMAP => WindowingApiError::BadNativePixmap,
        egl::BAD_NATIVE_WINDOW => WindowingApiError::BadNativeWindow,
        egl::CONTEXT_LOST => WindowingApiError::ContextLost,
        // EGL_SUCCESS included: a call reported failure without setting an error.
        _ => WindowingApiError::Failed,
    }
}

impl EglBackend for EglLibrary {
    fn initialize_default_display(&self) -> Result<DisplayHandle, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            // EGL_DEFAULT_DISPLAY
            let egl_display = egl.GetDisplay(ptr::null());
            if egl_display == egl::NO_DISPLAY {
                return Err(Error::ConnectionFailed(last_error()));
            }

            let (mut major, mut minor) = (0, 0);
            if egl.Initialize(egl_display, &mut major, &mut minor) == egl::FALSE {
                return Err(Error::ConnectionFailed(last_error()));
            }
            debug!("Initialized EGL {}.{}", major, minor);
            Ok(DisplayHandle::from_raw(egl_display))
        })
    }

    fn choose_configs(&self, display: DisplayHandle, attributes: &[i32])
                      -> Result<Vec<ConfigHandle>, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            // See how many applicable configs there are.
            let mut config_count = 0;
            let result = egl.ChooseConfig(display.as_raw(),
                                          attributes.as_ptr(),
                                          ptr::null_mut(),
                                          0,
                                          &mut config_count);
            if result == egl::FALSE {
                return Err(Error::PixelFormatSelectionFailed(last_error()));
            }
            if config_count == 0 {
                return Err(Error::NoPixelFormatFound);
            }

            // Enumerate all those configs.
            let mut configs: Vec<EGLConfig> = vec![ptr::null(); config_count as usize];
            let mut real_config_count = config_count;
            let result = egl.ChooseConfig(display.as_raw(),
                                          attributes.as_ptr(),
                                          configs.as_mut_ptr(),
                                          config_count,
                                          &mut real_config_count);
            if result == egl::FALSE {
                return Err(Error::PixelFormatSelectionFailed(last_error()));
            }
            configs.truncate(real_config_count.max(0) as usize);

            Ok(configs.into_iter().map(ConfigHandle::from_raw).collect())
        })
    }

    fn config_attrib(&self, display: DisplayHandle, config: ConfigHandle, attribute: i32)
                     -> Result<i32, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let mut value: EGLint = 0;
            let result = egl.GetConfigAttrib(display.as_raw(),
                                             config.as_raw(),
                                             attribute,
                                             &mut value);
            if result == egl::FALSE {
                return Err(Error::PixelFormatSelectionFailed(last_error()));
            }
            Ok(value)
        })
    }

    #[cfg(android)]
    fn set_window_buffers_format(&self, window: NativeWindow, format: i32) -> Result<(), Error> {
        // A zero width and height keep the window's own size.
        let native_window = window.as_ptr() as *mut ndk_sys::ANativeWindow;
        let result = unsafe {
            ndk_sys::ANativeWindow_setBuffersGeometry(native_window, 0, 0, format)
        };
        if result < 0 {
            return Err(Error::SurfaceCreationFailed(WindowingApiError::BadNativeWindow));
        }
        Ok(())
    }

    #[cfg(not(android))]
    fn set_window_buffers_format(&self, _: NativeWindow, _: i32) -> Result<(), Error> {
        Ok(())
    }

    fn create_window_surface(&self,
                             display: DisplayHandle,
                             config: ConfigHandle,
                             window: NativeWindow)
                             -> Result<SurfaceHandle, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_surface = egl.CreateWindowSurface(display.as_raw(),
                                                      config.as_raw(),
                                                      window.as_ptr() as egl::EGLNativeWindowType,
                                                      ptr::null());
            if egl_surface == egl::NO_SURFACE {
                return Err(Error::SurfaceCreationFailed(last_error()));
            }
            Ok(SurfaceHandle::from_raw(egl_surface))
        })
    }

    fn create_context(&self, display: DisplayHandle, config: ConfigHandle, attributes: &[i32])
                      -> Result<ContextHandle, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_context = egl.CreateContext(display.as_raw(),
                                                config.as_raw(),
                                                egl::NO_CONTEXT,
                                                attributes.as_ptr());
            if egl_context == egl::NO_CONTEXT {
                return Err(Error::ContextCreationFailed(last_error()));
            }
            Ok(ContextHandle::from_raw(egl_context))
        })
    }

    fn make_current(&self,
                    display: DisplayHandle,
                    surface: Option<SurfaceHandle>,
                    context: Option<ContextHandle>)
                    -> Result<(), Error> {
        let egl_surface = surface.map_or(egl::NO_SURFACE, SurfaceHandle::as_raw);
        let egl_context = context.map_or(egl::NO_CONTEXT, ContextHandle::as_raw);
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.MakeCurrent(display.as_raw(), egl_surface, egl_surface, egl_context);
            if result == egl::FALSE {
                return Err(Error::MakeCurrentFailed(last_error()));
            }
            Ok(())
        })
    }

    fn query_surface(&self, display: DisplayHandle, surface: SurfaceHandle, attribute: i32)
                     -> Result<i32, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let mut value: EGLint = 0;
            let result = egl.QuerySurface(display.as_raw(), surface.as_raw(), attribute, &mut value);
            if result == egl::FALSE {
                return Err(Error::SurfaceCreationFailed(last_error()));
            }
            Ok(value)
        })
    }

    fn swap_buffers(&self, display: DisplayHandle, surface: SurfaceHandle) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            if egl.SwapBuffers(display.as_raw(), surface.as_raw()) == egl::FALSE {
                return Err(Error::PresentFailed(last_error()));
            }
            Ok(())
        })
    }

    fn destroy_context(&self, display: DisplayHandle, context: ContextHandle)
                       -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            if egl.DestroyContext(display.as_raw(), context.as_raw()) == egl::FALSE {
                return Err(Error::ContextDestructionFailed(last_error()));
            }
            Ok(())
        })
    }

    fn destroy_surface(&self, display: DisplayHandle, surface: SurfaceHandle)
                       -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            if egl.DestroySurface(display.as_raw(), surface.as_raw()) == egl::FALSE {
                return Err(Error::SurfaceDestructionFailed(last_error()));
            }
            Ok(())
        })
    }

    fn terminate(&self, display: DisplayHandle) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            if egl.Terminate(display.as_raw()) == egl::FALSE {
                return Err(Error::ContextDestructionFailed(last_error()));
            }
            Ok(())
        })
    }

    // According to the EGL spec <= 1.4, eglGetProcAddress should only be used to retrieve
    // extension functions, and some implementations return garbage for core symbols. Look in
    // libGLESv2 first.
    fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        let symbol = gles_library().symbol(symbol_name);
        if !symbol.is_null() {
            return symbol;
        }

        let symbol_name = match CString::new(symbol_name) {
            Ok(symbol_name) => symbol_name,
            Err(_) => return ptr::null(),
        };
        EGL_FUNCTIONS.with(|egl| unsafe {
            egl.GetProcAddress(symbol_name.as_ptr()) as *const c_void
        })
    }
}
