// miniglut/src/error.rs
//
//! Various errors that methods can produce.

use std::io;
use std::path::PathBuf;

/// Various errors that methods can produce.
#[derive(Debug)]
pub enum Error {
    /// The system EGL library couldn't be located.
    NoGLLibraryFound,
    /// The default EGL display couldn't be obtained or initialized.
    ConnectionFailed(WindowingApiError),
    /// Choosing an EGL framebuffer configuration failed.
    PixelFormatSelectionFailed(WindowingApiError),
    /// No EGL framebuffer configuration matches the requested attributes.
    NoPixelFormatFound,
    /// The system couldn't create a window surface.
    SurfaceCreationFailed(WindowingApiError),
    /// The system couldn't create an OpenGL ES context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't destroy the OpenGL ES context or terminate its display.
    ContextDestructionFailed(WindowingApiError),
    /// The system couldn't destroy the window surface.
    SurfaceDestructionFailed(WindowingApiError),
    /// The system couldn't make the OpenGL ES context current or not current.
    MakeCurrentFailed(WindowingApiError),
    /// The window surface reported a zero or negative size.
    EmptyDrawable,
    /// The system couldn't present the window surface.
    PresentFailed(WindowingApiError),
    /// There is no current context, so the operation can't be performed.
    NoCurrentContext,
    /// The platform has no native window attached.
    NoWindowAttached,
    /// A window already exists; only one window per session is supported.
    WindowAlreadyExists,
    /// The platform destroyed the window. Contexts can't be recovered, so the session ends.
    WindowDestroyed,
    /// The platform didn't deliver a window before the configured timeout.
    WindowTimeout,
    /// The raw window handle doesn't describe an Android native window.
    IncompatibleNativeWidget,
    /// The accelerometer event queue rejected a request.
    SensorFailed,
    /// A query to the hosting platform (JNI, assets, file system) failed.
    PlatformQueryFailed,
    /// A shader source file couldn't be read.
    ShaderSourceUnreadable(PathBuf, io::Error),
    /// A shader source file exceeds `shader::MAX_SOURCE_SIZE`.
    ShaderSourceTooLarge(PathBuf),
    /// The driver rejected a shader. Carries the compiler's info log.
    ShaderCompilationFailed(String),
    /// The driver couldn't link a program. Carries the linker's info log.
    ProgramLinkFailed(String),
    /// The program has no active attribute with the given name.
    AttributeNotFound(String),
    /// The program has no active uniform with the given name.
    UniformNotFound(String),
}

/// Abstraction of the errors that EGL returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// EGL is not initialized, or could not be initialized, for the specified EGL display
    /// connection.
    NotInitialized,
    /// EGL cannot access a requested resource (for example a context is bound in another
    /// thread).
    BadAccess,
    /// EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// An unrecognized attribute or attribute value was passed in the attribute list.
    BadAttribute,
    /// The EGL configuration is unsupported.
    BadConfig,
    /// An EGLContext argument does not name a valid EGL rendering context.
    BadContext,
    /// The current surface of the calling thread is a window, pixel buffer or pixmap that is
    /// no longer valid.
    BadCurrentSurface,
    /// An EGLDisplay argument does not name a valid EGL display connection.
    BadDisplay,
    /// An EGLSurface argument does not name a valid surface configured for GL rendering.
    BadSurface,
    /// Arguments are inconsistent (for example, a valid context requires buffers not supplied
    /// by a valid surface).
    BadMatch,
    /// One or more argument values are invalid.
    BadParameter,
    /// A NativePixmapType argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// A NativeWindowType argument does not refer to a valid native window.
    BadNativeWindow,
    /// A power management event has occurred. The application must destroy all contexts and
    /// reinitialise OpenGL ES state and objects to continue rendering.
    ContextLost,
}
