//! OpenGL ES information.

/// Describes the OpenGL ES version that is requested when a context is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GLVersion {
    pub major: u8,
    pub minor: u8,
}

impl GLVersion {
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }
}

impl Default for GLVersion {
    /// OpenGL ES 2.0, the version every tutorial program targets.
    #[inline]
    fn default() -> GLVersion {
        GLVersion::new(2, 0)
    }
}
