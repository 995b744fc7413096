// miniglut/src/platform/mod.rs
//
//! Platform-specific backends.

#[cfg(dlopen_egl)]
pub mod egl;

#[cfg(android)]
pub mod android;
