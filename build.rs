// miniglut/build.rs
//
//! The `miniglut` build script.

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::PathBuf;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        android: { target_os = "android" },
        // Targets where `libEGL` can be opened with `dlopen`.
        dlopen_egl: { all(unix, not(target_os = "macos")) },
    }

    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());

    // Generate EGL bindings. The constants are needed on every target; the entry points are only
    // ever loaded where an EGL library exists.
    let mut file = File::create(dest.join("egl_bindings.rs")).unwrap();
    let registry = Registry::new(Api::Egl, (1, 5), Profile::Core, Fallbacks::All, []);
    registry.write_bindings(StructGenerator, &mut file).unwrap();
}
