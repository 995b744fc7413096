// miniglut/src/platform/android/mod.rs
//
//! The Android native activity platform.
//!
//! An application crate defines `android_main` and hands control to `start`:
//!
//! ```ignore
//! #[no_mangle]
//! fn android_main(app: android_activity::AndroidApp) {
//!     miniglut::platform::android::start(app, |glut| {
//!         glut.create_window("My First Triangle").unwrap();
//!         glut.display_func(|window| { /* draw */ window.swap_buffers().unwrap(); });
//!         glut.main_loop();
//!     });
//! }
//! ```

pub mod assets;
pub mod events;
pub mod sensor;

pub use self::events::AndroidEvents;
pub use self::sensor::AndroidSensorQueue;

use crate::glut::{Glut, GlutConfig};
use crate::platform::egl::EglLibrary;
use crate::Error;

use android_activity::AndroidApp;
use jni::objects::{JObject, JString};
use jni::JavaVM;
use log::LevelFilter;
use std::env;
use std::path::PathBuf;

/// Log tag of every message the shim writes.
pub const LOG_TAG: &str = "native-activity";

pub type AndroidGlut = Glut<EglLibrary, AndroidSensorQueue, AndroidEvents>;

/// Runs `main` as the program of a native activity, with the default configuration.
pub fn start<F>(app: AndroidApp, main: F) where F: FnOnce(&mut AndroidGlut) {
    start_with_config(app, GlutConfig::default(), main)
}

/// Sets up logging and the working directory, runs `main`, and destroys the window's context
/// once `main` returns.
///
/// The working directory becomes the application cache directory, with every bundled asset
/// copied into it.
pub fn start_with_config<F>(app: AndroidApp, config: GlutConfig, main: F)
                            where F: FnOnce(&mut AndroidGlut) {
    android_logger::init_once(android_logger::Config::default()
        .with_tag(LOG_TAG)
        .with_max_level(LevelFilter::Info));
    info!("android_main");

    if let Err(err) = prepare_working_directory(&app) {
        warn!("Couldn't prepare the working directory: {:?}", err);
    }

    let egl = match EglLibrary::load() {
        Ok(egl) => egl,
        Err(err) => {
            error!("Couldn't load EGL: {:?}", err);
            return;
        }
    };

    let accelerometer = AndroidSensorQueue::accelerometer();
    let mut glut = Glut::init(egl, AndroidEvents::new(app), accelerometer, config);
    main(&mut glut);
    glut.destroy_window();

    info!("android_main: end");
}

fn prepare_working_directory(app: &AndroidApp) -> Result<(), Error> {
    let directory = match cache_dir(app) {
        Ok(directory) => directory,
        Err(_) => app.internal_data_path().ok_or(Error::PlatformQueryFailed)?,
    };

    info!("app_dir: {}", directory.display());
    env::set_current_dir(&directory).map_err(|err| {
        warn!("chdir to {} failed: {}", directory.display(), err);
        Error::PlatformQueryFailed
    })?;

    let count = assets::extract_all(&app.asset_manager(), &directory)?;
    info!("Extracted {} assets", count);
    Ok(())
}

// Asks the activity for `getCacheDir().getAbsolutePath()`. Attaches this thread to the VM for
// the rest of the process.
fn cache_dir(app: &AndroidApp) -> Result<PathBuf, Error> {
    fn jni_error(err: jni::errors::Error) -> Error {
        warn!("JNI call failed: {:?}", err);
        Error::PlatformQueryFailed
    }

    let vm = unsafe { JavaVM::from_raw(app.vm_as_ptr() as *mut jni::sys::JavaVM) }
        .map_err(jni_error)?;
    let mut env = vm.attach_current_thread_permanently().map_err(jni_error)?;
    let activity = unsafe { JObject::from_raw(app.activity_as_ptr() as jni::sys::jobject) };

    let file = env.call_method(&activity, "getCacheDir", "()Ljava/io/File;", &[])
        .and_then(|value| value.l())
        .map_err(jni_error)?;
    let path = env.call_method(&file, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .and_then(|value| value.l())
        .map_err(jni_error)?;
    let path: String = env.get_string(&JString::from(path)).map_err(jni_error)?.into();
    Ok(PathBuf::from(path))
}
