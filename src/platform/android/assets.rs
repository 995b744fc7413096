// miniglut/src/platform/android/assets.rs
//
//! Copies the APK's bundled assets to the file system, so that programs can open shaders and
//! textures with plain file I/O.

use crate::Error;

use ndk::asset::AssetManager;
use std::ffi::CStr;
use std::fs::File;
use std::io;
use std::path::Path;

/// Copies every top-level asset into `destination` and returns how many were copied.
pub fn extract_all(asset_manager: &AssetManager, destination: &Path) -> Result<usize, Error> {
    let asset_dir = match asset_manager.open_dir(<&CStr>::default()) {
        Some(asset_dir) => asset_dir,
        None => {
            warn!("Couldn't open the asset directory");
            return Err(Error::PlatformQueryFailed);
        }
    };

    let mut count = 0;
    for filename in asset_dir {
        let mut asset = match asset_manager.open(&filename) {
            Some(asset) => asset,
            None => {
                warn!("Couldn't open asset {:?}", filename);
                continue;
            }
        };
        let name = match filename.to_str() {
            Ok(name) => name,
            Err(_) => {
                warn!("Skipping asset with a non-UTF-8 name {:?}", filename);
                continue;
            }
        };

        let path = destination.join(name);
        let copied = File::create(&path).and_then(|mut file| io::copy(&mut asset, &mut file));
        match copied {
            Ok(bytes) => debug!("Extracted {} ({} bytes)", path.display(), bytes),
            Err(err) => {
                warn!("Couldn't extract {}: {}", path.display(), err);
                return Err(Error::PlatformQueryFailed);
            }
        }
        count += 1;
    }

    Ok(count)
}
