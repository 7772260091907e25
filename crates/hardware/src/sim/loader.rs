//! Firmware image loading.
//!
//! This module reads firmware images and fabric configurations from disk. It performs:
//! 1. **Image loading:** Reads a raw flash image into a `FlashImage`.
//! 2. **Length checks:** Warns when the image cannot fill the configured boot length, since
//!    such a boot will stall with the cores disabled.
//! 3. **Config loading:** Parses a JSON configuration file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::boot::flash::FlashImage;
use crate::common::error::SimError;
use crate::config::{BootConfig, Config};

/// Reads a raw firmware image from `path`.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read.
pub fn load_firmware(path: impl AsRef<Path>) -> Result<FlashImage, SimError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = data.len(), "firmware image loaded");
    Ok(FlashImage::new(data))
}

/// Compares an image with the boot length it is meant to fill.
///
/// # Returns
///
/// `true` if the image holds at least `total_words` whole words. A short image is logged
/// as a warning: the boot it feeds can never complete.
pub fn check_image(image: &FlashImage, boot: &BootConfig) -> bool {
    let needed = boot.image_bytes();
    if image.len() < needed {
        warn!(
            image_bytes = image.len(),
            needed_bytes = needed,
            "firmware image is shorter than the boot length; boot will not complete"
        );
        return false;
    }
    if image.len() > needed {
        info!(
            image_bytes = image.len(),
            needed_bytes = needed,
            "firmware image is longer than the boot length; trailing bytes are ignored"
        );
    }
    true
}

/// Reads and parses a JSON configuration file.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read, [`SimError::Parse`] if it is not a valid
/// configuration document.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Config::from_json(&text)?)
}
