//! Source image loading.

use std::path::Path;

use image::{ImageReader, RgbImage};
use tracing::{debug, warn};

use crate::error::{Result, TileError};

/// Decode the image at `path` into 8-bit RGB.
///
/// The format is sniffed from the file contents, not the extension. Alpha is
/// discarded; a missing file is an I/O error, undecodable bytes are
/// [`TileError::UnreadableImage`].
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| TileError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| TileError::io(path, e))?;
    let format = reader.format();

    let decoded = reader.decode().map_err(|source| TileError::UnreadableImage {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        format = ?format,
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "decoded source image"
    );
    if decoded.color().has_alpha() {
        warn!(path = %path.display(), "source has an alpha channel; it will be dropped");
    }

    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(TileError::InvalidDimensions {
            width: rgb.width(),
            height: rgb.height(),
        });
    }
    Ok(rgb)
}
