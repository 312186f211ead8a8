//! Raster tile files with embedded resolution.
//!
//! PNG carries DPI in its `pHYs` chunk (pixels per meter), JPEG in the JFIF
//! density fields. Print dialogs use these to size the tile on paper.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};

use crate::error::{Result, TileError};
use crate::paper::MM_PER_INCH;

/// Largest DPI the JFIF density fields can hold.
pub const JPEG_MAX_DPI: u32 = u16::MAX as u32;

/// `dpi` as PNG pixels per meter.
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 * 1000.0 / MM_PER_INCH).round() as u32
}

/// Write `image` as an 8-bit RGB PNG tagged with `dpi`.
pub fn write_png(path: &Path, image: &RgbImage, dpi: u32) -> Result<()> {
    let file = File::create(path).map_err(|e| TileError::io(path, e))?;
    let writer = BufWriter::new(file);

    let ppm = dpi_to_ppm(dpi);
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| TileError::encode(path, e))?;
    writer
        .write_image_data(image.as_raw())
        .map_err(|e| TileError::encode(path, e))?;
    writer.finish().map_err(|e| TileError::encode(path, e))
}

/// Write `image` as a baseline JPEG at `quality` (1-100) tagged with `dpi`.
pub fn write_jpeg(path: &Path, image: &RgbImage, dpi: u32, quality: u8) -> Result<()> {
    let density = u16::try_from(dpi).map_err(|_| TileError::InvalidDpi {
        dpi,
        format: "JPEG",
        max: JPEG_MAX_DPI,
    })?;
    let file = File::create(path).map_err(|e| TileError::io(path, e))?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
    encoder.set_pixel_density(PixelDensity::dpi(density));
    encoder
        .encode_image(image)
        .map_err(|e| TileError::encode(path, e))
}
