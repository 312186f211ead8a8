//! Error type shared by the geometry, raster and export layers.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = TileError> = std::result::Result<T, E>;

/// Everything that can abort a tiling run.
#[derive(Debug, Error)]
pub enum TileError {
    /// Fit policy text was neither `cover` nor `contain`.
    #[error("invalid fit policy {0:?} (expected \"cover\" or \"contain\")")]
    InvalidPolicy(String),

    /// The source file exists but could not be decoded as an image.
    #[error("cannot decode image {path}: {source}")]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A target, source or cell dimension is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raster larger than [`crate::geometry::MAX_PIXELS`].
    #[error("{width}x{height} raster exceeds the {max_pixels}-pixel limit")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    /// DPI that the chosen output format cannot record.
    #[error("invalid DPI {dpi} for {format} output (maximum {max})")]
    InvalidDpi {
        dpi: u32,
        format: &'static str,
        max: u32,
    },

    /// Grid has a zero axis.
    #[error("invalid grid {rows}x{columns}")]
    InvalidGrid { rows: u32, columns: u32 },

    /// Grid text that does not look like `RxC` or a preset name.
    #[error("invalid grid {0:?} (expected RxC such as 2x2, or a preset: stacked, quad)")]
    InvalidGridText(String),

    /// Canvas is not an exact multiple of the grid.
    #[error(
        "canvas {canvas_width}x{canvas_height} is not divisible into {rows}x{columns} cells"
    )]
    DimensionMismatch {
        canvas_width: u32,
        canvas_height: u32,
        rows: u32,
        columns: u32,
    },

    /// Margin is negative, not finite, or leaves no drawable page area.
    #[error("invalid page margin {0} mm")]
    InvalidMargin(f64),

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("invalid paper size {0:?} (expected a4, a3, a5, letter or WxH in mm)")]
    InvalidPaper(String),

    #[error("invalid resampling filter {0:?}")]
    InvalidFilter(String),

    #[error("invalid output format {0:?} (expected png or jpeg)")]
    InvalidFormat(String),

    /// Output prefix that is empty or contains a path separator.
    #[error("invalid output prefix {0:?}")]
    InvalidPrefix(String),

    #[error("invalid JPEG quality {0} (expected 1-100)")]
    InvalidQuality(u8),

    /// Filesystem failure on the named path.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raster encoder failed while writing the named file.
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// PDF document assembly or serialization failed.
    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}

impl TileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
