//! Writing tiles to disk: raster files, per-tile PDFs, and the assembly guide.
//!
//! File names are `{prefix}_r{row}c{col}.{ext}` with one-based row and column.

pub mod guide;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod raster;

use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TileError};
use crate::grid::TileId;
use crate::partition::Tile;

/// Raster container for tile images.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    /// Lossless, DPI in `pHYs`.
    #[default]
    Png,
    /// Lossy, DPI in the JFIF header.
    Jpeg,
}

impl RasterFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => f.write_str("png"),
            Self::Jpeg => f.write_str("jpeg"),
        }
    }
}

impl FromStr for RasterFormat {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            _ => Err(TileError::InvalidFormat(s.to_string())),
        }
    }
}

/// How each tile is written.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    pub format: RasterFormat,
    /// Only used for [`RasterFormat::Jpeg`].
    pub jpeg_quality: u8,
    pub dpi: u32,
    /// Page setup for the companion PDF; `None` skips it.
    #[cfg(feature = "pdf")]
    pub pdf: Option<pdf::PdfPage>,
}

/// Files written for one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedTile {
    pub id: TileId,
    pub raster: PathBuf,
    pub pdf: Option<PathBuf>,
}

impl ExportedTile {
    /// All written paths, raster first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        core::iter::once(self.raster.as_path()).chain(self.pdf.as_deref())
    }
}

/// File stem shared by a tile's raster and PDF: `{prefix}_r{row}c{col}`.
pub fn tile_stem(prefix: &str, id: TileId) -> String {
    format!("{prefix}_{id}")
}

/// Write `tile` into `dir` according to `options`.
pub fn export_tile(
    dir: &Path,
    prefix: &str,
    tile: &Tile,
    options: &ExportOptions,
) -> Result<ExportedTile> {
    let stem = tile_stem(prefix, tile.id);

    let raster = dir.join(format!("{stem}.{}", options.format.extension()));
    match options.format {
        RasterFormat::Png => raster::write_png(&raster, &tile.image, options.dpi)?,
        RasterFormat::Jpeg => {
            raster::write_jpeg(&raster, &tile.image, options.dpi, options.jpeg_quality)?
        }
    }
    info!(tile = %tile.id, path = %raster.display(), "wrote tile image");

    #[cfg(feature = "pdf")]
    let pdf = match &options.pdf {
        Some(page) => {
            let path = dir.join(format!("{stem}.pdf"));
            pdf::write_pdf(&path, &tile.image, page, &stem)?;
            info!(tile = %tile.id, path = %path.display(), "wrote tile PDF");
            Some(path)
        }
        None => None,
    };
    #[cfg(not(feature = "pdf"))]
    let pdf = None;

    Ok(ExportedTile {
        id: tile.id,
        raster,
        pdf,
    })
}
