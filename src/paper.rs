//! Physical paper sizes and unit conversion.
//!
//! A cell is one sheet of paper rendered at a chosen DPI. Pixel dimensions
//! are `round(mm / 25.4 * dpi)` per axis, so A4 at 300 dpi is 2480×3508.

use core::fmt;
use core::str::FromStr;

use crate::error::{Result, TileError};
use crate::geometry::Size;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimeters to inches.
#[inline]
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert millimeters to PDF points (1/72 inch).
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm_to_inches(mm) * POINTS_PER_INCH
}

/// Convert a length in millimeters to whole pixels at `dpi`.
///
/// `None` if the result does not fit in `u32`.
#[inline]
pub fn mm_to_px(mm: f64, dpi: u32) -> Option<u32> {
    let px = (mm_to_inches(mm) * dpi as f64).round();
    (0.0..=u32::MAX as f64).contains(&px).then_some(px as u32)
}

/// Sheet size, in portrait orientation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum PaperSize {
    /// ISO A4, 210 × 297 mm.
    #[default]
    A4,
    /// ISO A3, 297 × 420 mm.
    A3,
    /// ISO A5, 148 × 210 mm.
    A5,
    /// US Letter, 8.5 × 11 in.
    Letter,
    /// Arbitrary sheet in millimeters.
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Portrait `(width, height)` in millimeters.
    pub fn portrait_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// `(width, height)` in millimeters with the orientation applied.
    pub fn dimensions_mm(self, orientation: PageOrientation) -> (f64, f64) {
        let (w, h) = self.portrait_mm();
        match orientation {
            PageOrientation::Portrait => (w, h),
            PageOrientation::Landscape => (h, w),
        }
    }

    /// `(width, height)` in PDF points with the orientation applied.
    pub fn dimensions_pt(self, orientation: PageOrientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm(orientation);
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Pixel size of one sheet at `dpi`.
    pub fn cell_pixels(self, orientation: PageOrientation, dpi: u32) -> Result<Size> {
        let (w, h) = self.dimensions_mm(orientation);
        match (mm_to_px(w, dpi), mm_to_px(h, dpi)) {
            (Some(width), Some(height)) => Size::new(width, height).non_zero(),
            (width, height) => Err(TileError::InvalidDimensions {
                width: width.unwrap_or(u32::MAX),
                height: height.unwrap_or(u32::MAX),
            }),
        }
    }

    fn is_valid(self) -> bool {
        let (w, h) = self.portrait_mm();
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => f.write_str("A4"),
            Self::A3 => f.write_str("A3"),
            Self::A5 => f.write_str("A5"),
            Self::Letter => f.write_str("Letter"),
            Self::Custom {
                width_mm,
                height_mm,
            } => write!(f, "{width_mm}x{height_mm}mm"),
        }
    }
}

impl FromStr for PaperSize {
    type Err = TileError;

    /// Accepts `a4`, `a3`, `a5`, `letter` or `WxH` / `WxHmm` in millimeters.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let paper = match lower.as_str() {
            "a4" => Self::A4,
            "a3" => Self::A3,
            "a5" => Self::A5,
            "letter" => Self::Letter,
            other => {
                let dims = other.strip_suffix("mm").unwrap_or(other);
                let (w, h) = dims
                    .split_once('x')
                    .ok_or_else(|| TileError::InvalidPaper(s.to_string()))?;
                let width_mm = w.trim().parse::<f64>();
                let height_mm = h.trim().parse::<f64>();
                match (width_mm, height_mm) {
                    (Ok(width_mm), Ok(height_mm)) => Self::Custom {
                        width_mm,
                        height_mm,
                    },
                    _ => return Err(TileError::InvalidPaper(s.to_string())),
                }
            }
        };
        if !paper.is_valid() {
            return Err(TileError::InvalidPaper(s.to_string()));
        }
        Ok(paper)
    }
}

/// Which way up the sheet is printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageOrientation {
    #[default]
    Portrait,
    /// Long edge horizontal.
    Landscape,
}

impl fmt::Display for PageOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => f.write_str("portrait"),
            Self::Landscape => f.write_str("landscape"),
        }
    }
}
