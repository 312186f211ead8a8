//! Fit geometry: how a source of arbitrary aspect ratio maps onto an exact canvas.
//!
//! Computes the scaled size, the crop window and the canvas placement from a
//! [`FitPolicy`], source dimensions and target dimensions. Pure geometry, no
//! pixel operations; [`crate::fit`] executes the result.
//!
//! # Example
//!
//! ```
//! use zentile::{FitLayout, FitPolicy, Size};
//!
//! let layout = FitLayout::compute(Size::new(1000, 500), Size::new(400, 300), FitPolicy::Cover)
//!     .unwrap();
//!
//! // Scaled to cover 400×300, then the 600px-wide scaled image is center-cropped.
//! assert_eq!(layout.scaled, Size::new(600, 300));
//! assert_eq!(layout.crop.unwrap().x, 100);
//! assert_eq!(layout.canvas, Size::new(400, 300));
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::{Result, TileError};

/// Largest raster, in pixels, any layout may allocate (3 GiB as 8-bit RGB).
pub const MAX_PIXELS: u64 = 1 << 30;

/// How to map a source image onto the target canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitPolicy {
    /// Scale to fill the canvas, center-crop the overflow. Never pads.
    #[default]
    Cover,
    /// Scale to fit inside the canvas, letterbox with the background color.
    /// Never crops.
    Contain,
}

impl FitPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
        }
    }
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitPolicy {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            _ => Err(TileError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fails with [`TileError::InvalidDimensions`] if either axis is zero.
    pub fn non_zero(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(TileError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Fails with [`TileError::TooLarge`] above [`MAX_PIXELS`].
    pub fn within_budget(self) -> Result<Self> {
        if self.area() > MAX_PIXELS {
            return Err(TileError::TooLarge {
                width: self.width,
                height: self.height,
                max_pixels: MAX_PIXELS,
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the two rects share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the pixel `(px, py)` lies inside this rect.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Whether this rect covers the full `w`×`h` area (no actual crop).
    pub fn is_full(&self, w: u32, h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == w && self.height == h
    }
}

/// Computed mapping of a source onto an exact canvas.
///
/// Executing it is: resize the source to `scaled`, take the `crop` window of
/// the scaled image (cover only), then place the result at `placement` on a
/// `canvas`-sized background (contain only).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FitLayout {
    /// Policy the layout was computed for.
    pub policy: FitPolicy,
    /// Original source dimensions.
    pub source: Size,
    /// Dimensions the source is uniformly resized to.
    pub scaled: Size,
    /// Window of the scaled image that survives. `None` = all of it.
    pub crop: Option<Rect>,
    /// Final output dimensions, always equal to the requested target.
    pub canvas: Size,
    /// Top-left offset of the (cropped) scaled image on the canvas.
    pub placement: (u32, u32),
}

impl FitLayout {
    /// Compute the layout for fitting `source` onto `target` under `policy`.
    pub fn compute(source: Size, target: Size, policy: FitPolicy) -> Result<Self> {
        let Size {
            width: sw,
            height: sh,
        } = source.non_zero()?;
        let Size {
            width: tw,
            height: th,
        } = target.non_zero()?.within_budget()?;

        // Cross-multiply so equal aspect ratios never go through floats.
        let same_aspect = sw as u64 * th as u64 == sh as u64 * tw as u64;

        let layout = match policy {
            FitPolicy::Cover => {
                let (rw, rh) = if same_aspect {
                    (tw, th)
                } else {
                    let scale = (tw as f64 / sw as f64).max(th as f64 / sh as f64);
                    // Rounding must not leave a sliver of the canvas uncovered.
                    (
                        scaled_dimension(sw, scale).max(tw),
                        scaled_dimension(sh, scale).max(th),
                    )
                };
                // The full scaled image is allocated before cropping.
                Size::new(rw, rh).within_budget()?;
                let crop = Rect::new(center_offset(rw, tw), center_offset(rh, th), tw, th);
                Self {
                    policy,
                    source,
                    scaled: Size::new(rw, rh),
                    crop: Some(crop),
                    canvas: target,
                    placement: (0, 0),
                }
            }
            FitPolicy::Contain => {
                let (rw, rh) = if same_aspect {
                    (tw, th)
                } else {
                    let scale = (tw as f64 / sw as f64).min(th as f64 / sh as f64);
                    (
                        scaled_dimension(sw, scale).min(tw),
                        scaled_dimension(sh, scale).min(th),
                    )
                };
                Self {
                    policy,
                    source,
                    scaled: Size::new(rw, rh),
                    crop: None,
                    canvas: target,
                    placement: (center_offset(tw, rw), center_offset(th, rh)),
                }
            }
        };

        Ok(layout.normalize())
    }

    /// Whether resampling is needed (dimensions change).
    pub fn needs_resize(&self) -> bool {
        self.scaled != self.source
    }

    /// Whether part of the scaled image is discarded.
    pub fn needs_crop(&self) -> bool {
        self.crop.is_some()
    }

    /// Whether background shows around the image.
    pub fn needs_padding(&self) -> bool {
        self.canvas != self.visible().size()
    }

    /// Region of the canvas covered by source pixels.
    pub fn visible(&self) -> Rect {
        let size = match &self.crop {
            Some(r) => r.size(),
            None => self.scaled,
        };
        Rect::new(self.placement.0, self.placement.1, size.width, size.height)
    }

    /// Normalize: clear the crop if it keeps the full scaled image.
    fn normalize(mut self) -> Self {
        if let Some(r) = &self.crop
            && r.is_full(self.scaled.width, self.scaled.height)
        {
            self.crop = None;
        }
        self
    }
}

/// `round(dim * scale)`, never zero.
fn scaled_dimension(dim: u32, scale: f64) -> u32 {
    let v = (dim as f64 * scale).round();
    if v < 1.0 { 1 } else { v as u32 }
}

/// Offset that centers `inner` within `outer`, floor-divided.
///
/// An odd amount of slack puts the extra pixel after the content (bottom or
/// right edge).
fn center_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}
