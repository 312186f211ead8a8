//! Canvas fitter: executes a [`FitLayout`] on pixels.
//!
//! Resamples the source once, then either crops (cover) or pastes onto a
//! solid background (contain). The output always has exactly the requested
//! dimensions.

use core::fmt;
use core::str::FromStr;

use image::RgbImage;
use image::imageops::{self, FilterType};
use tracing::{debug, warn};

use crate::color::Background;
use crate::error::{Result, TileError};
use crate::geometry::{FitLayout, FitPolicy, Size};

/// Resampling kernel used when scaling the source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResampleFilter {
    /// Windowed sinc, radius 3. Sharpest; the right choice for print upscales.
    #[default]
    Lanczos3,
    CatmullRom,
    Gaussian,
    /// Bilinear.
    Triangle,
    Nearest,
}

impl ResampleFilter {
    pub const fn filter_type(self) -> FilterType {
        match self {
            Self::Lanczos3 => FilterType::Lanczos3,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Triangle => FilterType::Triangle,
            Self::Nearest => FilterType::Nearest,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lanczos3 => "lanczos3",
            Self::CatmullRom => "catmull-rom",
            Self::Gaussian => "gaussian",
            Self::Triangle => "triangle",
            Self::Nearest => "nearest",
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResampleFilter {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            "catmull-rom" | "catmullrom" | "cubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "triangle" | "bilinear" | "linear" => Ok(Self::Triangle),
            "nearest" => Ok(Self::Nearest),
            _ => Err(TileError::InvalidFilter(s.to_string())),
        }
    }
}

/// Pixel-level settings for [`fit`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FitOptions {
    pub filter: ResampleFilter,
    /// Letterbox fill for contain fits.
    pub background: Background,
}

/// Fit `source` onto an exact `target_width`×`target_height` canvas.
pub fn fit(
    source: &RgbImage,
    target_width: u32,
    target_height: u32,
    policy: FitPolicy,
    options: &FitOptions,
) -> Result<RgbImage> {
    let layout = FitLayout::compute(
        Size::new(source.width(), source.height()),
        Size::new(target_width, target_height),
        policy,
    )?;
    Ok(apply_layout(source, &layout, options))
}

/// Execute a precomputed layout. `source` must have `layout.source` dimensions.
pub fn apply_layout(source: &RgbImage, layout: &FitLayout, options: &FitOptions) -> RgbImage {
    debug_assert_eq!(
        Size::new(source.width(), source.height()),
        layout.source,
        "layout computed for a different source"
    );
    debug!(
        policy = %layout.policy,
        source = %layout.source,
        scaled = %layout.scaled,
        canvas = %layout.canvas,
        crop = ?layout.crop,
        placement = ?layout.placement,
        filter = %options.filter,
        "fitting source onto canvas"
    );

    let scaled = if layout.needs_resize() {
        imageops::resize(
            source,
            layout.scaled.width,
            layout.scaled.height,
            options.filter.filter_type(),
        )
    } else {
        source.clone()
    };

    let visible = match layout.crop {
        Some(r) => imageops::crop_imm(&scaled, r.x, r.y, r.width, r.height).to_image(),
        None => scaled,
    };

    if !layout.needs_padding() {
        return visible;
    }

    let slack = layout.canvas.area() - layout.visible().size().area();
    if slack * 2 > layout.canvas.area() {
        warn!(
            canvas = %layout.canvas,
            image = %layout.visible().size(),
            "letterbox covers more than half of the poster"
        );
    }

    let mut canvas = RgbImage::from_pixel(
        layout.canvas.width,
        layout.canvas.height,
        options.background.to_rgb(),
    );
    let (x, y) = layout.placement;
    imageops::replace(&mut canvas, &visible, x as i64, y as i64);
    canvas
}
