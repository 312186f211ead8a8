//! Poster tiling: fit an image onto a grid of paper sheets and export print-ready tiles.
//!
//! The geometry is computed first as plain values, then executed on pixels.
//!
//! # Modules
//!
//! - [`geometry`] — Fit policies (cover, contain) and fit layout computation
//! - [`paper`] — Paper sizes, orientation, mm/inch/point conversion
//! - [`grid`] — Grid shape, poster canvas, cell rectangles
//! - [`fit`] — Pixel execution of a fit layout with the `image` crate
//! - [`partition`] — Slicing the fitted poster into tiles and back
//! - [`export`] — PNG/JPEG tiles with DPI, per-tile PDF pages, assembly guide
//! - [`pipeline`] — The end-to-end [`TileJob`]
//!
//! # Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use zentile::{FitOptions, FitPolicy, Grid, fit, partition};
//!
//! let source = RgbImage::from_pixel(100, 150, Rgb([200, 10, 10]));
//! let poster = fit(&source, 80, 60, FitPolicy::Cover, &FitOptions::default()).unwrap();
//! assert_eq!(poster.dimensions(), (80, 60));
//!
//! let tiles = partition(&poster, 2, 2).unwrap();
//! assert_eq!(tiles.len(), 4);
//! assert_eq!(tiles[3].image.dimensions(), (40, 30));
//! ```

#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod export;
pub mod fit;
pub mod geometry;
pub mod grid;
pub mod paper;
pub mod partition;
pub mod pipeline;
pub mod source;

// Re-exports: core types
pub use color::Background;
pub use error::{Result, TileError};
pub use export::{ExportOptions, ExportedTile, RasterFormat};
pub use fit::{FitOptions, ResampleFilter, apply_layout, fit};
pub use geometry::{FitLayout, FitPolicy, Rect, Size};
pub use grid::{CanvasSpec, Grid, TileId};
pub use paper::{PageOrientation, PaperSize};
pub use partition::{Tile, partition, partition_grid, reassemble};
pub use pipeline::{TileJob, TileReport};
pub use source::load_rgb;
