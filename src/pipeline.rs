//! End-to-end tiling job: validate → load → fit → partition → export.
//!
//! # Example
//!
//! ```no_run
//! use zentile::{FitPolicy, Grid, PageOrientation, TileJob};
//!
//! # fn main() -> Result<(), zentile::TileError> {
//! let report = TileJob::new("poster.jpg", "./tiles")
//!     .grid(Grid::STACKED)
//!     .orientation(PageOrientation::Landscape)
//!     .dpi(150)
//!     .policy(FitPolicy::Contain)
//!     .run()?;
//!
//! for tile in &report.tiles {
//!     println!("{}", tile.raster.display());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info};

use crate::color::Background;
use crate::error::{Result, TileError};
use crate::export::guide::{GuideInfo, write_guide};
use crate::export::raster::JPEG_MAX_DPI;
use crate::export::{ExportOptions, ExportedTile, RasterFormat, export_tile};
use crate::fit::{FitOptions, ResampleFilter, apply_layout};
use crate::geometry::{FitLayout, FitPolicy, Size};
use crate::grid::{CanvasSpec, Grid};
use crate::paper::{PageOrientation, PaperSize};
use crate::partition::{Tile, partition_grid};
use crate::source::load_rgb;

/// File name of the assembly guide.
pub const GUIDE_FILE_NAME: &str = "README.txt";

/// Everything needed for one tiling run.
///
/// Built with [`TileJob::new`] and the chained setters, in the manner of a
/// builder. Defaults: 2×2 A4 portrait at 300 dpi, cover, Lanczos3, white
/// letterbox, PNG tiles, PDFs with no margin, and an assembly guide.
#[derive(Clone, Debug, PartialEq)]
pub struct TileJob {
    pub input: PathBuf,
    pub outdir: PathBuf,
    pub prefix: String,
    pub dpi: u32,
    pub policy: FitPolicy,
    pub grid: Grid,
    pub paper: PaperSize,
    pub orientation: PageOrientation,
    pub fit: FitOptions,
    pub format: RasterFormat,
    pub jpeg_quality: u8,
    /// Write a PDF page per tile (needs the `pdf` feature).
    pub pdf: bool,
    /// PDF page margin in millimeters.
    pub margin_mm: f64,
    pub guide: bool,
}

impl TileJob {
    pub fn new(input: impl Into<PathBuf>, outdir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            outdir: outdir.into(),
            prefix: "tile".to_string(),
            dpi: 300,
            policy: FitPolicy::Cover,
            grid: Grid::QUAD,
            paper: PaperSize::A4,
            orientation: PageOrientation::Portrait,
            fit: FitOptions::default(),
            format: RasterFormat::Png,
            jpeg_quality: 95,
            pdf: cfg!(feature = "pdf"),
            margin_mm: 0.0,
            guide: true,
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn policy(mut self, policy: FitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    pub fn orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.fit.filter = filter;
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.fit.background = background;
        self
    }

    pub fn format(mut self, format: RasterFormat) -> Self {
        self.format = format;
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn pdf(mut self, enabled: bool) -> Self {
        self.pdf = enabled;
        self
    }

    pub fn margin_mm(mut self, margin_mm: f64) -> Self {
        self.margin_mm = margin_mm;
        self
    }

    pub fn guide(mut self, enabled: bool) -> Self {
        self.guide = enabled;
        self
    }

    /// Check every option and compute the poster geometry.
    ///
    /// Runs before any file is read, so a bad option never costs a decode.
    pub fn validate(&self) -> Result<CanvasSpec> {
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(TileError::InvalidPrefix(self.prefix.clone()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(TileError::InvalidQuality(self.jpeg_quality));
        }
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(TileError::InvalidMargin(self.margin_mm));
        }
        #[cfg(feature = "pdf")]
        if self.pdf {
            self.pdf_page().drawable()?;
        }
        if self.format == RasterFormat::Jpeg && self.dpi > JPEG_MAX_DPI {
            return Err(TileError::InvalidDpi {
                dpi: self.dpi,
                format: "JPEG",
                max: JPEG_MAX_DPI,
            });
        }
        let spec = CanvasSpec::for_paper(self.paper, self.orientation, self.dpi, self.grid)?;
        let poster = spec.poster()?.within_budget()?;
        debug!(
            cell = %spec.cell,
            %poster,
            grid = %spec.grid,
            "validated tiling job"
        );
        Ok(spec)
    }

    #[cfg(feature = "pdf")]
    fn pdf_page(&self) -> crate::export::pdf::PdfPage {
        crate::export::pdf::PdfPage {
            paper: self.paper,
            orientation: self.orientation,
            margin_mm: self.margin_mm,
        }
    }

    /// Fit `source` onto the poster and slice it, without touching disk.
    pub fn render(&self, source: &RgbImage) -> Result<(FitLayout, Vec<Tile>)> {
        let spec = self.validate()?;
        render_with(source, &spec, self.policy, &self.fit)
    }

    /// Run the whole job, writing files into `outdir`.
    ///
    /// No cleanup happens on failure; tiles written before the error stay.
    pub fn run(&self) -> Result<TileReport> {
        let spec = self.validate()?;

        std::fs::create_dir_all(&self.outdir).map_err(|e| TileError::io(&self.outdir, e))?;

        let source = load_rgb(&self.input)?;
        info!(
            input = %self.input.display(),
            size = %Size::new(source.width(), source.height()),
            "loaded source image"
        );

        let (layout, tiles) = render_with(&source, &spec, self.policy, &self.fit)?;
        drop(source);

        let options = self.export_options();
        let exported = tiles
            .iter()
            .map(|tile| export_tile(&self.outdir, &self.prefix, tile, &options))
            .collect::<Result<Vec<_>>>()?;

        let guide = if self.guide {
            let path = self.outdir.join(GUIDE_FILE_NAME);
            write_guide(&path, &self.guide_info(&options))?;
            info!(path = %path.display(), "wrote assembly guide");
            Some(path)
        } else {
            None
        };

        Ok(TileReport {
            outdir: self.outdir.clone(),
            canvas: spec,
            layout,
            tiles: exported,
            guide,
        })
    }

    fn export_options(&self) -> ExportOptions {
        #[cfg(not(feature = "pdf"))]
        if self.pdf {
            tracing::warn!("built without the `pdf` feature; skipping PDF export");
        }
        ExportOptions {
            format: self.format,
            jpeg_quality: self.jpeg_quality,
            dpi: self.dpi,
            #[cfg(feature = "pdf")]
            pdf: self.pdf.then(|| self.pdf_page()),
        }
    }

    fn guide_info(&self, options: &ExportOptions) -> GuideInfo<'_> {
        GuideInfo {
            prefix: &self.prefix,
            grid: self.grid,
            sheet: format!("{} {}", self.paper, self.orientation),
            dpi: self.dpi,
            policy: self.policy.as_str(),
            raster_ext: options.format.extension(),
            with_pdf: cfg!(feature = "pdf") && self.pdf,
            margin_mm: self.margin_mm,
        }
    }
}

fn render_with(
    source: &RgbImage,
    spec: &CanvasSpec,
    policy: FitPolicy,
    options: &FitOptions,
) -> Result<(FitLayout, Vec<Tile>)> {
    let poster = spec.poster()?;
    let layout = FitLayout::compute(Size::new(source.width(), source.height()), poster, policy)?;
    let fitted = apply_layout(source, &layout, options);
    let tiles = partition_grid(&fitted, spec.grid)?;
    Ok((layout, tiles))
}

/// Outcome of [`TileJob::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct TileReport {
    pub outdir: PathBuf,
    pub canvas: CanvasSpec,
    pub layout: FitLayout,
    /// Row-major, one entry per grid cell.
    pub tiles: Vec<ExportedTile>,
    pub guide: Option<PathBuf>,
}

impl TileReport {
    /// Every file written, tiles first (row-major), guide last.
    pub fn files(&self) -> Vec<&Path> {
        self.tiles
            .iter()
            .flat_map(|t| t.paths())
            .chain(self.guide.as_deref())
            .collect()
    }
}
