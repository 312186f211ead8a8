//! zentile CLI - split an image into a grid of print-ready paper tiles.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zentile::{
    Background, FitPolicy, Grid, PageOrientation, PaperSize, RasterFormat, ResampleFilter,
    TileError, TileJob,
};

/// Parse option text through the library's own `FromStr`, so the CLI and the
/// API reject the same values with the same messages.
fn parse<T: FromStr<Err = TileError>>(s: &str) -> Result<T, String> {
    s.parse().map_err(|e: TileError| e.to_string())
}

#[derive(Parser, Debug)]
#[command(
    name = "zentile",
    version,
    about = "Split an image into a grid of paper-sized tiles (PNG/JPEG + PDF)",
    long_about = "Resize an image onto a poster made of R x C sheets of paper, then export\n\
                  one image per sheet tagged with the chosen DPI, plus one true-size PDF\n\
                  page per sheet and a README with assembly instructions.\n\n\
                  cover   fills the whole poster and crops any overflow (no white bars).\n\
                  contain fits the whole image inside the poster (may add bars).",
    after_help = "EXAMPLES:\n  \
                  # 2x2 A4 poster at 300 dpi, cropped to fill\n  \
                  zentile input.jpg --outdir ./tiles\n\n  \
                  # Upper/lower halves on landscape A4, JPEG tiles, no PDFs\n  \
                  zentile cover.png --grid stacked --landscape --format jpeg --no-pdf\n\n  \
                  # Whole image on 3x3 A3, grey bars, 5 mm PDF margin\n  \
                  zentile map.tif --grid 3x3 --paper a3 --mode contain --background gray --margin-mm 5"
)]
struct Cli {
    /// Path to the input image (PNG, JPEG, GIF, WebP, BMP or TIFF)
    input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "./tiles")]
    outdir: PathBuf,

    /// Output filename prefix
    #[arg(long, default_value = "tile")]
    prefix: String,

    /// Resolution of the tile images, in dots per inch
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// How to fit the image onto the poster: cover or contain
    #[arg(long, default_value = "cover", value_parser = parse::<FitPolicy>)]
    mode: FitPolicy,

    /// PDF page margin in millimeters (0 = edge to edge)
    #[arg(long = "margin-mm", default_value_t = 0.0)]
    margin_mm: f64,

    /// Grid as ROWSxCOLUMNS (e.g. 2x2, 2x1) or a preset: quad, stacked
    #[arg(long, default_value = "2x2", value_parser = parse::<Grid>)]
    grid: Grid,

    /// Sheet size: a4, a3, a5, letter, or WxH in millimeters
    #[arg(long, default_value = "a4", value_parser = parse::<PaperSize>)]
    paper: PaperSize,

    /// Print sheets in landscape orientation
    #[arg(long)]
    landscape: bool,

    /// Letterbox color for contain mode (#RRGGBB, #RGB or a name)
    #[arg(long, default_value = "white", value_parser = parse::<Background>)]
    background: Background,

    /// Resampling filter: lanczos3, catmull-rom, gaussian, triangle, nearest
    #[arg(long, default_value = "lanczos3", value_parser = parse::<ResampleFilter>)]
    filter: ResampleFilter,

    /// Tile image format: png or jpeg
    #[arg(long, default_value = "png", value_parser = parse::<RasterFormat>)]
    format: RasterFormat,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// Skip the per-tile PDF pages
    #[arg(long)]
    no_pdf: bool,

    /// Skip the README.txt assembly guide
    #[arg(long)]
    no_guide: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn job(&self) -> TileJob {
        let orientation = if self.landscape {
            PageOrientation::Landscape
        } else {
            PageOrientation::Portrait
        };
        TileJob::new(&self.input, &self.outdir)
            .prefix(&self.prefix)
            .dpi(self.dpi)
            .policy(self.mode)
            .margin_mm(self.margin_mm)
            .grid(self.grid)
            .paper(self.paper)
            .orientation(orientation)
            .background(self.background)
            .filter(self.filter)
            .format(self.format)
            .jpeg_quality(self.jpeg_quality)
            .pdf(!self.no_pdf)
            .guide(!self.no_guide)
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "zentile=debug" } else { "zentile=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let job = cli.job();
    let report = job
        .run()
        .with_context(|| format!("Failed to tile {}", cli.input.display()))?;

    let outdir = std::path::absolute(&report.outdir).unwrap_or_else(|_| report.outdir.clone());
    println!("Done. Output written to: {}", outdir.display());
    println!("Tiles:");
    let pdf = report.tiles.iter().any(|t| t.pdf.is_some());
    for tile in &report.tiles {
        let name = tile
            .raster
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if pdf {
            println!("  - {name} / .pdf");
        } else {
            println!("  - {name}");
        }
    }
    if let Some(guide) = &report.guide {
        println!("Assembly guide: {}", guide.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_build_default_job() {
        let cli = Cli::try_parse_from(["zentile", "in.jpg"]).unwrap();
        let job = cli.job();
        assert_eq!(job, TileJob::new("in.jpg", "./tiles").pdf(true));
    }

    #[test]
    fn stacked_landscape_options() {
        let cli = Cli::try_parse_from([
            "zentile",
            "in.jpg",
            "--grid",
            "stacked",
            "--landscape",
            "--dpi",
            "150",
            "--mode",
            "contain",
            "--no-pdf",
        ])
        .unwrap();
        let job = cli.job();
        assert_eq!(job.grid, Grid::STACKED);
        assert_eq!(job.orientation, PageOrientation::Landscape);
        assert_eq!(job.dpi, 150);
        assert_eq!(job.policy, FitPolicy::Contain);
        assert!(!job.pdf);
    }

    #[test]
    fn unknown_mode_is_rejected_at_parse_time() {
        let err = Cli::try_parse_from(["zentile", "in.jpg", "--mode", "stretch"]).unwrap_err();
        assert!(err.to_string().contains("invalid fit policy"));
    }
}
