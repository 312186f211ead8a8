//! End-to-end runs of [`TileJob`] against a temporary directory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;
use zentile::export::raster::dpi_to_ppm;
use zentile::*;

fn write_source(dir: &Path, w: u32, h: u32) -> std::path::PathBuf {
    let path = dir.join("source.png");
    RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]))
        .save(&path)
        .unwrap();
    path
}

fn png_info(path: &Path) -> (u32, u32, Option<png::PixelDimensions>) {
    let decoder = png::Decoder::new(BufReader::new(File::open(path).unwrap()));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height, info.pixel_dims)
}

#[test]
fn quad_a4_writes_tiles_pdfs_and_guide() {
    let tmp = TempDir::new().unwrap();
    let input = write_source(tmp.path(), 100, 150);
    let outdir = tmp.path().join("out");

    // A4 at 30 dpi: 248x351 per sheet.
    let report = TileJob::new(&input, &outdir)
        .dpi(30)
        .filter(ResampleFilter::Triangle)
        .run()
        .unwrap();

    assert_eq!(report.canvas.cell, Size::new(248, 351));
    assert_eq!(report.layout.canvas, Size::new(496, 702));
    assert_eq!(report.tiles.len(), 4);

    for tile in &report.tiles {
        let (w, h, dims) = png_info(&tile.raster);
        assert_eq!((w, h), (248, 351));
        let dims = dims.expect("pHYs chunk");
        assert_eq!(dims.xppu, dpi_to_ppm(30));
        assert_eq!(dims.yppu, dpi_to_ppm(30));
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    let names: Vec<String> = report
        .files()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    #[cfg(feature = "pdf")]
    assert_eq!(
        names,
        [
            "tile_r1c1.png",
            "tile_r1c1.pdf",
            "tile_r1c2.png",
            "tile_r1c2.pdf",
            "tile_r2c1.png",
            "tile_r2c1.pdf",
            "tile_r2c2.png",
            "tile_r2c2.pdf",
            "README.txt",
        ]
    );
    #[cfg(not(feature = "pdf"))]
    assert_eq!(
        names,
        [
            "tile_r1c1.png",
            "tile_r1c2.png",
            "tile_r2c1.png",
            "tile_r2c2.png",
            "README.txt",
        ]
    );
    assert!(report.files().iter().all(|p| p.is_file()));

    let guide = std::fs::read_to_string(outdir.join("README.txt")).unwrap();
    assert!(guide.starts_with("2x2 A4 portrait tiling complete (30 dpi, cover fit)."));
    assert!(guide.contains("tile_r2c1.*, tile_r2c2.*"));
    assert!(guide.contains("r1c1 | r1c2"));
}

#[cfg(feature = "pdf")]
#[test]
fn pdf_pages_have_paper_media_box() {
    let tmp = TempDir::new().unwrap();
    let input = write_source(tmp.path(), 60, 40);
    let report = TileJob::new(&input, tmp.path())
        .grid(Grid::STACKED)
        .orientation(PageOrientation::Landscape)
        .dpi(20)
        .guide(false)
        .run()
        .unwrap();

    assert!(report.guide.is_none());
    for tile in &report.tiles {
        let doc = lopdf::Document::load(tile.pdf.as_ref().unwrap()).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page = doc.get_dictionary(pages[&1]).unwrap();
        let media = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let w = media[2].as_float().unwrap();
        let h = media[3].as_float().unwrap();
        // Landscape A4 in points.
        assert!((w - 841.89).abs() < 0.01, "{w}");
        assert!((h - 595.28).abs() < 0.01, "{h}");
    }
}

#[test]
fn jpeg_contain_without_pdf() {
    let tmp = TempDir::new().unwrap();
    let input = write_source(tmp.path(), 300, 60);
    let report = TileJob::new(&input, tmp.path().join("jpeg"))
        .prefix("banner")
        .dpi(20)
        .policy(FitPolicy::Contain)
        .background("black".parse().unwrap())
        .format(RasterFormat::Jpeg)
        .jpeg_quality(80)
        .pdf(false)
        .run()
        .unwrap();

    // Wide source under contain leaves letterbox rows at top and bottom.
    assert!(report.layout.needs_padding());
    assert_eq!(report.layout.placement.0, 0);
    for tile in &report.tiles {
        assert!(tile.pdf.is_none());
        assert_eq!(tile.raster.extension().unwrap(), "jpg");
        let name = tile.raster.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("banner_r"), "{name}");
        let img = image::open(&tile.raster).unwrap();
        assert_eq!(
            (img.width(), img.height()),
            (report.canvas.cell.width, report.canvas.cell.height)
        );
    }

    let guide = std::fs::read_to_string(report.guide.as_ref().unwrap()).unwrap();
    assert!(guide.contains("Files (jpg):"));
    assert!(!guide.contains("PDFs"));
}

#[test]
fn unreadable_input_is_reported() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("broken.png");
    std::fs::write(&input, b"not an image").unwrap();
    let err = TileJob::new(&input, tmp.path().join("out"))
        .dpi(10)
        .run()
        .unwrap_err();
    assert!(matches!(err, TileError::UnreadableImage { .. }), "{err}");
}

#[test]
fn quad_a4_at_300_dpi_renders_full_sheets() {
    let source = RgbImage::from_fn(1000, 1500, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));
    let job = TileJob::new("unused.png", "unused").filter(ResampleFilter::Nearest);
    let (layout, tiles) = job.render(&source).unwrap();

    // Cover: scale 4.96 overshoots the poster height, 424 rows cropped.
    assert_eq!(layout.scaled, Size::new(4960, 7440));
    assert_eq!(layout.crop.unwrap().y, 212);
    assert_eq!(tiles.len(), 4);
    assert!(tiles.iter().all(|t| t.image.dimensions() == (2480, 3508)));
}
