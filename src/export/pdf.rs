//! One-page PDF per tile at true paper size.
//!
//! The page MediaBox is the sheet in points. The tile is drawn inside the
//! page minus the margin, scaled to fit with its aspect ratio preserved and
//! centered on the axis with slack. Pixels are embedded losslessly as an
//! 8-bit DeviceRGB image XObject with FlateDecode.

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::{Result, TileError};
use crate::paper::{PageOrientation, PaperSize, mm_to_pt};

/// Sheet and margin for PDF pages.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PdfPage {
    pub paper: PaperSize,
    pub orientation: PageOrientation,
    /// Blank border on every side, in millimeters.
    pub margin_mm: f64,
}

impl PdfPage {
    /// Page `(width, height)` in points.
    pub fn size_pt(&self) -> (f64, f64) {
        self.paper.dimensions_pt(self.orientation)
    }

    /// Drawable area inside the margins, in points (origin bottom-left).
    pub fn drawable(&self) -> Result<PdfRect> {
        let (pw, ph) = self.size_pt();
        let m = self.margin_mm;
        if !m.is_finite() || m < 0.0 {
            return Err(TileError::InvalidMargin(m));
        }
        let mpt = mm_to_pt(m);
        let (w, h) = (pw - 2.0 * mpt, ph - 2.0 * mpt);
        if w <= 0.0 || h <= 0.0 {
            return Err(TileError::InvalidMargin(m));
        }
        Ok(PdfRect {
            x: mpt,
            y: mpt,
            width: w,
            height: h,
        })
    }

    /// Where a `tile_w`×`tile_h` pixel image lands on the page.
    pub fn placement(&self, tile_w: u32, tile_h: u32) -> Result<PdfRect> {
        let area = self.drawable()?;
        let tile_ar = tile_w as f64 / tile_h as f64;
        let area_ar = area.width / area.height;
        let rect = if tile_ar > area_ar {
            // Fit by width.
            let height = area.width / tile_ar;
            PdfRect {
                x: area.x,
                y: area.y + (area.height - height) / 2.0,
                width: area.width,
                height,
            }
        } else {
            // Fit by height.
            let width = area.height * tile_ar;
            PdfRect {
                x: area.x + (area.width - width) / 2.0,
                y: area.y,
                width,
                height: area.height,
            }
        };
        Ok(rect)
    }
}

/// Rectangle in PDF points, origin bottom-left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PdfRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Name of the tile image in the page's XObject resources.
const IMAGE_NAME: &str = "Im0";

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

fn deflate(data: &[u8], path: &Path) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 4), Compression::default());
    encoder.write_all(data).map_err(|e| TileError::io(path, e))?;
    encoder.finish().map_err(|e| TileError::io(path, e))
}

/// Build the single-page document for `image`.
pub fn tile_document(image: &RgbImage, page: &PdfPage, title: &str, path: &Path) -> Result<Document> {
    let (pw, ph) = page.size_pt();
    let at = page.placement(image.width(), image.height())?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "FlateDecode",
        },
        deflate(image.as_raw(), path)?,
    )
    .with_compression(false);
    let image_id = doc.add_object(image_stream);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(at.width),
                    real(0.0),
                    real(0.0),
                    real(at.height),
                    real(at.x),
                    real(at.y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            IMAGE_NAME => image_id,
        },
    });
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(pw), real(ph)],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1_i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(concat!("zentile ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    Ok(doc)
}

/// Write `image` as a one-page PDF at `path`.
pub fn write_pdf(path: &Path, image: &RgbImage, page: &PdfPage, title: &str) -> Result<()> {
    let mut doc = tile_document(image, page, title, path)?;
    doc.save(path).map_err(|e| TileError::io(path, e))?;
    Ok(())
}
