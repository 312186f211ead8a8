//! Pixel provenance through fit and partition.
//!
//! Every source pixel encodes its own (x, y) in the red and green channels,
//! so a wrong crop, wrong placement or wrong tile origin shows up as a
//! mismatched coordinate. Sizes are chosen so no resampling happens and the
//! check is exact.

use image::{Rgb, RgbImage};
use zentile::*;

/// Marker in the blue channel: source pixels carry it, the letterbox does not.
const SOURCE_MARK: u8 = 7;

fn coded(w: u32, h: u32) -> RgbImage {
    assert!(w < 255 && h < 255);
    RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, SOURCE_MARK]))
}

/// Source coordinate stored in `px`, or `None` for letterbox fill.
fn origin(px: &Rgb<u8>) -> Option<(u32, u32)> {
    (px[2] == SOURCE_MARK).then(|| (px[0] as u32, px[1] as u32))
}

fn opts() -> FitOptions {
    FitOptions {
        filter: ResampleFilter::Nearest,
        background: Background::rgb(255, 255, 255),
    }
}

// ── cover ──

#[test]
fn cover_crops_symmetrically_on_the_long_axis() {
    // 40x60 into 40x30: scale 1, 30 rows of overflow, 15 cropped from the top.
    let out = fit(&coded(40, 60), 40, 30, FitPolicy::Cover, &opts()).unwrap();
    assert_eq!(out.dimensions(), (40, 30));
    for (x, y, px) in out.enumerate_pixels() {
        assert_eq!(origin(px), Some((x, y + 15)), "at ({x},{y})");
    }
}

#[test]
fn cover_odd_overflow_rounds_offset_down() {
    // 41 columns into 40: one column of overflow, offset 0, last column lost.
    let out = fit(&coded(41, 30), 40, 30, FitPolicy::Cover, &opts()).unwrap();
    assert_eq!(origin(out.get_pixel(0, 0)), Some((0, 0)));
    assert_eq!(origin(out.get_pixel(39, 29)), Some((39, 29)));
}

// ── contain ──

#[test]
fn contain_places_whole_source_centered() {
    // 40x20 into 40x30: scale 1, 10 rows of letterbox split 5 / 5.
    let out = fit(&coded(40, 20), 40, 30, FitPolicy::Contain, &opts()).unwrap();
    assert_eq!(out.dimensions(), (40, 30));
    for (x, y, px) in out.enumerate_pixels() {
        let expected = (5..25).contains(&y).then_some((x, y.wrapping_sub(5)));
        assert_eq!(origin(px), expected, "at ({x},{y})");
    }
}

#[test]
fn contain_odd_letterbox_puts_extra_on_far_side() {
    // 20x30 into 23x30: 3 columns of letterbox, 1 left and 2 right.
    let out = fit(&coded(20, 30), 23, 30, FitPolicy::Contain, &opts()).unwrap();
    assert_eq!(origin(out.get_pixel(0, 0)), None);
    assert_eq!(origin(out.get_pixel(1, 0)), Some((0, 0)));
    assert_eq!(origin(out.get_pixel(20, 0)), Some((19, 0)));
    assert_eq!(origin(out.get_pixel(21, 0)), None);
    assert_eq!(origin(out.get_pixel(22, 0)), None);
}

#[test]
fn every_source_pixel_survives_contain() {
    let src = coded(30, 12);
    let out = fit(&src, 36, 18, FitPolicy::Contain, &opts()).unwrap();
    let mut seen = vec![false; 30 * 12];
    for px in out.pixels() {
        if let Some((x, y)) = origin(px) {
            seen[(y * 30 + x) as usize] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

// ── partition ──

#[test]
fn tiles_carry_their_own_region_of_the_poster() {
    let poster = fit(&coded(60, 80), 60, 40, FitPolicy::Cover, &opts()).unwrap();
    let tiles = partition(&poster, 2, 3).unwrap();
    assert_eq!(tiles.len(), 6);

    for tile in &tiles {
        assert_eq!(tile.image.dimensions(), (20, 20));
        assert_eq!(tile.rect.x, tile.id.column * 20);
        assert_eq!(tile.rect.y, tile.id.row * 20);
        for (x, y, px) in tile.image.enumerate_pixels() {
            // Cover cropped 20 rows from the top of the 60x80 source.
            let want = (tile.rect.x + x, tile.rect.y + y + 20);
            assert_eq!(origin(px), Some(want), "tile {} at ({x},{y})", tile.id);
        }
    }
}

#[test]
fn tiles_are_row_major() {
    let tiles = partition(&coded(40, 40), 2, 2).unwrap();
    let labels: Vec<String> = tiles.iter().map(|t| t.id.to_string()).collect();
    assert_eq!(labels, ["r1c1", "r1c2", "r2c1", "r2c2"]);
}

#[test]
fn reassemble_restores_fitted_poster() {
    let poster = fit(&coded(50, 30), 48, 36, FitPolicy::Contain, &opts()).unwrap();
    let grid = Grid::new(3, 4).unwrap();
    let tiles = partition_grid(&poster, grid).unwrap();
    assert_eq!(reassemble(&tiles, grid).unwrap(), poster);
}
