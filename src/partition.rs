//! Tile partitioner: slices a fitted poster into page-sized tiles.

use image::RgbImage;
use image::imageops;
use tracing::debug;

use crate::error::{Result, TileError};
use crate::geometry::{Rect, Size};
use crate::grid::{CanvasSpec, Grid, TileId};

/// One page-sized piece of the poster.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub id: TileId,
    /// Where the tile sits on the poster.
    pub rect: Rect,
    pub image: RgbImage,
}

/// Slice `canvas` into `rows × columns` equal tiles, row-major.
pub fn partition(canvas: &RgbImage, rows: u32, columns: u32) -> Result<Vec<Tile>> {
    partition_grid(canvas, Grid::new(rows, columns)?)
}

/// Slice `canvas` into one tile per cell of `grid`, row-major.
///
/// The canvas must be an exact multiple of the grid on both axes.
pub fn partition_grid(canvas: &RgbImage, grid: Grid) -> Result<Vec<Tile>> {
    let (width, height) = canvas.dimensions();
    if width % grid.columns() != 0 || height % grid.rows() != 0 {
        return Err(TileError::DimensionMismatch {
            canvas_width: width,
            canvas_height: height,
            rows: grid.rows(),
            columns: grid.columns(),
        });
    }
    let spec = CanvasSpec::new(
        Size::new(width / grid.columns(), height / grid.rows()),
        grid,
    )?;
    debug!(canvas = %Size::new(width, height), cell = %spec.cell, %grid, "partitioning poster");

    let tiles = spec
        .cells()
        .map(|(id, rect)| Tile {
            id,
            rect,
            image: imageops::crop_imm(canvas, rect.x, rect.y, rect.width, rect.height).to_image(),
        })
        .collect();
    Ok(tiles)
}

/// Paste tiles back at their grid offsets.
///
/// Expects exactly one equally sized tile per cell of `grid`, each id once.
pub fn reassemble(tiles: &[Tile], grid: Grid) -> Result<RgbImage> {
    let first = tiles.first().ok_or(TileError::InvalidGrid {
        rows: grid.rows(),
        columns: grid.columns(),
    })?;
    let cell = Size::new(first.image.width(), first.image.height());
    let spec = CanvasSpec::new(cell, grid)?;
    let poster = spec.poster()?;

    let mismatch = || TileError::DimensionMismatch {
        canvas_width: poster.width,
        canvas_height: poster.height,
        rows: grid.rows(),
        columns: grid.columns(),
    };
    if tiles.len() != grid.len() {
        return Err(mismatch());
    }

    let mut seen = vec![false; grid.len()];
    let mut canvas = RgbImage::new(poster.width, poster.height);
    for tile in tiles {
        if tile.id.row >= grid.rows()
            || tile.id.column >= grid.columns()
            || tile.image.dimensions() != (cell.width, cell.height)
        {
            return Err(mismatch());
        }
        let slot = tile.id.row as usize * grid.columns() as usize + tile.id.column as usize;
        if std::mem::replace(&mut seen[slot], true) {
            return Err(mismatch());
        }
        let rect = spec.cell_rect(tile.id);
        imageops::replace(&mut canvas, &tile.image, rect.x as i64, rect.y as i64);
    }
    Ok(canvas)
}
