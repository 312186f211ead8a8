//! Grid shape and poster canvas geometry.
//!
//! A poster is `rows × columns` cells, each cell one sheet of paper at the
//! chosen DPI. Cells are enumerated row-major: row 0 left to right, then
//! row 1, and so on.

use core::fmt;
use core::str::FromStr;

use crate::error::{Result, TileError};
use crate::geometry::{Rect, Size};
use crate::paper::{PageOrientation, PaperSize};

/// Number of rows and columns of sheets in the poster.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: u32,
    columns: u32,
}

impl Grid {
    /// Two sheets stacked vertically (upper and lower halves).
    pub const STACKED: Self = Self {
        rows: 2,
        columns: 1,
    };

    /// Two by two sheets.
    pub const QUAD: Self = Self {
        rows: 2,
        columns: 2,
    };

    /// Create a grid; both axes must be at least 1.
    pub fn new(rows: u32, columns: u32) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(TileError::InvalidGrid { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub const fn rows(self) -> u32 {
        self.rows
    }

    pub const fn columns(self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    pub const fn len(self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Grids always have at least one cell.
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Every cell identity, row-major.
    pub fn ids(self) -> impl Iterator<Item = TileId> {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |column| TileId { row, column }))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::QUAD
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

impl FromStr for Grid {
    type Err = TileError;

    /// Accepts `RxC` (rows by columns) or a preset name.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "stacked" => return Ok(Self::STACKED),
            "quad" => return Ok(Self::QUAD),
            _ => {}
        }
        let (r, c) = lower
            .split_once(['x', '×'])
            .ok_or_else(|| TileError::InvalidGridText(s.to_string()))?;
        let rows = r
            .trim()
            .parse::<u32>()
            .map_err(|_| TileError::InvalidGridText(s.to_string()))?;
        let columns = c
            .trim()
            .parse::<u32>()
            .map_err(|_| TileError::InvalidGridText(s.to_string()))?;
        Self::new(rows, columns)
    }
}

/// Zero-based position of a tile in the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    pub row: u32,
    pub column: u32,
}

impl TileId {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// One-based `r{row}c{col}` label, as used in file names.
impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.column + 1)
    }
}

/// Poster geometry: the cell size and the grid laid over it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSpec {
    pub cell: Size,
    pub grid: Grid,
}

impl CanvasSpec {
    pub fn new(cell: Size, grid: Grid) -> Result<Self> {
        let spec = Self {
            cell: cell.non_zero()?,
            grid,
        };
        spec.poster()?;
        Ok(spec)
    }

    /// Canvas for `grid` sheets of `paper` at `dpi`.
    pub fn for_paper(
        paper: PaperSize,
        orientation: PageOrientation,
        dpi: u32,
        grid: Grid,
    ) -> Result<Self> {
        Self::new(paper.cell_pixels(orientation, dpi)?, grid)
    }

    /// Full poster size: `columns × cell width` by `rows × cell height`.
    pub fn poster(&self) -> Result<Size> {
        let width = self.cell.width.checked_mul(self.grid.columns);
        let height = self.cell.height.checked_mul(self.grid.rows);
        match (width, height) {
            (Some(width), Some(height)) => Ok(Size::new(width, height)),
            _ => Err(TileError::InvalidDimensions {
                width: self.cell.width.saturating_mul(self.grid.columns),
                height: self.cell.height.saturating_mul(self.grid.rows),
            }),
        }
    }

    /// Canvas rectangle of one cell.
    pub fn cell_rect(&self, id: TileId) -> Rect {
        Rect::new(
            id.column * self.cell.width,
            id.row * self.cell.height,
            self.cell.width,
            self.cell.height,
        )
    }

    /// All cells with their rectangles, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (TileId, Rect)> + '_ {
        self.grid.ids().map(|id| (id, self.cell_rect(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Grid ────────────────────────────────────────────────────────────

    #[test]
    fn zero_axis_rejected() {
        assert!(matches!(
            Grid::new(0, 2),
            Err(TileError::InvalidGrid {
                rows: 0,
                columns: 2
            })
        ));
        assert!(matches!(Grid::new(2, 0), Err(TileError::InvalidGrid { .. })));
    }

    #[test]
    fn parse_forms() {
        assert_eq!("2x2".parse::<Grid>().unwrap(), Grid::QUAD);
        assert_eq!("2X1".parse::<Grid>().unwrap(), Grid::STACKED);
        assert_eq!("stacked".parse::<Grid>().unwrap(), Grid::STACKED);
        assert_eq!("3 x 4".parse::<Grid>().unwrap(), Grid::new(3, 4).unwrap());
        assert!(matches!("0x3".parse::<Grid>(), Err(TileError::InvalidGrid { .. })));
        assert!(matches!("two".parse::<Grid>(), Err(TileError::InvalidGridText(_))));
        assert!(matches!("2x".parse::<Grid>(), Err(TileError::InvalidGridText(_))));
    }

    #[test]
    fn ids_are_row_major() {
        let ids: Vec<_> = Grid::new(2, 3).unwrap().ids().collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], TileId::new(0, 0));
        assert_eq!(ids[2], TileId::new(0, 2));
        assert_eq!(ids[3], TileId::new(1, 0));
    }

    #[test]
    fn tile_label_is_one_based() {
        assert_eq!(TileId::new(0, 1).to_string(), "r1c2");
    }

    // ── CanvasSpec ──────────────────────────────────────────────────────

    #[test]
    fn quad_a4_poster() {
        let spec =
            CanvasSpec::for_paper(PaperSize::A4, PageOrientation::Portrait, 300, Grid::QUAD)
                .unwrap();
        assert_eq!(spec.cell, Size::new(2480, 3508));
        assert_eq!(spec.poster().unwrap(), Size::new(4960, 7016));
        assert_eq!(
            spec.cell_rect(TileId::new(1, 1)),
            Rect::new(2480, 3508, 2480, 3508)
        );
    }

    #[test]
    fn stacked_landscape_at_150_dpi() {
        let spec = CanvasSpec::for_paper(
            PaperSize::A4,
            PageOrientation::Landscape,
            150,
            Grid::STACKED,
        )
        .unwrap();
        assert_eq!(spec.poster().unwrap(), Size::new(1754, 2480));
        let rects: Vec<_> = spec.cells().map(|(_, r)| r).collect();
        assert_eq!(rects, vec![
            Rect::new(0, 0, 1754, 1240),
            Rect::new(0, 1240, 1754, 1240)
        ]);
    }

    #[test]
    fn cells_tile_the_poster_exactly() {
        let spec = CanvasSpec::new(Size::new(7, 5), Grid::new(3, 4).unwrap()).unwrap();
        let poster = spec.poster().unwrap();
        let rects: Vec<_> = spec.cells().map(|(_, r)| r).collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
        let area: u64 = rects.iter().map(|r| r.size().area()).sum();
        assert_eq!(area, poster.area());
        assert!(rects.iter().all(|r| r.right() <= poster.width && r.bottom() <= poster.height));
    }

    #[test]
    fn oversized_poster_rejected() {
        let err = CanvasSpec::new(Size::new(u32::MAX, 1), Grid::new(1, 2).unwrap()).unwrap_err();
        assert!(matches!(err, TileError::InvalidDimensions { .. }));
    }
}
