//! Plain-text assembly guide written next to the tiles.

use std::path::Path;

use crate::error::{Result, TileError};
use crate::grid::{Grid, TileId};

/// What the guide describes.
#[derive(Clone, Debug)]
pub struct GuideInfo<'a> {
    pub prefix: &'a str,
    pub grid: Grid,
    /// Human-readable sheet, e.g. `A4 portrait`.
    pub sheet: String,
    pub dpi: u32,
    pub policy: &'a str,
    /// Raster extension without the dot.
    pub raster_ext: &'a str,
    pub with_pdf: bool,
    pub margin_mm: f64,
}

/// Render the guide text.
pub fn assembly_guide(info: &GuideInfo<'_>) -> String {
    let grid = info.grid;
    let exts = if info.with_pdf {
        format!("{}, pdf", info.raster_ext)
    } else {
        info.raster_ext.to_string()
    };

    let mut lines = vec![
        format!(
            "{}x{} {} tiling complete ({} dpi, {} fit).",
            grid.rows(),
            grid.columns(),
            info.sheet,
            info.dpi,
            info.policy
        ),
        String::new(),
        format!("Files ({exts}):"),
    ];
    lines.extend((0..grid.rows()).map(|row| {
        let names: Vec<String> = (0..grid.columns())
            .map(|column| format!("{}_{}.*", info.prefix, TileId::new(row, column)))
            .collect();
        format!("  - {}", names.join(", "))
    }));

    lines.push(String::new());
    lines.push("Printing tips:".to_string());
    lines.push(format!(
        "  1) For {} files: print at 100% scale using the DPI you chose ({}).",
        info.raster_ext.to_ascii_uppercase(),
        info.dpi
    ));
    let mut step = 2;
    if info.with_pdf {
        lines.push(format!(
            "  {step}) For PDFs: print with 'Actual size' (no scaling). Page margin: {} mm.",
            info.margin_mm
        ));
        step += 1;
    }
    lines.push(format!("  {step}) Arrange tiles as:"));
    lines.extend(arrangement(grid).lines().map(|line| format!("       {line}")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// ASCII layout of the grid, one label per cell.
///
/// ```text
/// r1c1 | r1c2
/// -----+-----
/// r2c1 | r2c2
/// ```
pub fn arrangement(grid: Grid) -> String {
    let width = grid
        .ids()
        .map(|id| id.to_string().len())
        .max()
        .unwrap_or(0);
    let columns = grid.columns() as usize;
    let separator = (0..columns)
        .map(|c| {
            let pad = usize::from(c > 0) + usize::from(c + 1 < columns);
            "-".repeat(width + pad)
        })
        .collect::<Vec<_>>()
        .join("+");

    let rows: Vec<String> = (0..grid.rows())
        .map(|row| {
            (0..grid.columns())
                .map(|column| format!("{:<width$}", TileId::new(row, column).to_string()))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        })
        .collect();
    rows.join(&format!("\n{separator}\n"))
}

/// Write the guide to `path`.
pub fn write_guide(path: &Path, info: &GuideInfo<'_>) -> Result<()> {
    std::fs::write(path, assembly_guide(info)).map_err(|e| TileError::io(path, e))
}
