//! PNG export of a tile grid, one colour block per cell

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::io::configuration::Palette;
use crate::io::error::{GenerationError, Result};
use crate::spatial::grid::TileGrid;

const EMPTY: [u8; 4] = [0, 0, 0, 0];
const FLOOR: [u8; 4] = [196, 190, 172, 255];
const WALL: [u8; 4] = [64, 68, 82, 255];
const CORRIDOR_WALL: [u8; 4] = [112, 84, 58, 255];
const CORRIDOR: [u8; 4] = [168, 142, 104, 255];
const PENDING: [u8; 4] = [214, 64, 214, 255];
const DOOR: [u8; 4] = [222, 132, 36, 255];
const PLAYER: [u8; 4] = [46, 184, 74, 255];
const EXIT: [u8; 4] = [204, 44, 44, 255];
const TREASURE: [u8; 4] = [246, 206, 32, 255];
const EXPLORED: [u8; 4] = [142, 186, 226, 255];
const UNKNOWN: [u8; 4] = [255, 255, 255, 255];

/// Colour of a tile glyph
///
/// Room wall digits and the boxed wall glyphs share one colour, rectangular
/// corridor letters another.
pub fn tile_color(tile: char, palette: &Palette) -> [u8; 4] {
    match tile {
        t if t == palette.empty => EMPTY,
        t if t == palette.floor => FLOOR,
        t if palette.is_wall(t) => WALL,
        t if t.is_ascii_lowercase() => CORRIDOR_WALL,
        t if t == palette.corridor => CORRIDOR,
        t if t == palette.pending_door => PENDING,
        t if t == palette.door => DOOR,
        t if t == palette.player => PLAYER,
        t if t == palette.exit => EXIT,
        t if t == palette.treasure => TREASURE,
        t if t == palette.explored => EXPLORED,
        _ => UNKNOWN,
    }
}

/// Render the grid as an image with `cell_size` pixels per cell
pub fn render_grid_image(grid: &TileGrid, palette: &Palette, cell_size: u32) -> RgbaImage {
    let cell_size = cell_size.max(1);
    let mut img = RgbaImage::new(
        grid.cols() as u32 * cell_size,
        grid.rows() as u32 * cell_size,
    );

    for (point, tile) in grid.cells() {
        let color = Rgba(tile_color(tile, palette));
        let left = point.x as u32 * cell_size;
        let top = point.y as u32 * cell_size;
        for dy in 0..cell_size {
            for dx in 0..cell_size {
                img.put_pixel(left + dx, top + dy, color);
            }
        }
    }

    img
}

/// Export the grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &TileGrid,
    palette: &Palette,
    cell_size: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid_image(grid, palette, cell_size);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
