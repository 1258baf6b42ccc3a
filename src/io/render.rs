//! Console rendering of a tile grid

use std::io::Write;

use crate::spatial::grid::TileGrid;

/// Render the grid as text, each glyph followed by a space, one line per row
pub fn render_text(grid: &TileGrid) -> String {
    let mut text = String::with_capacity(grid.rows() * (grid.cols() * 2 + 1));
    for row in grid.row_iter() {
        for tile in row {
            text.push(tile);
            text.push(' ');
        }
        text.push('\n');
    }
    text
}

/// Write the rendered grid to `output`
///
/// # Errors
///
/// Returns an error if writing to `output` fails
pub fn write_grid<W: Write>(grid: &TileGrid, output: &mut W) -> std::io::Result<()> {
    output.write_all(render_text(grid).as_bytes())?;
    output.flush()
}
