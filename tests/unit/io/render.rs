//! Tests for console rendering of the grid

#[cfg(test)]
mod tests {
    use roomgraph::io::render::{render_text, write_grid};
    use roomgraph::spatial::geometry::Point;
    use roomgraph::spatial::grid::TileGrid;

    // Tests each glyph is followed by a space and each row ends the line
    // Verified by joining glyphs without separators
    #[test]
    fn test_render_text_layout() {
        let mut grid = TileGrid::new(2, 3, '.');
        grid.set(Point::new(0, 0), '@');
        grid.set(Point::new(2, 1), 'E');

        assert_eq!(render_text(&grid), "@ . . \n. . E \n");
    }

    // Tests an empty grid renders to nothing
    // Verified by emitting a newline per column
    #[test]
    fn test_render_empty_grid() {
        assert_eq!(render_text(&TileGrid::new(0, 0, ' ')), "");
    }

    // Tests writing produces the same text as rendering
    // Verified by skipping the last row
    #[test]
    fn test_write_grid_matches_render() {
        let grid = TileGrid::new(3, 4, '#');
        let mut buffer = Vec::new();

        write_grid(&grid, &mut buffer).expect("writing to a buffer cannot fail");

        assert_eq!(String::from_utf8(buffer).ok(), Some(render_text(&grid)));
    }
}
