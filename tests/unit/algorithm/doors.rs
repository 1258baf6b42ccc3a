//! Tests for door resolution under both wall styles

#[cfg(test)]
mod tests {
    use roomgraph::algorithm::doors::resolve_doors;
    use roomgraph::io::configuration::{CorridorStrategy, Palette};
    use roomgraph::spatial::geometry::{Point, Rect};
    use roomgraph::spatial::grid::{TileGrid, WallGlyphs};

    fn boxed(palette: &Palette) -> WallGlyphs {
        WallGlyphs::Boxed {
            horizontal: palette.horizontal_wall,
            vertical: palette.vertical_wall,
        }
    }

    // Tests a straight corridor yields one door on each room wall it crosses
    // Verified by counting the corridor's own wall cells as neighbours of the corners
    #[test]
    fn test_rectangular_doors() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(20, 12, palette.empty);
        let upper = Rect::new(2, 2, 6, 6);
        let lower = Rect::new(2, 10, 6, 6);
        grid.paint_room(&Rect::new(3, 7, 3, 4), WallGlyphs::Uniform('a'), palette.floor);
        grid.paint_room(&upper, WallGlyphs::Uniform('0'), palette.floor);
        grid.paint_room(&lower, WallGlyphs::Uniform('1'), palette.floor);

        let doors = resolve_doors(&mut grid, &palette, CorridorStrategy::Rectangular);

        assert_eq!(doors, vec![Point::new(4, 7), Point::new(4, 10)]);
        assert_eq!(grid.get(Point::new(4, 7)), Some('%'));
        assert_eq!(grid.get(Point::new(4, 10)), Some('%'));
        assert_eq!(grid.get(Point::new(3, 7)), Some('0'));
        assert_eq!(grid.count('%'), 2);
    }

    // Tests a bent corridor between facing walls opens both walls and clears the pending marks
    // Verified by leaving the pending marks in place
    #[test]
    fn test_bent_doors() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(12, 24, palette.empty);
        grid.paint_room(&Rect::new(2, 2, 7, 5), boxed(&palette), palette.floor);
        grid.paint_room(&Rect::new(14, 2, 7, 5), boxed(&palette), palette.floor);
        for x in 9..=13 {
            grid.set(Point::new(x, 4), palette.corridor);
        }
        grid.set(Point::new(9, 4), palette.pending_door);
        grid.set(Point::new(13, 4), palette.pending_door);

        let doors = resolve_doors(&mut grid, &palette, CorridorStrategy::BentWalk);

        assert_eq!(doors, vec![Point::new(8, 4), Point::new(14, 4)]);
        assert_eq!(grid.count('?'), 0);
        assert_eq!(grid.count('#'), 5);
        assert_eq!(grid.get(Point::new(9, 4)), Some('#'));
        assert_eq!(grid.get(Point::new(8, 3)), Some('|'));
    }

    // Tests a corridor reaching a wall cell beside a corner opens it when the other wall already has a door there
    // Verified by counting only floor and wall glyphs on the diagonals
    #[test]
    fn test_bent_door_next_to_existing_corner_door() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(10, 12, palette.empty);
        grid.paint_room(&Rect::new(2, 2, 8, 6), boxed(&palette), palette.floor);
        grid.set(Point::new(2, 3), palette.door);
        grid.set(Point::new(1, 3), palette.corridor);
        grid.set(Point::new(3, 1), palette.pending_door);

        let doors = resolve_doors(&mut grid, &palette, CorridorStrategy::BentWalk);

        assert_eq!(doors, vec![Point::new(3, 2)]);
        assert_eq!(grid.get(Point::new(3, 1)), Some('#'));
        assert_eq!(grid.get(Point::new(2, 2)), Some('-'));
        assert_eq!(grid.count('%'), 2);
        assert_eq!(grid.count('?'), 0);
    }

    // Tests pending marks that never met a wall still become corridor tiles
    // Verified by demoting only the neighbours of doors
    #[test]
    fn test_leftover_pending_is_demoted() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(10, 10, palette.empty);
        grid.set(Point::new(5, 5), palette.pending_door);

        let doors = resolve_doors(&mut grid, &palette, CorridorStrategy::BentWalk);

        assert!(doors.is_empty());
        assert_eq!(grid.get(Point::new(5, 5)), Some('#'));
    }

    // Tests a rectangular scan never touches pending marks or plain walls
    // Verified by running the bent demotion for every style
    #[test]
    fn test_rectangular_scan_without_corridors() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(10, 10, palette.empty);
        grid.paint_room(&Rect::new(1, 1, 6, 6), WallGlyphs::Uniform('0'), palette.floor);
        grid.set(Point::new(8, 8), palette.pending_door);
        let before = grid.fingerprint();

        let doors = resolve_doors(&mut grid, &palette, CorridorStrategy::Rectangular);

        assert!(doors.is_empty());
        assert_eq!(grid.fingerprint(), before);
    }

    // Tests cells on the outer ring are never considered
    // Verified by scanning the full grid
    #[test]
    fn test_outer_ring_is_skipped() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(6, 6, palette.empty);
        grid.set(Point::new(0, 2), '0');
        grid.set(Point::new(1, 1), 'a');
        grid.set(Point::new(1, 3), 'b');

        let doors = resolve_doors(&mut grid, &palette, CorridorStrategy::Rectangular);

        assert!(doors.is_empty());
        assert_eq!(grid.get(Point::new(0, 2)), Some('0'));
    }
}
