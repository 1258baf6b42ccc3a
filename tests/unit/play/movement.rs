//! Tests for player movement and session state

#[cfg(test)]
mod tests {
    use roomgraph::generate_level;
    use roomgraph::io::configuration::{LevelConfig, Palette};
    use roomgraph::play::movement::{Command, MoveOutcome, Session, is_traversable, step};
    use roomgraph::spatial::geometry::{Direction, Point, Rect};
    use roomgraph::spatial::grid::{TileGrid, WallGlyphs};

    /// One boxed room with a door on its east wall leading into a short corridor
    fn session() -> Session {
        let palette = Palette::default();
        let room = Rect::new(0, 0, 6, 5);
        let mut grid = TileGrid::new(7, 10, palette.empty);
        grid.paint_room(
            &room,
            WallGlyphs::Boxed {
                horizontal: palette.horizontal_wall,
                vertical: palette.vertical_wall,
            },
            palette.floor,
        );
        grid.set(Point::new(5, 2), palette.door);
        grid.set(Point::new(6, 2), palette.corridor);
        grid.set(Point::new(7, 2), palette.corridor);
        grid.set(Point::new(4, 1), palette.exit);
        grid.set(Point::new(3, 3), palette.treasure);
        grid.set(Point::new(1, 2), palette.player);

        Session::from_parts(grid, palette, vec![room], Point::new(1, 2), palette.floor)
    }

    fn walk(session: &mut Session, direction: Direction, steps: usize) -> Vec<MoveOutcome> {
        (0..steps).map(|_| session.move_player(direction)).collect()
    }

    // Tests walking through a door into a corridor restores every tile left behind
    // Verified by clearing vacated cells to floor
    #[test]
    fn test_walk_through_door() {
        let mut session = session();

        let outcomes = walk(&mut session, Direction::East, 5);

        assert!(outcomes.iter().all(|&outcome| outcome == MoveOutcome::Moved));
        assert_eq!(session.player(), Point::new(6, 2));
        assert_eq!(session.grid().get(Point::new(6, 2)), Some('@'));
        assert_eq!(session.grid().get(Point::new(5, 2)), Some('%'));
        assert_eq!(session.grid().get(Point::new(1, 2)), Some('.'));
        assert_eq!(session.grid().count('@'), 1);
        assert_eq!(session.current_room(), None);

        assert_eq!(session.move_player(Direction::West), MoveOutcome::Moved);
        assert_eq!(session.current_room(), Some(0));
        assert_eq!(session.grid().get(Point::new(6, 2)), Some('#'));
    }

    // Tests walls and empty space block movement without changing the grid
    // Verified by moving onto any non-floor tile
    #[test]
    fn test_blocked_moves() {
        let mut session = session();
        let before = session.grid().fingerprint();

        assert_eq!(session.move_player(Direction::West), MoveOutcome::Blocked);
        assert_eq!(session.player(), Point::new(1, 2));
        assert_eq!(session.grid().fingerprint(), before);

        let _ = walk(&mut session, Direction::East, 6);
        assert_eq!(session.player(), Point::new(7, 2));
        assert_eq!(session.move_player(Direction::East), MoveOutcome::Blocked);
        assert_eq!(MoveOutcome::Blocked.message(), Some("Invalid move"));
    }

    // Tests moves off the grid are reported separately from blocked moves
    // Verified by treating off-grid reads as walls
    #[test]
    fn test_out_of_bounds() {
        let palette = Palette::default();
        let mut grid = TileGrid::new(1, 2, palette.floor);
        grid.set(Point::new(0, 0), palette.player);
        let mut session =
            Session::from_parts(grid, palette, Vec::new(), Point::new(0, 0), palette.floor);

        assert_eq!(session.move_player(Direction::North), MoveOutcome::OutOfBounds);
        assert_eq!(session.move_player(Direction::West), MoveOutcome::OutOfBounds);
        assert_eq!(session.move_player(Direction::East), MoveOutcome::Moved);
        assert_eq!(MoveOutcome::OutOfBounds.message(), Some("Out of bounds"));
    }

    // Tests picking up the treasure leaves floor behind
    // Verified by restoring the treasure glyph when the player leaves
    #[test]
    fn test_find_treasure() {
        let mut session = session();
        let _ = walk(&mut session, Direction::East, 2);

        assert_eq!(session.move_player(Direction::South), MoveOutcome::FoundTreasure);
        assert!(session.has_treasure());
        assert!(!session.is_finished());

        assert_eq!(session.move_player(Direction::North), MoveOutcome::Moved);
        assert_eq!(session.grid().get(Point::new(3, 3)), Some('.'));
        assert_eq!(session.grid().count('T'), 0);
    }

    // Tests reaching the exit wins and ends the session
    // Verified by continuing to accept moves after winning
    #[test]
    fn test_reach_exit() {
        let mut session = session();
        let _ = walk(&mut session, Direction::East, 3);

        let outcome = session.move_player(Direction::North);

        assert_eq!(outcome, MoveOutcome::Won);
        assert!(outcome.is_terminal());
        assert_eq!(outcome.message(), Some("You win!"));
        assert!(session.is_finished());
        assert_eq!(session.player(), Point::new(4, 1));
        assert_eq!(session.move_player(Direction::South), MoveOutcome::Blocked);
        assert_eq!(session.player(), Point::new(4, 1));
    }

    // Tests key parsing and the quit command
    // Verified by mapping unknown keys to quit
    #[test]
    fn test_commands() {
        assert_eq!(Command::from_key('q'), Some(Command::Quit));
        assert_eq!(Command::from_key('w'), Some(Command::Move(Direction::North)));
        assert_eq!(Command::from_key('D'), Some(Command::Move(Direction::East)));
        assert_eq!(Command::from_key('x'), None);

        let mut session = session();
        assert_eq!(session.apply(Command::Quit), MoveOutcome::Quit);
        assert!(session.is_finished());
        assert!(MoveOutcome::Quit.is_terminal());
        assert!(!MoveOutcome::FoundTreasure.is_terminal());
        assert_eq!(MoveOutcome::Moved.message(), None);
    }

    // Tests walkable tiles and single steps
    // Verified by allowing walls
    #[test]
    fn test_is_traversable() {
        let session = session();
        let palette = Palette::default();
        let grid = session.grid();

        assert!(is_traversable(grid, &palette, Point::new(2, 2)));
        assert!(is_traversable(grid, &palette, Point::new(5, 2)));
        assert!(is_traversable(grid, &palette, Point::new(6, 2)));
        assert!(!is_traversable(grid, &palette, Point::new(0, 2)));
        assert!(!is_traversable(grid, &palette, Point::new(9, 6)));
        assert!(!is_traversable(grid, &palette, Point::new(-1, 0)));
        assert_eq!(step(Point::new(3, 3), Direction::South), Point::new(3, 4));
    }

    // Tests a session over a generated level starts on the player glyph inside the start room
    // Verified by starting from the exit
    #[test]
    fn test_session_from_level() {
        let config = LevelConfig::default();
        let level = generate_level(&config);
        assert!(level.is_ok());

        if let Ok(level) = level {
            let session = Session::new(&level, config.palette);
            assert_eq!(session.player(), level.start);
            assert_eq!(session.current_room(), Some(level.start_room));
            assert_eq!(session.grid().get(level.start), Some('@'));
            assert!(!session.has_treasure());
        }
    }
}
