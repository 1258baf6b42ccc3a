//! Turn-based movement over a generated level

use crate::algorithm::assembler::Level;
use crate::io::configuration::Palette;
use crate::spatial::geometry::{Direction, Point, Rect, room_at};
use crate::spatial::grid::TileGrid;

/// Whether the player may stand on the tile at `point`
///
/// Floor, door, corridor and explored tiles are walkable; anything else, and any
/// point off the grid, is not.
pub fn is_traversable(grid: &TileGrid, palette: &Palette, point: Point) -> bool {
    grid.get(point).is_some_and(|tile| {
        tile == palette.floor
            || tile == palette.door
            || tile == palette.corridor
            || tile == palette.explored
    })
}

/// Point one cell away in `direction`
pub const fn step(point: Point, direction: Direction) -> Point {
    point.step(direction)
}

/// One player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move one tile
    Move(Direction),
    /// Leave the session
    Quit,
}

impl Command {
    /// Parse a key: `w`/`a`/`s`/`d` to move, `q` to quit
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'q' | 'Q' => Some(Self::Quit),
            _ => match Direction::from_key(key) {
                Some(direction) => Some(Self::Move(direction)),
                None => None,
            },
        }
    }
}

/// Result of applying one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player moved
    Moved,
    /// The destination is not walkable
    Blocked,
    /// The destination is off the grid
    OutOfBounds,
    /// The player moved onto the treasure and picked it up
    FoundTreasure,
    /// The player reached the exit
    Won,
    /// The player quit
    Quit,
}

impl MoveOutcome {
    /// Message shown to the player, if any
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Blocked => Some("Invalid move"),
            Self::OutOfBounds => Some("Out of bounds"),
            Self::FoundTreasure => Some("You found the treasure!"),
            Self::Won => Some("You win!"),
            Self::Moved | Self::Quit => None,
        }
    }

    /// Whether the session ends after this outcome
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Quit)
    }
}

/// Mutable play state over a copy of the level grid
#[derive(Debug, Clone)]
pub struct Session {
    grid: TileGrid,
    palette: Palette,
    rooms: Vec<Rect>,
    player: Point,
    underfoot: char,
    has_treasure: bool,
    finished: bool,
}

impl Session {
    /// Start playing `level` from its player start
    pub fn new(level: &Level, palette: Palette) -> Self {
        Self::from_parts(
            level.grid.clone(),
            palette,
            level.rooms.clone(),
            level.start,
            level.start_tile,
        )
    }

    /// Session over an arbitrary grid with the player already stamped at `player`
    ///
    /// `underfoot` is the tile restored when the player leaves `player`.
    pub const fn from_parts(
        grid: TileGrid,
        palette: Palette,
        rooms: Vec<Rect>,
        player: Point,
        underfoot: char,
    ) -> Self {
        Self {
            grid,
            palette,
            rooms,
            player,
            underfoot,
            has_treasure: false,
            finished: false,
        }
    }

    /// Current grid, player included
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Player position
    pub const fn player(&self) -> Point {
        self.player
    }

    /// Whether the treasure was collected
    pub const fn has_treasure(&self) -> bool {
        self.has_treasure
    }

    /// Whether the session has ended
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Room the player stands in, if any
    pub fn current_room(&self) -> Option<usize> {
        room_at(&self.rooms, self.player)
    }

    /// Apply one command
    pub fn apply(&mut self, command: Command) -> MoveOutcome {
        match command {
            Command::Quit => {
                self.finished = true;
                MoveOutcome::Quit
            }
            Command::Move(direction) => self.move_player(direction),
        }
    }

    /// Move the player one tile
    ///
    /// Leaving a cell restores whatever was there before the player arrived.
    /// Once the session is finished every move is blocked.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.finished {
            return MoveOutcome::Blocked;
        }

        let target = step(self.player, direction);
        let Some(tile) = self.grid.get(target) else {
            return MoveOutcome::OutOfBounds;
        };

        if tile == self.palette.exit {
            self.relocate(target, tile);
            self.finished = true;
            MoveOutcome::Won
        } else if tile == self.palette.treasure {
            self.relocate(target, self.palette.floor);
            self.has_treasure = true;
            MoveOutcome::FoundTreasure
        } else if is_traversable(&self.grid, &self.palette, target) {
            self.relocate(target, tile);
            MoveOutcome::Moved
        } else {
            MoveOutcome::Blocked
        }
    }

    fn relocate(&mut self, target: Point, underfoot: char) {
        self.grid.set(self.player, self.underfoot);
        self.underfoot = underfoot;
        self.grid.set(target, self.palette.player);
        self.player = target;
    }
}
