//! Generation constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::quadrants::{AdjacencyMode, QUADRANT_COUNT, QUADRANT_SIDE};

/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 30;
/// Default number of grid columns
pub const DEFAULT_COLS: usize = 60;

/// Fewest rooms a randomly sized level gets
pub const DEFAULT_MIN_ROOMS: usize = 5;
/// Most rooms any level may hold (one per quadrant, one digit per room)
pub const MAX_ROOMS: usize = QUADRANT_COUNT;

// Rooms need an interior wide enough for entities and a door away from the corners
/// Smallest room side accepted by validation
pub const MIN_ROOM_SIDE: usize = 5;
/// Smallest room side sampled by quadrant placement
pub const DEFAULT_MIN_ROOM_SIZE: usize = 5;
/// Smallest room side sampled by free placement
pub const DEFAULT_ROOM_SIZE_MIN: usize = 7;
/// Largest room side sampled by free placement
pub const DEFAULT_ROOM_SIZE_MAX: usize = 16;

/// Cells kept free between any room and the grid edge (and inside each quadrant)
pub const DEFAULT_MARGIN: usize = 2;

/// Short side of a rectangular corridor (wall, floor, wall)
pub const CORRIDOR_WIDTH: usize = 3;
/// Shortest sampled rectangular corridor
pub const DEFAULT_CORRIDOR_LENGTH_MIN: usize = 7;
/// Longest sampled rectangular corridor
pub const DEFAULT_CORRIDOR_LENGTH_MAX: usize = 16;
/// Inset applied to rooms before the corridor intersection test
pub const CORRIDOR_ROOM_INSET: i32 = 2;
// Keeps neighbouring corridors from creating door seams on each other's walls
/// Clearance kept between rectangular corridors
pub const CORRIDOR_CLEARANCE: i32 = 2;
/// Rectangular corridors committed per epoch before it counts as stuck
pub const DEFAULT_MAX_CORRIDORS: usize = 15;

/// Corridor attempts per epoch before rolling back
pub const DEFAULT_MAX_CORRIDOR_ITERATIONS: usize = 100;
/// Corridor epochs per room layout before the layout is discarded
pub const DEFAULT_MAX_CORRIDOR_EPOCHS: usize = 50;
/// Room layouts attempted before generation fails
pub const DEFAULT_MAX_ROOM_EPOCHS: usize = 50;
/// Consecutive rejected room samples before the batch restarts
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: usize = 50;
// Guards the free placement loop, which has no natural bound
/// Batch restarts before room placement gives up on a layout
pub const DEFAULT_MAX_PLACEMENT_RESTARTS: usize = 10_000;

/// Number of forced steps a bent corridor takes away from its first wall
pub const BENT_CORRIDOR_LEAD_STEPS: usize = 2;
/// Offset of the fixed player start from the start room's top-left corner
pub const START_OFFSET: i32 = 2;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 1_715_544_555;

// Output settings
/// Pixels per grid cell in exported images
pub const IMAGE_CELL_SIZE: u32 = 8;
/// Delay between trace animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 120;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Frames above this count are thinned out before encoding
pub const MAX_TRACE_FRAMES: usize = 400;
/// Spinner refresh interval while a level is generated
pub const SPINNER_TICK_MS: u64 = 80;

/// Glyph assigned to each tile meaning
///
/// Room walls in the rectangular style use room index digits and rectangular
/// corridors use lowercase letters, so palette glyphs may be neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Unallocated cell
    pub empty: char,
    /// Room floor (and rectangular corridor floor)
    pub floor: char,
    /// Top and bottom room walls in the bent style
    pub horizontal_wall: char,
    /// Side room walls in the bent style
    pub vertical_wall: char,
    /// Bent corridor floor
    pub corridor: char,
    /// Corridor endpoint awaiting door resolution
    pub pending_door: char,
    /// Door
    pub door: char,
    /// Player
    pub player: char,
    /// Exit marker
    pub exit: char,
    /// Treasure marker
    pub treasure: char,
    /// Explored overlay
    pub explored: char,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty: ' ',
            floor: '.',
            horizontal_wall: '-',
            vertical_wall: '|',
            corridor: '#',
            pending_door: '?',
            door: '%',
            player: '@',
            exit: 'E',
            treasure: 'T',
            explored: '*',
        }
    }
}

impl Palette {
    /// Every glyph with the name of the field holding it
    pub const fn entries(&self) -> [(&'static str, char); 11] {
        [
            ("empty", self.empty),
            ("floor", self.floor),
            ("horizontal_wall", self.horizontal_wall),
            ("vertical_wall", self.vertical_wall),
            ("corridor", self.corridor),
            ("pending_door", self.pending_door),
            ("door", self.door),
            ("player", self.player),
            ("exit", self.exit),
            ("treasure", self.treasure),
            ("explored", self.explored),
        ]
    }

    /// Whether the glyph is a room wall in either wall style
    pub const fn is_wall(&self, tile: char) -> bool {
        tile.is_ascii_digit() || tile == self.horizontal_wall || tile == self.vertical_wall
    }

    /// Check that glyphs are distinct and stay clear of the tag alphabets
    ///
    /// # Errors
    ///
    /// Returns an error if two meanings share a glyph, or a glyph is an ASCII
    /// digit or lowercase letter
    pub fn validate(&self) -> Result<()> {
        let entries = self.entries();
        for (index, &(name, glyph)) in entries.iter().enumerate() {
            if glyph.is_ascii_digit() || glyph.is_ascii_lowercase() {
                return Err(invalid_parameter(
                    name,
                    &glyph,
                    &"digits and lowercase letters are reserved for room and corridor tags",
                ));
            }
            if let Some((other, _)) = entries
                .iter()
                .skip(index + 1)
                .find(|&&(_, candidate)| candidate == glyph)
            {
                return Err(invalid_parameter(
                    name,
                    &glyph,
                    &format!("glyph is also used for '{other}'"),
                ));
            }
        }
        Ok(())
    }
}

/// Inclusive size range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    /// Smallest value
    pub min: usize,
    /// Largest value
    pub max: usize,
}

impl SizeRange {
    /// Create a range covering `min..=max`
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// How many rooms a level gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCount {
    /// Always this many rooms
    Fixed(usize),
    /// Drawn once per level from the inclusive range
    Range(SizeRange),
}

impl RoomCount {
    /// Inclusive bounds of the count
    pub const fn bounds(self) -> (usize, usize) {
        match self {
            Self::Fixed(count) => (count, count),
            Self::Range(range) => (range.min, range.max),
        }
    }
}

/// Room packing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Rooms anywhere on the grid, rejected on overlap
    Free,
    /// One room per randomly chosen quadrant
    Quadrant,
}

/// Corridor synthesis strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorStrategy {
    /// Straight three-wide rectangles joining two rooms
    Rectangular,
    /// Biased random walks between facing walls of neighbouring quadrants
    BentWalk,
}

/// Source of the random seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedChoice {
    /// Reproducible generation from this seed
    Fixed(u64),
    /// Fresh seed drawn from the thread generator
    Random,
}

/// Whether free-placed rooms may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSpacing {
    /// At least one empty cell between rooms
    Gap,
    /// Rooms may share a boundary edge but never overlap
    Touching,
}

/// Where a bent corridor attaches to a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallAnchor {
    /// Middle of the wall
    Midpoint,
    /// Random cell along the wall, corners excluded
    Random,
}

/// Where the player starts inside the start room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPlacement {
    /// Two cells in from the room's top-left corner
    FixedOffset,
    /// Random interior floor cell
    Random,
}

/// Where the exit goes inside the exit room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPlacement {
    /// Centre of the room
    Center,
    /// Random interior floor cell
    Random,
}

/// Complete set of level generation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Number of rooms
    pub room_count: RoomCount,
    /// Room packing strategy
    pub placement: PlacementStrategy,
    /// Corridor synthesis strategy
    pub corridors: CorridorStrategy,
    /// Quadrant neighbourhood used by bent corridors
    pub adjacency: AdjacencyMode,
    /// Random seed
    pub seed: SeedChoice,
    /// Whether free-placed rooms may touch
    pub spacing: RoomSpacing,
    /// Cells kept free along the grid edge and inside each quadrant
    pub margin: usize,
    /// Room side range for free placement
    pub room_size: SizeRange,
    /// Smallest room side for quadrant placement
    pub min_room_size: usize,
    /// Length range of sampled rectangular corridors
    pub corridor_length: SizeRange,
    /// Rectangular corridors committed per epoch before it counts as stuck
    pub max_corridors: usize,
    /// Corridor attempts per epoch before rolling back
    pub max_corridor_iterations: usize,
    /// Corridor epochs per room layout
    pub max_corridor_epochs: usize,
    /// Room layouts attempted before generation fails
    pub max_room_epochs: usize,
    /// Consecutive rejected room samples before a batch restart
    pub max_placement_attempts: usize,
    /// Batch restarts before room placement gives up
    pub max_placement_restarts: usize,
    /// Bent corridor attachment point
    pub wall_anchor: WallAnchor,
    /// Skip the clearance test between rectangular corridors
    pub allow_corridor_crossings: bool,
    /// Player start placement
    pub start_placement: StartPlacement,
    /// Exit placement
    pub exit_placement: ExitPlacement,
    /// Fill the start room with the explored overlay
    pub reveal_start_room: bool,
    /// Tile glyphs
    pub palette: Palette,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::quadrant_bent()
    }
}

impl LevelConfig {
    /// Quadrant rooms joined by bent random-walk corridors
    pub fn quadrant_bent() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            room_count: RoomCount::Range(SizeRange::new(DEFAULT_MIN_ROOMS, MAX_ROOMS)),
            placement: PlacementStrategy::Quadrant,
            corridors: CorridorStrategy::BentWalk,
            adjacency: AdjacencyMode::Cardinal,
            seed: SeedChoice::Fixed(DEFAULT_SEED),
            spacing: RoomSpacing::Gap,
            margin: DEFAULT_MARGIN,
            room_size: SizeRange::new(DEFAULT_ROOM_SIZE_MIN, DEFAULT_ROOM_SIZE_MAX),
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            corridor_length: SizeRange::new(
                DEFAULT_CORRIDOR_LENGTH_MIN,
                DEFAULT_CORRIDOR_LENGTH_MAX,
            ),
            max_corridors: DEFAULT_MAX_CORRIDORS,
            max_corridor_iterations: DEFAULT_MAX_CORRIDOR_ITERATIONS,
            max_corridor_epochs: DEFAULT_MAX_CORRIDOR_EPOCHS,
            max_room_epochs: DEFAULT_MAX_ROOM_EPOCHS,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            max_placement_restarts: DEFAULT_MAX_PLACEMENT_RESTARTS,
            wall_anchor: WallAnchor::Midpoint,
            allow_corridor_crossings: false,
            start_placement: StartPlacement::FixedOffset,
            exit_placement: ExitPlacement::Center,
            reveal_start_room: false,
            palette: Palette::default(),
        }
    }

    /// Quadrant rooms joined by straight rectangular corridors
    pub fn quadrant_rectangular() -> Self {
        Self {
            corridors: CorridorStrategy::Rectangular,
            exit_placement: ExitPlacement::Random,
            ..Self::quadrant_bent()
        }
    }

    /// Nine freely placed rooms joined by straight rectangular corridors
    pub fn free_rectangular() -> Self {
        Self {
            room_count: RoomCount::Fixed(MAX_ROOMS),
            placement: PlacementStrategy::Free,
            corridors: CorridorStrategy::Rectangular,
            exit_placement: ExitPlacement::Random,
            reveal_start_room: true,
            ..Self::quadrant_bent()
        }
    }

    /// Same configuration with a fixed seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedChoice::Fixed(seed);
        self
    }

    /// Same configuration with a fixed room count
    #[must_use]
    pub const fn with_rooms(mut self, count: usize) -> Self {
        self.room_count = RoomCount::Fixed(count);
        self
    }

    /// Check every parameter before generation starts
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let (min_rooms, max_rooms) = self.room_count.bounds();
        if min_rooms == 0 || min_rooms > max_rooms {
            return Err(invalid_parameter(
                "room_count",
                &format!("{min_rooms}..={max_rooms}"),
                &"must be a non-empty range starting at 1 or more",
            ));
        }
        if max_rooms > MAX_ROOMS {
            return Err(invalid_parameter(
                "room_count",
                &max_rooms,
                &format!("at most {MAX_ROOMS} rooms are supported"),
            ));
        }

        for (name, value) in [
            ("max_corridors", self.max_corridors),
            ("max_corridor_iterations", self.max_corridor_iterations),
            ("max_corridor_epochs", self.max_corridor_epochs),
            ("max_room_epochs", self.max_room_epochs),
            ("max_placement_attempts", self.max_placement_attempts),
            ("max_placement_restarts", self.max_placement_restarts),
        ] {
            if value == 0 {
                return Err(invalid_parameter(name, &value, &"must be at least 1"));
            }
        }

        if self.corridors == CorridorStrategy::BentWalk
            && self.placement != PlacementStrategy::Quadrant
        {
            return Err(invalid_parameter(
                "corridors",
                &"bent",
                &"bent corridors route between quadrants and need quadrant placement",
            ));
        }

        match self.placement {
            PlacementStrategy::Free => self.validate_free_placement()?,
            PlacementStrategy::Quadrant => self.validate_quadrant_placement()?,
        }

        if self.corridors == CorridorStrategy::Rectangular {
            self.validate_corridor_lengths()?;
        }

        self.palette.validate()
    }

    fn validate_free_placement(&self) -> Result<()> {
        let SizeRange { min, max } = self.room_size;
        if min < MIN_ROOM_SIDE || min > max {
            return Err(invalid_parameter(
                "room_size",
                &format!("{min}..={max}"),
                &format!("must be a non-empty range starting at {MIN_ROOM_SIDE} or more"),
            ));
        }
        let needed = max + 2 * self.margin;
        if self.rows < needed || self.cols < needed {
            return Err(invalid_parameter(
                "rows/cols",
                &format!("{}x{}", self.rows, self.cols),
                &format!("rooms up to {max} cells with margin {} need {needed}", self.margin),
            ));
        }
        Ok(())
    }

    fn validate_quadrant_placement(&self) -> Result<()> {
        if self.min_room_size < MIN_ROOM_SIDE {
            return Err(invalid_parameter(
                "min_room_size",
                &self.min_room_size,
                &format!("must be at least {MIN_ROOM_SIDE}"),
            ));
        }
        let (interior_width, interior_height) = self.quadrant_interior();
        if interior_width < self.min_room_size || interior_height < self.min_room_size {
            return Err(invalid_parameter(
                "rows/cols",
                &format!("{}x{}", self.rows, self.cols),
                &format!(
                    "quadrant interiors of {interior_width}x{interior_height} cannot hold a room of side {}",
                    self.min_room_size
                ),
            ));
        }
        Ok(())
    }

    fn validate_corridor_lengths(&self) -> Result<()> {
        let SizeRange { min, max } = self.corridor_length;
        if min < CORRIDOR_WIDTH || min > max {
            return Err(invalid_parameter(
                "corridor_length",
                &format!("{min}..={max}"),
                &format!("must be a non-empty range starting at {CORRIDOR_WIDTH} or more"),
            ));
        }
        let needed = max + 2 * self.margin;
        if self.rows < needed || self.cols < needed {
            return Err(invalid_parameter(
                "corridor_length",
                &max,
                &format!(
                    "does not fit a {}x{} grid with margin {}",
                    self.rows, self.cols, self.margin
                ),
            ));
        }
        Ok(())
    }

    /// Width and height available to a room inside one quadrant
    pub const fn quadrant_interior(&self) -> (usize, usize) {
        (
            (self.cols / QUADRANT_SIDE).saturating_sub(2 * self.margin),
            (self.rows / QUADRANT_SIDE).saturating_sub(2 * self.margin),
        )
    }
}
