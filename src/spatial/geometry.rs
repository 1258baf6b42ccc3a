//! Axis-aligned rectangles, grid points and the overlap policies used by generation
//!
//! Coordinates follow the grid convention: `x` is the column, `y` the row, origin at
//! the top-left cell. Rectangles are half-open: a rectangle covers columns
//! `x..x + width` and rows `y..y + height`.

/// A single grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column, starting at the left with column 0
    pub x: i32,
    /// Row, starting at the top with row 0
    pub y: i32,
}

impl Point {
    /// Create a point from a column and a row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point moved one cell in the given direction
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cardinal direction, also used to name the four walls of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    North,
    /// Towards the last column
    East,
    /// Towards the last row
    South,
    /// Towards column 0
    West,
}

impl Direction {
    /// All directions in wall-index order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Column and row offset of a single step
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Stable index used by per-wall lookup tables
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction facing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Whether a step in this direction changes the row
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Parse the classic `wasd` movement keys
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'w' | 'W' => Some(Self::North),
            'd' | 'D' => Some(Self::East),
            's' | 'S' => Some(Self::South),
            'a' | 'A' => Some(Self::West),
            _ => None,
        }
    }
}

/// Which intersection test a generation phase applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Rectangles must share at least one cell
    Exclusive,
    /// Rectangles sharing only a boundary also count as intersecting
    Inclusive,
}

/// Axis-aligned rectangle of grid cells, used for rooms and straight corridors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Leftmost column
    pub x: i32,
    /// Topmost row
    pub y: i32,
    /// Number of columns covered
    pub width: i32,
    /// Number of rows covered
    pub height: i32,
    /// Optional glyph naming the region or quadrant the rectangle belongs to
    pub tag: Option<char>,
}

impl Rect {
    /// Create an untagged rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            tag: None,
        }
    }

    /// Same rectangle carrying a region tag
    #[must_use]
    pub const fn with_tag(mut self, tag: char) -> Self {
        self.tag = Some(tag);
        self
    }

    /// One past the rightmost column
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangle covers no cells
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Rectangle grown by `amount` cells on every side (shrunk when negative)
    #[must_use]
    pub const fn expanded(&self, amount: i32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2 * amount,
            height: self.height + 2 * amount,
            tag: self.tag,
        }
    }

    /// Rectangle shrunk by `amount` cells on every side
    #[must_use]
    pub const fn inset(&self, amount: i32) -> Self {
        self.expanded(-amount)
    }

    /// Interior cells, excluding the one-cell border
    #[must_use]
    pub const fn interior(&self) -> Self {
        self.inset(1)
    }

    /// Intersection test under the given policy
    pub const fn overlaps(&self, other: &Self, policy: Overlap) -> bool {
        match policy {
            Overlap::Exclusive => self.overlaps_exclusive(other),
            Overlap::Inclusive => self.overlaps_inclusive(other),
        }
    }

    /// True when the rectangles share at least one cell
    pub const fn overlaps_exclusive(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when the rectangles share a cell or merely touch along an edge
    pub const fn overlaps_inclusive(&self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Half-open containment test
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The four corner cells: top-left, top-right, bottom-left, bottom-right
    pub const fn corners(&self) -> [Point; 4] {
        let last_x = self.right() - 1;
        let last_y = self.bottom() - 1;
        [
            Point::new(self.x, self.y),
            Point::new(last_x, self.y),
            Point::new(self.x, last_y),
            Point::new(last_x, last_y),
        ]
    }

    /// Centre cell, rounding towards the bottom-right
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Sum of the top-left coordinates, used to rank rooms from the top-left corner
    pub const fn corner_distance(&self) -> i32 {
        self.x + self.y
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Point> + use<> {
        let (x, right) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x..right).map(move |col| Point::new(col, y)))
    }
}

/// Index of the first rectangle containing the point
pub fn room_at(rooms: &[Rect], point: Point) -> Option<usize> {
    rooms.iter().position(|room| room.contains(point))
}
