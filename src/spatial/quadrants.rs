//! Three-by-three macro partition of the grid
//!
//! Quadrants are numbered 0..9 from the top-left, row by row. The layout records
//! which room occupies each quadrant and answers the two adjacency questions the
//! generator asks: are the occupied quadrants one cardinally connected region, and
//! which walls face each other when two quadrants are joined by a corridor.

use std::collections::VecDeque;

use crate::spatial::geometry::{Direction, Rect};

/// Number of quadrants along each axis
pub const QUADRANT_SIDE: usize = 3;
/// Total number of quadrants
pub const QUADRANT_COUNT: usize = QUADRANT_SIDE * QUADRANT_SIDE;

/// Which quadrant pairs count as neighbours for corridor routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencyMode {
    /// Up, down, left and right only
    Cardinal,
    /// Cardinal neighbours plus the four diagonals
    CardinalAndDiagonal,
}

/// Room index occupying each quadrant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadrantLayout {
    slots: [Option<usize>; QUADRANT_COUNT],
}

impl QuadrantLayout {
    /// Empty layout
    pub const fn new() -> Self {
        Self {
            slots: [None; QUADRANT_COUNT],
        }
    }

    /// Mark every quadrant as unused
    pub const fn clear(&mut self) {
        self.slots = [None; QUADRANT_COUNT];
    }

    /// Whether a quadrant already holds a room
    pub fn is_used(&self, quadrant: usize) -> bool {
        self.room_at(quadrant).is_some()
    }

    /// Room stored in a quadrant
    pub fn room_at(&self, quadrant: usize) -> Option<usize> {
        self.slots.get(quadrant).copied().flatten()
    }

    /// Quadrant holding the given room
    pub fn quadrant_of(&self, room: usize) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == Some(room))
    }

    /// Record that `room` occupies `quadrant`
    pub fn assign(&mut self, quadrant: usize, room: usize) {
        if let Some(slot) = self.slots.get_mut(quadrant) {
            *slot = Some(room);
        }
    }

    /// First unused quadrant at or after `start`, wrapping around
    pub fn probe_unused(&self, start: usize) -> Option<usize> {
        (0..QUADRANT_COUNT)
            .map(|offset| (start + offset) % QUADRANT_COUNT)
            .find(|&quadrant| !self.is_used(quadrant))
    }

    /// Number of occupied quadrants
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the occupied quadrants form one region under up/down/left/right moves
    ///
    /// Diagonal neighbours never count here, even when corridors may use them.
    pub fn is_cardinally_connected(&self) -> bool {
        let Some(start) = (0..QUADRANT_COUNT).find(|&q| self.is_used(q)) else {
            return false;
        };

        let mut visited = [false; QUADRANT_COUNT];
        let mut queue = VecDeque::from([start]);
        if let Some(seen) = visited.get_mut(start) {
            *seen = true;
        }

        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                let Some(next) = cardinal_neighbour(current, direction) else {
                    continue;
                };
                let unseen = visited.get(next).is_some_and(|&seen| !seen);
                if unseen && self.is_used(next) {
                    if let Some(seen) = visited.get_mut(next) {
                        *seen = true;
                    }
                    queue.push_back(next);
                }
            }
        }

        (0..QUADRANT_COUNT)
            .all(|q| !self.is_used(q) || visited.get(q).copied().unwrap_or(false))
    }
}

/// Row and column of a quadrant within the 3x3 partition
pub const fn quadrant_position(quadrant: usize) -> (usize, usize) {
    (quadrant / QUADRANT_SIDE, quadrant % QUADRANT_SIDE)
}

/// Neighbouring quadrant one step away, `None` off the partition edge
pub const fn cardinal_neighbour(quadrant: usize, direction: Direction) -> Option<usize> {
    let (row, col) = quadrant_position(quadrant);
    match direction {
        Direction::North if row > 0 => Some(quadrant - QUADRANT_SIDE),
        Direction::South if row + 1 < QUADRANT_SIDE => Some(quadrant + QUADRANT_SIDE),
        Direction::West if col > 0 => Some(quadrant - 1),
        Direction::East if col + 1 < QUADRANT_SIDE => Some(quadrant + 1),
        _ => None,
    }
}

/// Walls of `from` and `to` that face each other, if the quadrants are neighbours
///
/// For cardinal neighbours both walls point at each other. For diagonal
/// neighbours (only in [`AdjacencyMode::CardinalAndDiagonal`]) the first room
/// leaves through its north or south wall and the second is entered through its
/// east or west wall, giving the corridor a single bend.
pub const fn facing_walls(
    from: usize,
    to: usize,
    mode: AdjacencyMode,
) -> Option<(Direction, Direction)> {
    if from >= QUADRANT_COUNT || to >= QUADRANT_COUNT || from == to {
        return None;
    }

    let (from_row, from_col) = quadrant_position(from);
    let (to_row, to_col) = quadrant_position(to);
    let d_row = to_row as i32 - from_row as i32;
    let d_col = to_col as i32 - from_col as i32;

    let vertical = if d_row < 0 {
        Direction::North
    } else {
        Direction::South
    };
    let horizontal = if d_col < 0 {
        Direction::West
    } else {
        Direction::East
    };

    match (d_row.abs(), d_col.abs()) {
        (1, 0) => Some((vertical, vertical.opposite())),
        (0, 1) => Some((horizontal, horizontal.opposite())),
        (1, 1) => match mode {
            AdjacencyMode::CardinalAndDiagonal => Some((vertical, horizontal.opposite())),
            AdjacencyMode::Cardinal => None,
        },
        _ => None,
    }
}

/// Grid area covered by a quadrant
pub fn quadrant_bounds(quadrant: usize, rows: usize, cols: usize) -> Rect {
    let (row, col) = quadrant_position(quadrant);
    let cell_width = (cols / QUADRANT_SIDE) as i32;
    let cell_height = (rows / QUADRANT_SIDE) as i32;
    Rect::new(
        col as i32 * cell_width,
        row as i32 * cell_height,
        cell_width,
        cell_height,
    )
    .with_tag(quadrant_glyph(quadrant))
}

/// Digit naming a quadrant
pub fn quadrant_glyph(quadrant: usize) -> char {
    char::from_digit(quadrant as u32, 10).unwrap_or('?')
}
