//! Corridor synthesis with iteration-capped epochs and full rollback
//!
//! The router drives the connectivity graph from empty to fully connected by
//! sampling corridors one at a time. Each epoch allows a fixed number of attempts;
//! when it runs out the grid is restored to the room layout snapshot, every
//! corridor and connection is discarded, and a new epoch starts. Running out of
//! epochs hands the failure back to the level generator, which discards the room
//! layout itself.
//!
//! Two synthesis strategies are supported:
//! - Rectangular: three-wide straight corridors sampled anywhere on the grid and
//!   accepted only when they bridge exactly two unconnected rooms
//! - Bent walk: biased random walks between the facing walls of rooms in
//!   neighbouring quadrants, one corridor per wall

use log::{debug, trace};
use rand::Rng;

use crate::algorithm::context::GenerationContext;
use crate::algorithm::graph::ConnectivityGraph;
use crate::io::configuration::{
    BENT_CORRIDOR_LEAD_STEPS, CORRIDOR_CLEARANCE, CORRIDOR_ROOM_INSET, CORRIDOR_WIDTH,
    CorridorStrategy, LevelConfig, WallAnchor,
};
use crate::io::visualization::{GenerationTrace, TracePhase};
use crate::spatial::geometry::{Direction, Point, Rect, room_at};
use crate::spatial::grid::{TileGrid, WallGlyphs};
use crate::spatial::quadrants::facing_walls;

/// Geometry of a committed corridor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorridorShape {
    /// Straight corridor clipped to run from one room wall to the other
    Straight(Rect),
    /// Walked path from one anchor to the other, both anchors included
    Bent {
        /// Cells in walk order
        path: Vec<Point>,
        /// Wall of the first room the walk leaves through
        from_wall: Direction,
        /// Wall of the second room the walk enters through
        to_wall: Direction,
    },
}

/// Corridor linking two rooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    /// Indices of the linked rooms
    pub rooms: (usize, usize),
    /// Corridor geometry
    pub shape: CorridorShape,
}

impl Corridor {
    /// Bounding box of a straight corridor
    pub const fn rect(&self) -> Option<&Rect> {
        match &self.shape {
            CorridorShape::Straight(rect) => Some(rect),
            CorridorShape::Bent { .. } => None,
        }
    }
}

/// Position of the router in its retry cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    /// Drawing corridor candidates
    Sampling,
    /// A candidate was committed to the grid
    Accepted,
    /// The epoch was discarded and the grid restored
    RolledBack,
    /// Every epoch was spent without connecting the rooms
    Exhausted,
    /// Every room is reachable from every other
    Connected,
}

/// Final result of routing one room layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    /// The graph is fully connected
    Connected {
        /// Corridors of the successful epoch
        corridors: Vec<Corridor>,
        /// Epochs used, the successful one included
        epochs: usize,
    },
    /// The epoch ceiling was exceeded and the grid holds only the rooms
    Exhausted {
        /// Epochs spent
        epochs: usize,
    },
}

/// Connects the rooms of one layout
pub struct CorridorRouter<'a> {
    config: &'a LevelConfig,
    rooms: &'a [Rect],
    corridors: Vec<Corridor>,
    state: RouterState,
    iterations: usize,
    epoch: usize,
}

impl<'a> CorridorRouter<'a> {
    /// Router for `rooms`, already painted onto the grid
    pub const fn new(config: &'a LevelConfig, rooms: &'a [Rect]) -> Self {
        Self {
            config,
            rooms,
            corridors: Vec::new(),
            state: RouterState::Sampling,
            iterations: 0,
            epoch: 1,
        }
    }

    /// Current state
    pub const fn state(&self) -> RouterState {
        self.state
    }

    /// Current epoch, starting at 1
    pub const fn epoch(&self) -> usize {
        self.epoch
    }

    /// Attempts made in the current epoch
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Corridors committed in the current epoch
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Run the state machine until the graph is connected or epochs run out
    ///
    /// `grid` must hold exactly the painted rooms; it is restored to that state on
    /// every rollback and when routing is exhausted.
    pub fn route(
        mut self,
        grid: &mut TileGrid,
        graph: &mut ConnectivityGraph,
        context: &mut GenerationContext,
        trace: &mut Option<GenerationTrace>,
    ) -> Routing {
        let snapshot = grid.clone();
        graph.clear();
        context.walls.reset(self.rooms.len());

        loop {
            self.advance(grid, graph, context, &snapshot);
            match self.state {
                RouterState::Accepted | RouterState::RolledBack => {
                    if let Some(trace) = trace {
                        let phase = if self.state == RouterState::Accepted {
                            TracePhase::CorridorCommitted
                        } else {
                            TracePhase::RolledBack
                        };
                        trace.record(phase, grid);
                    }
                }
                RouterState::Connected => {
                    return Routing::Connected {
                        corridors: self.corridors,
                        epochs: self.epoch,
                    };
                }
                RouterState::Exhausted => {
                    return Routing::Exhausted {
                        epochs: self.config.max_corridor_epochs,
                    };
                }
                RouterState::Sampling => {}
            }
        }
    }

    /// Perform one transition
    pub fn advance(
        &mut self,
        grid: &mut TileGrid,
        graph: &mut ConnectivityGraph,
        context: &mut GenerationContext,
        snapshot: &TileGrid,
    ) {
        self.state = match self.state {
            RouterState::Sampling | RouterState::Accepted => {
                if graph.is_fully_connected() {
                    RouterState::Connected
                } else if self.iteration_cap_reached() || self.corridor_cap_reached() {
                    self.roll_back(grid, graph, context, snapshot);
                    RouterState::RolledBack
                } else {
                    self.iterations += 1;
                    if self.attempt(grid, graph, context) {
                        RouterState::Accepted
                    } else {
                        RouterState::Sampling
                    }
                }
            }
            RouterState::RolledBack => {
                if self.epoch_cap_reached() {
                    RouterState::Exhausted
                } else {
                    RouterState::Sampling
                }
            }
            terminal @ (RouterState::Exhausted | RouterState::Connected) => terminal,
        };
    }

    const fn iteration_cap_reached(&self) -> bool {
        self.iterations >= self.config.max_corridor_iterations
    }

    const fn epoch_cap_reached(&self) -> bool {
        self.epoch > self.config.max_corridor_epochs
    }

    fn corridor_cap_reached(&self) -> bool {
        self.config.corridors == CorridorStrategy::Rectangular
            && self.corridors.len() >= self.config.max_corridors
    }

    fn roll_back(
        &mut self,
        grid: &mut TileGrid,
        graph: &mut ConnectivityGraph,
        context: &mut GenerationContext,
        snapshot: &TileGrid,
    ) {
        debug!(
            "corridor epoch {} rolled back after {} attempts with {} corridors on {} walls",
            self.epoch,
            self.iterations,
            self.corridors.len(),
            context.walls.used_count()
        );
        grid.clone_from(snapshot);
        graph.clear();
        context.walls.clear();
        self.corridors.clear();
        self.iterations = 0;
        self.epoch += 1;
    }

    fn attempt(
        &mut self,
        grid: &mut TileGrid,
        graph: &mut ConnectivityGraph,
        context: &mut GenerationContext,
    ) -> bool {
        let corridor = match self.config.corridors {
            CorridorStrategy::Rectangular => self.sample_rectangular(graph, context),
            CorridorStrategy::BentWalk => self.sample_bent(grid, graph, context),
        };
        let Some(corridor) = corridor else {
            return false;
        };

        self.commit(grid, graph, context, &corridor);
        trace!(
            "corridor {} links rooms {} and {}",
            self.corridors.len(),
            corridor.rooms.0,
            corridor.rooms.1
        );
        self.corridors.push(corridor);
        true
    }

    fn commit(
        &self,
        grid: &mut TileGrid,
        graph: &mut ConnectivityGraph,
        context: &mut GenerationContext,
        corridor: &Corridor,
    ) {
        let palette = &self.config.palette;
        match &corridor.shape {
            CorridorShape::Straight(rect) => {
                grid.paint_room(rect, WallGlyphs::Uniform(self.next_letter()), palette.floor);
            }
            CorridorShape::Bent {
                path,
                from_wall,
                to_wall,
            } => {
                for &cell in path {
                    grid.set(cell, palette.corridor);
                }
                for endpoint in [path.first(), path.last()].into_iter().flatten() {
                    grid.set(*endpoint, palette.pending_door);
                }
                context.walls.mark(corridor.rooms.0, *from_wall);
                context.walls.mark(corridor.rooms.1, *to_wall);
            }
        }
        graph.record_connection(corridor.rooms.0, corridor.rooms.1);
    }

    /// Letter tag of the next rectangular corridor
    fn next_letter(&self) -> char {
        char::from(b'a' + (self.corridors.len() % 26) as u8)
    }

    fn sample_rectangular(
        &self,
        graph: &ConnectivityGraph,
        context: &mut GenerationContext,
    ) -> Option<Corridor> {
        let candidate = self.sample_corridor_rect(context);
        let tall = candidate.height > candidate.width;

        let hits: Vec<usize> = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| candidate.overlaps_inclusive(&room.inset(CORRIDOR_ROOM_INSET)))
            .map(|(index, _)| index)
            .collect();
        let &[a, b] = hits.as_slice() else {
            return None;
        };
        if graph.is_connected(a, b) {
            return None;
        }

        let (first, second) = self.order_by_corners(&candidate, tall, a, b)?;
        let clipped = self.clip(&candidate, tall, first, second)?;

        let crowded = self
            .rooms
            .iter()
            .enumerate()
            .any(|(index, room)| {
                index != a && index != b && clipped.expanded(1).overlaps_exclusive(room)
            });
        if crowded {
            return None;
        }

        if !self.config.allow_corridor_crossings {
            let cramped = self
                .corridors
                .iter()
                .filter_map(Corridor::rect)
                .any(|existing| clipped.expanded(CORRIDOR_CLEARANCE).overlaps_exclusive(existing));
            if cramped {
                return None;
            }
        }

        Some(Corridor {
            rooms: (first, second),
            shape: CorridorShape::Straight(clipped),
        })
    }

    fn sample_corridor_rect(&self, context: &mut GenerationContext) -> Rect {
        let margin = self.config.margin as i32;
        let width = CORRIDOR_WIDTH as i32;
        let lengths = self.config.corridor_length;
        let rng = context.rng();

        let tall = rng.random_bool(0.5);
        let length = rng.random_range(lengths.min..=lengths.max) as i32;
        let (w, h) = if tall { (width, length) } else { (length, width) };
        let x = rng.random_range(margin..=self.config.cols as i32 - margin - w);
        let y = rng.random_range(margin..=self.config.rows as i32 - margin - h);
        Rect::new(x, y, w, h)
    }

    /// Rooms in the order the candidate crosses them: (top, bottom) or (left, right)
    ///
    /// Both leading corners must lie in one room and both trailing corners in the
    /// other, so a corridor never clips through a room corner.
    fn order_by_corners(
        &self,
        candidate: &Rect,
        tall: bool,
        a: usize,
        b: usize,
    ) -> Option<(usize, usize)> {
        let [top_left, top_right, bottom_left, bottom_right] = candidate.corners();
        let (leading, trailing) = if tall {
            ([top_left, top_right], [bottom_left, bottom_right])
        } else {
            ([top_left, bottom_left], [top_right, bottom_right])
        };
        let holds = |room: usize, corners: [Point; 2]| {
            self.rooms
                .get(room)
                .is_some_and(|rect| corners.iter().all(|&corner| rect.contains(corner)))
        };

        if holds(a, leading) && holds(b, trailing) {
            Some((a, b))
        } else if holds(b, leading) && holds(a, trailing) {
            Some((b, a))
        } else {
            None
        }
    }

    /// Trim the candidate to span from the first room's far wall to the second's near wall
    fn clip(&self, candidate: &Rect, tall: bool, first: usize, second: usize) -> Option<Rect> {
        let near = self.rooms.get(first)?;
        let far = self.rooms.get(second)?;
        let min_span = CORRIDOR_WIDTH as i32;

        let clipped = if tall {
            let y = near.bottom() - 1;
            Rect::new(candidate.x, y, candidate.width, far.y - y + 1)
        } else {
            let x = near.right() - 1;
            Rect::new(x, candidate.y, far.x - x + 1, candidate.height)
        };

        let span = if tall { clipped.height } else { clipped.width };
        let covered = [near, far].into_iter().all(|room| {
            if tall {
                clipped.x >= room.x && clipped.right() <= room.right()
            } else {
                clipped.y >= room.y && clipped.bottom() <= room.bottom()
            }
        });
        (span >= min_span && covered).then_some(clipped)
    }

    fn sample_bent(
        &self,
        grid: &TileGrid,
        graph: &ConnectivityGraph,
        context: &mut GenerationContext,
    ) -> Option<Corridor> {
        let count = self.rooms.len();
        if count < 2 {
            return None;
        }

        let rng = context.rng();
        let first = rng.random_range(0..count);
        let second = (first + 1 + rng.random_range(0..count - 1)) % count;

        let (from_wall, to_wall) = facing_walls(
            context.quadrants.quadrant_of(first)?,
            context.quadrants.quadrant_of(second)?,
            self.config.adjacency,
        )?;
        if graph.is_connected(first, second)
            || context.walls.is_used(first, from_wall)
            || context.walls.is_used(second, to_wall)
        {
            return None;
        }

        let start = self.wall_anchor(context, first, from_wall)?;
        let end = self.wall_anchor(context, second, to_wall)?;
        let path = walk(start, end, from_wall, context);

        let blocked = path.iter().any(|&cell| {
            !grid.in_bounds(cell)
                || room_at(self.rooms, cell).is_some()
                || grid.get(cell) == Some(self.config.palette.pending_door)
        });
        if blocked {
            return None;
        }

        Some(Corridor {
            rooms: (first, second),
            shape: CorridorShape::Bent {
                path,
                from_wall,
                to_wall,
            },
        })
    }

    /// Cell just outside the given wall where a bent corridor attaches
    fn wall_anchor(
        &self,
        context: &mut GenerationContext,
        room: usize,
        wall: Direction,
    ) -> Option<Point> {
        let rect = self.rooms.get(room)?;
        let (along_x, along_y) = match self.config.wall_anchor {
            WallAnchor::Midpoint => (rect.width / 2, rect.height / 2),
            WallAnchor::Random => {
                let rng = context.rng();
                (
                    rng.random_range(1..rect.width - 1),
                    rng.random_range(1..rect.height - 1),
                )
            }
        };

        Some(match wall {
            Direction::North => Point::new(rect.x + along_x, rect.y - 1),
            Direction::East => Point::new(rect.right(), rect.y + along_y),
            Direction::South => Point::new(rect.x + along_x, rect.bottom()),
            Direction::West => Point::new(rect.x - 1, rect.y + along_y),
        })
    }
}

/// Biased random walk from `start` to `end`, both included
///
/// The first steps move along `leaving`, away from the wall the walk starts on,
/// while that axis is still unaligned with the target. Afterwards each step moves
/// one cell toward the target along a randomly chosen unaligned axis.
fn walk(
    start: Point,
    end: Point,
    leaving: Direction,
    context: &mut GenerationContext,
) -> Vec<Point> {
    let mut path = vec![start];
    let mut current = start;

    for _ in 0..BENT_CORRIDOR_LEAD_STEPS {
        let aligned = if leaving.is_vertical() {
            current.y == end.y
        } else {
            current.x == end.x
        };
        if aligned {
            break;
        }
        current = current.step(leaving);
        path.push(current);
    }

    while current != end {
        let horizontal = match (current.x == end.x, current.y == end.y) {
            (false, false) => context.rng().random_bool(0.5),
            (false, true) => true,
            _ => false,
        };
        let direction = if horizontal {
            if end.x > current.x {
                Direction::East
            } else {
                Direction::West
            }
        } else if end.y > current.y {
            Direction::South
        } else {
            Direction::North
        };
        current = current.step(direction);
        path.push(current);
    }

    path
}
