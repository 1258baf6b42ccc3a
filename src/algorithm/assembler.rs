//! Level assembly: room epochs, corridor routing, doors and objective placement
//!
//! The generator owns the outer retry loop. Each room epoch places a fresh room
//! layout and hands it to the corridor router; a layout whose corridor epochs all
//! fail is discarded. Once a layout connects, doors are resolved and the start,
//! exit and treasure rooms are chosen from the connectivity graph:
//!
//! - start: the room closest to the top-left corner by `x + y`
//! - exit: the room farthest from the start in corridor hops
//! - treasure: the room farthest from the exit, unless the graph folds back onto
//!   the start, in which case the least connected remaining room

use log::{debug, info, warn};
use rand::Rng;

use crate::algorithm::context::GenerationContext;
use crate::algorithm::corridors::{Corridor, CorridorRouter, Routing};
use crate::algorithm::doors::resolve_doors;
use crate::algorithm::graph::ConnectivityGraph;
use crate::algorithm::placement::{RoomPlacer, paint_rooms};
use crate::io::configuration::{
    CorridorStrategy, ExitPlacement, LevelConfig, RoomCount, START_OFFSET, SeedChoice,
    StartPlacement,
};
use crate::io::error::{GenerationError, Result, invariant_violation};
use crate::io::visualization::{GenerationTrace, TracePhase};
use crate::spatial::geometry::{Point, Rect};
use crate::spatial::grid::TileGrid;

/// Retry counters of a successful generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Room layouts attempted, the successful one included
    pub room_epochs: usize,
    /// Corridor epochs consumed across all layouts
    pub corridor_epochs: usize,
}

/// A finished, fully connected level
#[derive(Debug, Clone)]
pub struct Level {
    /// Final tile grid with entities stamped
    pub grid: TileGrid,
    /// Room registry; a room's index is its identity
    pub rooms: Vec<Rect>,
    /// Corridors of the successful epoch
    pub corridors: Vec<Corridor>,
    /// Room adjacency produced by the corridors
    pub graph: ConnectivityGraph,
    /// Door cells in scan order
    pub doors: Vec<Point>,
    /// Player start cell
    pub start: Point,
    /// Tile the player start was stamped over
    pub start_tile: char,
    /// Exit cell
    pub exit: Point,
    /// Treasure cell
    pub treasure: Point,
    /// Room holding the player start
    pub start_room: usize,
    /// Room holding the exit
    pub exit_room: usize,
    /// Room holding the treasure
    pub treasure_room: usize,
    /// Seed the level was generated from
    pub seed: u64,
    /// Retry counters
    pub stats: GenerationStats,
}

/// Builds levels from a validated configuration
pub struct LevelGenerator {
    config: LevelConfig,
    /// Generation frames, captured only when enabled
    pub trace: Option<GenerationTrace>,
}

impl LevelGenerator {
    /// Generator for `config`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the configuration does not validate
    pub fn new(config: LevelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            trace: None,
        })
    }

    /// Capture grid frames during the next generations
    pub fn enable_trace(&mut self) {
        self.trace = Some(GenerationTrace::new(self.config.palette));
    }

    /// Configuration in use
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Generate one level
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::GenerationFailed`] when every room epoch ends
    /// without a connected corridor network, or an invariant violation if a
    /// finished layout breaks an assembly precondition
    pub fn generate(&mut self) -> Result<Level> {
        let seed = match self.config.seed {
            SeedChoice::Fixed(seed) => seed,
            SeedChoice::Random => rand::rng().random(),
        };
        let mut context = GenerationContext::new(seed);
        let count = sample_room_count(self.config.room_count, &mut context);
        let mut grid = TileGrid::new(
            self.config.rows,
            self.config.cols,
            self.config.palette.empty,
        );
        let mut corridor_epochs = 0;

        info!(
            "generating {count} rooms on a {}x{} grid with seed {seed}",
            self.config.rows, self.config.cols
        );

        for room_epoch in 1..=self.config.max_room_epochs {
            context.reset_layout(count);
            let rooms = match RoomPlacer::new(&self.config).place(&mut grid, &mut context, count) {
                Ok(rooms) => rooms,
                Err(err) if err.is_recoverable() => {
                    warn!("room epoch {room_epoch} failed: {err}");
                    continue;
                }
                Err(err) => return Err(err),
            };
            if let Some(trace) = &mut self.trace {
                trace.record(TracePhase::RoomsPlaced, &grid);
            }

            let mut graph = ConnectivityGraph::new(rooms.len());
            let router = CorridorRouter::new(&self.config, &rooms);
            match router.route(&mut grid, &mut graph, &mut context, &mut self.trace) {
                Routing::Connected { corridors, epochs } => {
                    corridor_epochs += epochs;
                    let stats = GenerationStats {
                        room_epochs: room_epoch,
                        corridor_epochs,
                    };
                    let layout = Layout {
                        grid,
                        rooms,
                        corridors,
                        graph,
                    };
                    return self.finish(layout, &mut context, seed, stats);
                }
                Routing::Exhausted { epochs } => {
                    corridor_epochs += epochs;
                    warn!("room epoch {room_epoch}: corridors exhausted after {epochs} epochs");
                }
            }
        }

        Err(GenerationError::GenerationFailed {
            room_epochs: self.config.max_room_epochs,
            corridor_epochs,
        })
    }

    fn finish(
        &mut self,
        layout: Layout,
        context: &mut GenerationContext,
        seed: u64,
        stats: GenerationStats,
    ) -> Result<Level> {
        let Layout {
            mut grid,
            rooms,
            corridors,
            graph,
        } = layout;
        let palette = self.config.palette;

        if !graph.is_fully_connected() {
            return Err(invariant_violation(
                "level assembly",
                &"corridor routing reported success on a disconnected graph",
            ));
        }

        if self.config.corridors == CorridorStrategy::Rectangular {
            paint_rooms(&mut grid, &rooms, &self.config);
        }
        let doors = resolve_doors(&mut grid, &palette, self.config.corridors);
        if let Some(trace) = &mut self.trace {
            trace.record(TracePhase::DoorsResolved, &grid);
        }

        let start_room = select_start_room(&rooms)?;
        let exit_room = graph.farthest_room(start_room);
        let treasure_room = select_treasure_room(&graph, start_room, exit_room);
        debug!(
            "room links {:?}, degrees {:?}",
            graph.edges().collect::<Vec<_>>(),
            graph.degrees()
        );
        debug!("start room {start_room}, exit room {exit_room}, treasure room {treasure_room}");

        let room = |index: usize| {
            rooms.get(index).copied().ok_or_else(|| {
                invariant_violation("level assembly", &format!("room {index} is not registered"))
            })
        };
        let (start_rect, exit_rect, treasure_rect) =
            (room(start_room)?, room(exit_room)?, room(treasure_room)?);

        if self.config.reveal_start_room {
            grid.fill_interior(&start_rect, palette.explored);
        }

        let preferred_start = match self.config.start_placement {
            StartPlacement::FixedOffset => {
                Some(Point::new(start_rect.x + START_OFFSET, start_rect.y + START_OFFSET))
            }
            StartPlacement::Random => None,
        };
        let start =
            pick_open_cell(&grid, &self.config, &start_rect, preferred_start, &[], context)?;

        let preferred_exit = match self.config.exit_placement {
            ExitPlacement::Center => Some(exit_rect.center()),
            ExitPlacement::Random => None,
        };
        let exit = pick_open_cell(
            &grid,
            &self.config,
            &exit_rect,
            preferred_exit,
            &[start],
            context,
        )?;
        let treasure =
            pick_open_cell(&grid, &self.config, &treasure_rect, None, &[start, exit], context)?;

        let start_tile = grid.get(start).unwrap_or(palette.floor);
        grid.set(start, palette.player);
        grid.set(exit, palette.exit);
        grid.set(treasure, palette.treasure);
        if let Some(trace) = &mut self.trace {
            trace.record(TracePhase::EntitiesPlaced, &grid);
        }

        info!(
            "level ready: {} rooms, {} corridors, {} doors after {} room epochs",
            rooms.len(),
            corridors.len(),
            doors.len(),
            stats.room_epochs
        );

        Ok(Level {
            grid,
            rooms,
            corridors,
            graph,
            doors,
            start,
            start_tile,
            exit,
            treasure,
            start_room,
            exit_room,
            treasure_room,
            seed,
            stats,
        })
    }
}

/// Grid and topology of a connected room layout awaiting assembly
struct Layout {
    grid: TileGrid,
    rooms: Vec<Rect>,
    corridors: Vec<Corridor>,
    graph: ConnectivityGraph,
}

/// Generate one level from `config`
///
/// # Errors
///
/// Returns an invalid parameter error for a bad configuration, or
/// [`GenerationError::GenerationFailed`] when no layout could be connected
pub fn generate_level(config: &LevelConfig) -> Result<Level> {
    LevelGenerator::new(config.clone())?.generate()
}

/// Room closest to the top-left corner by `x + y`, first index on ties
///
/// # Errors
///
/// Returns an invariant violation for an empty registry
pub fn select_start_room(rooms: &[Rect]) -> Result<usize> {
    rooms
        .iter()
        .enumerate()
        .min_by_key(|(_, room)| room.corner_distance())
        .map(|(index, _)| index)
        .ok_or_else(|| invariant_violation("start room selection", &"no rooms were placed"))
}

/// Treasure room for a connected graph
///
/// The room farthest from the exit, unless that is the start room. Then the
/// lowest-index room of minimum degree other than start and exit; with too few
/// rooms for that, the minimum-degree room other than the exit, and finally the
/// start room itself.
pub fn select_treasure_room(graph: &ConnectivityGraph, start: usize, exit: usize) -> usize {
    let farthest = graph.farthest_room(exit);
    if farthest != start {
        return farthest;
    }

    let least_connected = |excluded: &[usize]| {
        (0..graph.len())
            .filter(|room| !excluded.contains(room))
            .min_by_key(|&room| graph.degree_of(room))
    };
    least_connected(&[start, exit])
        .or_else(|| least_connected(&[exit]))
        .unwrap_or(start)
}

fn sample_room_count(count: RoomCount, context: &mut GenerationContext) -> usize {
    match count {
        RoomCount::Fixed(count) => count,
        RoomCount::Range(range) => context.rng().random_range(range.min..=range.max),
    }
}

/// The preferred cell if it is open and free, otherwise a random open interior cell
fn pick_open_cell(
    grid: &TileGrid,
    config: &LevelConfig,
    room: &Rect,
    preferred: Option<Point>,
    taken: &[Point],
    context: &mut GenerationContext,
) -> Result<Point> {
    let palette = &config.palette;
    let available = |cell: &Point| {
        room.interior().contains(*cell)
            && !taken.contains(cell)
            && grid
                .get(*cell)
                .is_some_and(|tile| tile == palette.floor || tile == palette.explored)
    };

    if let Some(cell) = preferred.filter(|cell| available(cell)) {
        return Ok(cell);
    }

    let candidates: Vec<Point> = room.interior().cells().filter(|cell| available(cell)).collect();
    if candidates.is_empty() {
        return Err(invariant_violation(
            "entity placement",
            &format!("room at ({}, {}) has no free floor cell left", room.x, room.y),
        ));
    }
    let choice = context.rng().random_range(0..candidates.len());
    candidates.get(choice).copied().ok_or_else(|| {
        invariant_violation("entity placement", &"sampled cell index out of range")
    })
}
