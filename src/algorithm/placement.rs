//! Room packing: free placement with overlap rejection, or one room per quadrant

use log::debug;
use rand::Rng;

use crate::algorithm::context::GenerationContext;
use crate::io::configuration::{CorridorStrategy, LevelConfig, PlacementStrategy, RoomSpacing};
use crate::io::error::{GenerationError, Result, invariant_violation};
use crate::spatial::geometry::{Overlap, Rect};
use crate::spatial::grid::{TileGrid, WallGlyphs};
use crate::spatial::quadrants::{QUADRANT_COUNT, quadrant_bounds, quadrant_glyph};

/// Wall glyphs for the room at `index` under the configured corridor style
///
/// Rectangular corridors rely on digit walls to locate doors, bent corridors on
/// boxed `-`/`|` walls.
pub fn room_walls(config: &LevelConfig, index: usize) -> WallGlyphs {
    match config.corridors {
        CorridorStrategy::Rectangular => WallGlyphs::Uniform(room_tag(index)),
        CorridorStrategy::BentWalk => WallGlyphs::Boxed {
            horizontal: config.palette.horizontal_wall,
            vertical: config.palette.vertical_wall,
        },
    }
}

/// Paint every room onto the grid with its wall glyphs
pub fn paint_rooms(grid: &mut TileGrid, rooms: &[Rect], config: &LevelConfig) {
    for (index, room) in rooms.iter().enumerate() {
        grid.paint_room(room, room_walls(config, index), config.palette.floor);
    }
}

/// Places a batch of rooms according to the configured strategy
pub struct RoomPlacer<'a> {
    config: &'a LevelConfig,
}

impl<'a> RoomPlacer<'a> {
    /// Placer reading sizes, margins and caps from `config`
    pub const fn new(config: &'a LevelConfig) -> Self {
        Self { config }
    }

    /// Place `count` rooms, stamping each into the grid as soon as it is accepted
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::PlacementExhausted`] when the batch restart cap
    /// is reached, or an invariant violation when no quadrant is left for a room
    pub fn place(
        &self,
        grid: &mut TileGrid,
        context: &mut GenerationContext,
        count: usize,
    ) -> Result<Vec<Rect>> {
        match self.config.placement {
            PlacementStrategy::Free => self.place_free(grid, context, count),
            PlacementStrategy::Quadrant => self.place_in_quadrants(grid, context, count),
        }
    }

    fn place_free(
        &self,
        grid: &mut TileGrid,
        context: &mut GenerationContext,
        count: usize,
    ) -> Result<Vec<Rect>> {
        grid.fill(self.config.palette.empty);
        let mut rooms: Vec<Rect> = Vec::with_capacity(count);
        let mut failures = 0;
        let mut restarts = 0;

        while rooms.len() < count {
            let candidate = self.sample_free_room(context).with_tag(room_tag(rooms.len()));
            if rooms.iter().any(|room| self.conflicts(&candidate, room)) {
                failures += 1;
                if failures >= self.config.max_placement_attempts {
                    restarts += 1;
                    grid.fill(self.config.palette.empty);
                    if restarts >= self.config.max_placement_restarts {
                        return Err(GenerationError::PlacementExhausted {
                            rooms_requested: count,
                            restarts,
                        });
                    }
                    debug!(
                        "restarting room batch after {failures} rejected samples ({} of {count} placed)",
                        rooms.len()
                    );
                    rooms.clear();
                    failures = 0;
                }
                continue;
            }

            failures = 0;
            grid.paint_room(
                &candidate,
                room_walls(self.config, rooms.len()),
                self.config.palette.floor,
            );
            rooms.push(candidate);
        }

        Ok(rooms)
    }

    fn sample_free_room(&self, context: &mut GenerationContext) -> Rect {
        let margin = self.config.margin as i32;
        let size = self.config.room_size;
        let rng = context.rng();

        let width = rng.random_range(size.min..=size.max) as i32;
        let height = rng.random_range(size.min..=size.max) as i32;
        let x = rng.random_range(margin..=self.config.cols as i32 - margin - width);
        let y = rng.random_range(margin..=self.config.rows as i32 - margin - height);
        Rect::new(x, y, width, height)
    }

    fn conflicts(&self, candidate: &Rect, placed: &Rect) -> bool {
        match self.config.spacing {
            RoomSpacing::Gap => candidate.overlaps(&placed.expanded(1), Overlap::Exclusive),
            RoomSpacing::Touching => candidate.overlaps(placed, Overlap::Exclusive),
        }
    }

    fn place_in_quadrants(
        &self,
        grid: &mut TileGrid,
        context: &mut GenerationContext,
        count: usize,
    ) -> Result<Vec<Rect>> {
        let mut restarts = 0;

        loop {
            context.quadrants.clear();
            grid.fill(self.config.palette.empty);

            let mut rooms = Vec::with_capacity(count);
            for index in 0..count {
                let start = context.rng().random_range(0..QUADRANT_COUNT);
                let quadrant = context.quadrants.probe_unused(start).ok_or_else(|| {
                    invariant_violation(
                        "quadrant placement",
                        &format!("no free quadrant left for room {index} of {count}"),
                    )
                })?;

                let room = self.sample_quadrant_room(context, quadrant);
                context.quadrants.assign(quadrant, index);
                grid.paint_room(&room, room_walls(self.config, index), self.config.palette.floor);
                rooms.push(room);
            }

            if context.quadrants.is_cardinally_connected() {
                return Ok(rooms);
            }

            restarts += 1;
            if restarts >= self.config.max_placement_restarts {
                grid.fill(self.config.palette.empty);
                return Err(GenerationError::PlacementExhausted {
                    rooms_requested: count,
                    restarts,
                });
            }
            context.perturb_seed();
            debug!(
                "quadrant layout not cardinally connected, reseeding with {}",
                context.seed()
            );
        }
    }

    fn sample_quadrant_room(&self, context: &mut GenerationContext, quadrant: usize) -> Rect {
        let interior = quadrant_bounds(quadrant, self.config.rows, self.config.cols)
            .inset(self.config.margin as i32);
        let min = self.config.min_room_size as i32;
        let rng = context.rng();

        let width = rng.random_range(min..=interior.width);
        let height = rng.random_range(min..=interior.height);
        let x = interior.x + rng.random_range(0..=interior.width - width);
        let y = interior.y + rng.random_range(0..=interior.height - height);
        Rect::new(x, y, width, height).with_tag(quadrant_glyph(quadrant))
    }
}

fn room_tag(index: usize) -> char {
    char::from_digit(index as u32 % 10, 10).unwrap_or('0')
}
