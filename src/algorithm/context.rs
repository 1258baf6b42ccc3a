//! Mutable state shared by the generation phases of one level

use bitvec::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::spatial::geometry::Direction;
use crate::spatial::quadrants::QuadrantLayout;

/// Per room, per wall flag recording whether a corridor already attaches there
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallUsage {
    bits: BitVec,
}

impl WallUsage {
    /// Tracker with every wall of `rooms` rooms unused
    pub fn new(rooms: usize) -> Self {
        Self {
            bits: bitvec![0; rooms * Direction::ALL.len()],
        }
    }

    /// Resize for `rooms` rooms and mark every wall unused
    pub fn reset(&mut self, rooms: usize) {
        self.bits = bitvec![0; rooms * Direction::ALL.len()];
    }

    /// Mark every wall unused, keeping the room count
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Whether the wall of `room` facing `direction` is taken
    pub fn is_used(&self, room: usize, direction: Direction) -> bool {
        self.bits
            .get(Self::slot(room, direction))
            .as_deref()
            .copied()
            .unwrap_or(false)
    }

    /// Record a corridor attachment on a wall
    pub fn mark(&mut self, room: usize, direction: Direction) {
        if let Some(mut bit) = self.bits.get_mut(Self::slot(room, direction)) {
            *bit = true;
        }
    }

    /// Number of walls taken across all rooms
    pub fn used_count(&self) -> usize {
        self.bits.count_ones()
    }

    const fn slot(room: usize, direction: Direction) -> usize {
        room * Direction::ALL.len() + direction.index()
    }
}

/// Seeded random source plus the bookkeeping the placement and routing phases share
///
/// One context belongs to one level build, so independent builds never share
/// quadrant slots, wall flags or generator state.
pub struct GenerationContext {
    rng: StdRng,
    seed: u64,
    /// Room index held by each quadrant
    pub quadrants: QuadrantLayout,
    /// Walls already consumed by bent corridors
    pub walls: WallUsage,
}

impl GenerationContext {
    /// Fresh context seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            quadrants: QuadrantLayout::new(),
            walls: WallUsage::default(),
        }
    }

    /// Seed the random source currently runs from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Random source for sampling
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Reseed the random source with the next seed value
    pub fn perturb_seed(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Forget the quadrant layout and wall usage of the previous room layout
    pub fn reset_layout(&mut self, rooms: usize) {
        self.quadrants.clear();
        self.walls.reset(rooms);
    }
}
