//! Procedural dungeon level generation on a character grid
//!
//! Rooms are packed onto the grid, joined by corridors until the room adjacency
//! graph is connected, and corridor junctions on room walls become doors. The
//! player start, exit and treasure are then placed in rooms chosen from the
//! graph, and a small movement session lets a player walk the result.

#![forbid(unsafe_code)]

/// Room placement, corridor routing, door resolution and level assembly
pub mod algorithm;
/// Configuration, errors, rendering, exports and the command line
pub mod io;
/// Movement over a finished level
pub mod play;
/// Geometry, tile grid and quadrant partition
pub mod spatial;

pub use algorithm::assembler::{Level, LevelGenerator, generate_level};
pub use io::configuration::LevelConfig;
pub use io::error::{GenerationError, Result};
