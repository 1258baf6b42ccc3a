/// Level assembly and objective room selection
pub mod assembler;
/// Per-level generation state: seeded RNG, quadrant slots, wall usage
pub mod context;
/// Corridor synthesis with epoch rollback
pub mod corridors;
/// Door resolution scan
pub mod doors;
/// Room adjacency matrix and graph queries
pub mod graph;
/// Free and quadrant room placement
pub mod placement;
