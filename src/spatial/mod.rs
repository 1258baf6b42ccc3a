//! Spatial data structures for level generation
//!
//! This module contains spatial-related functionality including:
//! - Rectangle and point geometry with both overlap policies
//! - The character tile grid
//! - The 3x3 quadrant partition

/// Rectangles, points, directions and overlap tests
pub mod geometry;
/// Tile grid storage and painting primitives
pub mod grid;
/// Quadrant layout, adjacency table and connectivity check
pub mod quadrants;

pub use geometry::{Direction, Overlap, Point, Rect};
pub use grid::{TileGrid, WallGlyphs};
