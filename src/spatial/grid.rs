//! Fixed-size character grid holding one tile glyph per cell
//!
//! Every generation phase mutates the same grid in place. Rows are the first
//! array axis and columns the second, so a [`Point`] maps to `[y, x]`.

use ndarray::Array2;

use crate::spatial::geometry::{Point, Rect};

/// Glyphs used when stamping a room border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallGlyphs {
    /// Every border cell gets the same glyph (a room index digit, a corridor letter)
    Uniform(char),
    /// Top and bottom rows use `horizontal`, the side columns use `vertical`
    Boxed {
        /// Glyph for the first and last row
        horizontal: char,
        /// Glyph for the first and last column
        vertical: char,
    },
}

/// Two-dimensional tile buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Array2<char>,
}

impl TileGrid {
    /// Create a grid with every cell set to `fill`
    pub fn new(rows: usize, cols: usize, fill: char) -> Self {
        Self {
            tiles: Array2::from_elem((rows, cols), fill),
        }
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Rectangle covering the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.cols() as i32, self.rows() as i32)
    }

    /// Whether the point lies on the grid
    pub fn in_bounds(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Set every cell to `tile`
    pub fn fill(&mut self, tile: char) {
        self.tiles.fill(tile);
    }

    /// Glyph at a point, `None` outside the grid
    pub fn get(&self, point: Point) -> Option<char> {
        let index = Self::index(point)?;
        self.tiles.get(index).copied()
    }

    /// Overwrite the glyph at a point
    ///
    /// # Panics
    ///
    /// Panics if the point lies outside the grid. Callers own the bounds contract.
    pub fn set(&mut self, point: Point, tile: char) {
        let cell = Self::index(point).and_then(|index| self.tiles.get_mut(index));
        assert!(cell.is_some(), "write outside the grid at {point:?}");
        if let Some(cell) = cell {
            *cell = tile;
        }
    }

    /// Stamp a rectangle: border cells get the wall glyphs, everything else `floor`
    ///
    /// # Panics
    ///
    /// Panics if the rectangle is not fully inside the grid.
    pub fn paint_room(&mut self, rect: &Rect, walls: WallGlyphs, floor: char) {
        assert!(
            self.bounds().contains_rect(rect),
            "room {rect:?} does not fit a {}x{} grid",
            self.rows(),
            self.cols()
        );

        let last_x = rect.right() - 1;
        let last_y = rect.bottom() - 1;
        for cell in rect.cells() {
            let on_row_edge = cell.y == rect.y || cell.y == last_y;
            let on_col_edge = cell.x == rect.x || cell.x == last_x;
            let tile = match walls {
                WallGlyphs::Uniform(glyph) if on_row_edge || on_col_edge => glyph,
                WallGlyphs::Boxed { horizontal, .. } if on_row_edge => horizontal,
                WallGlyphs::Boxed { vertical, .. } if on_col_edge => vertical,
                _ => floor,
            };
            self.set(cell, tile);
        }
    }

    /// Overwrite every interior cell of a rectangle with `tile`
    pub fn fill_interior(&mut self, rect: &Rect, tile: char) {
        for cell in rect.interior().cells() {
            if self.in_bounds(cell) {
                self.set(cell, tile);
            }
        }
    }

    /// Replace every occurrence of one glyph with another, returning the count
    pub fn replace_all(&mut self, from: char, to: char) -> usize {
        let mut replaced = 0;
        for cell in &mut self.tiles {
            if *cell == from {
                *cell = to;
                replaced += 1;
            }
        }
        replaced
    }

    /// Count cells holding the given glyph
    pub fn count(&self, tile: char) -> usize {
        self.tiles.iter().filter(|&&cell| cell == tile).count()
    }

    /// Iterate over rows as glyph slices, top to bottom
    pub fn row_iter(&self) -> impl Iterator<Item = Vec<char>> + '_ {
        self.tiles.rows().into_iter().map(|row| row.to_vec())
    }

    /// Iterate over every cell with its coordinate, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| (Point::new(col as i32, row as i32), tile))
    }

    /// Stable FNV-1a fingerprint of the grid contents
    ///
    /// Used to compare seeded generations without keeping whole grids around.
    pub fn fingerprint(&self) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = OFFSET;
        for &tile in &self.tiles {
            for byte in u32::from(tile).to_le_bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(PRIME);
            }
        }
        hash
    }

    fn index(point: Point) -> Option<[usize; 2]> {
        let row = usize::try_from(point.y).ok()?;
        let col = usize::try_from(point.x).ok()?;
        Some([row, col])
    }
}
