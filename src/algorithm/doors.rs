//! Final grid scan turning corridor junctions on room walls into doors

use crate::io::configuration::{CorridorStrategy, Palette};
use crate::spatial::geometry::{Direction, Point};
use crate::spatial::grid::TileGrid;

const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Convert wall cells where a corridor meets a room into doors
///
/// Scans interior cells row by row (the outermost ring is skipped) and returns the
/// door positions in scan order. Must run once every corridor is committed.
///
/// Rectangular style: a digit wall cell becomes a door when exactly two of its
/// eight neighbours are corridor letters.
///
/// Bent style: a `-`/`|` wall cell becomes a door when its orthogonal neighbours
/// that are floor or pending plus its diagonal neighbours that are wall, door or floor
/// total exactly four. The first pending neighbour (up, down, left, right) is then
/// demoted to a corridor tile. Pending tiles left over afterwards are demoted too.
pub fn resolve_doors(
    grid: &mut TileGrid,
    palette: &Palette,
    style: CorridorStrategy,
) -> Vec<Point> {
    let mut doors = Vec::new();
    let rows = grid.rows() as i32;
    let cols = grid.cols() as i32;

    for y in 1..rows - 1 {
        for x in 1..cols - 1 {
            let cell = Point::new(x, y);
            let Some(tile) = grid.get(cell) else {
                continue;
            };

            let is_door = match style {
                CorridorStrategy::Rectangular => {
                    tile.is_ascii_digit() && letter_neighbours(grid, cell) == 2
                }
                CorridorStrategy::BentWalk => {
                    (tile == palette.horizontal_wall || tile == palette.vertical_wall)
                        && bent_junction_score(grid, palette, cell) == 4
                }
            };
            if !is_door {
                continue;
            }

            grid.set(cell, palette.door);
            doors.push(cell);

            if style == CorridorStrategy::BentWalk {
                demote_first_pending(grid, palette, cell);
            }
        }
    }

    if style == CorridorStrategy::BentWalk {
        grid.replace_all(palette.pending_door, palette.corridor);
    }

    doors
}

fn neighbours(cell: Point) -> impl Iterator<Item = Point> {
    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(|&offset| offset != (0, 0))
        .map(move |(dx, dy)| Point::new(cell.x + dx, cell.y + dy))
}

fn letter_neighbours(grid: &TileGrid, cell: Point) -> usize {
    neighbours(cell)
        .filter(|&point| grid.get(point).is_some_and(|tile| tile.is_ascii_lowercase()))
        .count()
}

fn bent_junction_score(grid: &TileGrid, palette: &Palette, cell: Point) -> usize {
    let orthogonal = Direction::ALL
        .into_iter()
        .filter_map(|direction| grid.get(cell.step(direction)))
        .filter(|&tile| tile == palette.floor || tile == palette.pending_door)
        .count();
    let diagonal = DIAGONALS
        .into_iter()
        .filter_map(|(dx, dy)| grid.get(Point::new(cell.x + dx, cell.y + dy)))
        .filter(|&tile| {
            tile == palette.floor
                || tile == palette.horizontal_wall
                || tile == palette.vertical_wall
                || tile == palette.door
        })
        .count();
    orthogonal + diagonal
}

fn demote_first_pending(grid: &mut TileGrid, palette: &Palette, door: Point) {
    let pending = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ]
    .into_iter()
    .map(|direction| door.step(direction))
    .find(|&point| grid.get(point) == Some(palette.pending_door));

    if let Some(point) = pending {
        grid.set(point, palette.corridor);
    }
}
