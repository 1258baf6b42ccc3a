//! Symmetric room adjacency matrix and the graph queries generation relies on

use std::collections::VecDeque;

use bitvec::prelude::*;

/// Which room pairs a corridor links directly
///
/// Row `i` holds one bit per room; `connections[i][j]` and `connections[j][i]` are
/// always set together and the diagonal stays clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityGraph {
    rows: Vec<BitVec>,
}

impl ConnectivityGraph {
    /// Graph over `rooms` rooms with no connections
    pub fn new(rooms: usize) -> Self {
        Self {
            rows: vec![bitvec![0; rooms]; rooms],
        }
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the graph has no rooms
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove every connection
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(false);
        }
    }

    /// Link two rooms in both directions
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range or both name the same room.
    pub fn record_connection(&mut self, a: usize, b: usize) {
        assert!(
            a != b && a < self.len() && b < self.len(),
            "cannot connect rooms {a} and {b} in a graph of {} rooms",
            self.len()
        );
        self.set(a, b);
        self.set(b, a);
    }

    /// Whether a corridor links the two rooms directly
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.rows
            .get(a)
            .and_then(|row| row.get(b).as_deref().copied())
            .unwrap_or(false)
    }

    /// Whether every room is reachable from room 0
    ///
    /// An empty graph is never considered connected.
    pub fn is_fully_connected(&self) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut visited = bitvec![0; self.len()];
        let mut stack = vec![0];
        while let Some(room) = stack.pop() {
            if visited.get(room).as_deref().copied().unwrap_or(true) {
                continue;
            }
            if let Some(mut seen) = visited.get_mut(room) {
                *seen = true;
            }
            stack.extend(self.neighbours(room));
        }
        visited.all()
    }

    /// Hop distance from `start` to every room, `None` for unreached rooms
    pub fn distances_from(&self, start: usize) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.len()];
        let Some(first) = distances.get_mut(start) else {
            return distances;
        };
        *first = Some(0);

        let mut queue = VecDeque::from([(start, 0)]);
        while let Some((room, distance)) = queue.pop_front() {
            for next in self.neighbours(room) {
                if let Some(slot) = distances.get_mut(next) {
                    if slot.is_none() {
                        *slot = Some(distance + 1);
                        queue.push_back((next, distance + 1));
                    }
                }
            }
        }
        distances
    }

    /// Room with the greatest hop distance from `start`
    ///
    /// Ties go to the lowest room index. Only meaningful once the graph is fully
    /// connected; unreached rooms are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not a room of this graph.
    pub fn farthest_room(&self, start: usize) -> usize {
        assert!(
            start < self.len(),
            "room {start} is not part of a graph of {} rooms",
            self.len()
        );

        let mut farthest = start;
        let mut best = 0;
        for (room, distance) in self.distances_from(start).into_iter().enumerate() {
            if let Some(distance) = distance {
                if distance > best {
                    best = distance;
                    farthest = room;
                }
            }
        }
        farthest
    }

    /// Number of rooms directly linked to `room`
    pub fn degree_of(&self, room: usize) -> usize {
        self.rows.get(room).map_or(0, |row| row.count_ones())
    }

    /// Degree of every room in index order
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.len()).map(|room| self.degree_of(room)).collect()
    }

    /// Every linked pair once, lower index first
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(a, row)| {
            row.iter_ones()
                .filter(move |&b| b > a)
                .map(move |b| (a, b))
        })
    }

    /// Rooms directly linked to `room`
    pub fn neighbours(&self, room: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows.get(room).into_iter().flat_map(|row| row.iter_ones())
    }

    fn set(&mut self, a: usize, b: usize) {
        if let Some(mut bit) = self.rows.get_mut(a).and_then(|row| row.get_mut(b)) {
            *bit = true;
        }
    }
}
