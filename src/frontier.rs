//! The two frontiers of a priority-flood traversal.
//!
//! `Open` holds cells waiting at their own elevation and always yields the
//! lowest one first. `Pit` holds cells that were just raised onto a plateau
//! and is drained in discovery order before `Open` is touched again.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::grid::{Coord, Elevation};

#[derive(Debug)]
struct OpenCell<T> {
    elevation: T,
    seq: u64,
    cell: Coord,
}

impl<T: Elevation> PartialEq for OpenCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Elevation> Eq for OpenCell<T> {}

impl<T: Elevation> PartialOrd for OpenCell<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the lowest elevation, oldest first among ties.
impl<T: Elevation> Ord for OpenCell<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .elevation
            .partial_cmp(&self.elevation)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority frontier keyed by elevation.
#[derive(Debug)]
pub struct Open<T> {
    heap: BinaryHeap<OpenCell<T>>,
    seq: u64,
}

impl<T: Elevation> Open<T> {
    pub fn new() -> Self {
        Open {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn insert(&mut self, elevation: T, cell: Coord) {
        self.heap.push(OpenCell {
            elevation,
            seq: self.seq,
            cell,
        });
        self.seq += 1;
    }

    /// Removes the lowest entry. Equal elevations come out in insertion order.
    pub fn pop_lowest(&mut self) -> Option<(T, Coord)> {
        self.heap.pop().map(|c| (c.elevation, c.cell))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Elevation> Default for Open<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// FIFO of plateau cells.
#[derive(Debug, Default)]
pub struct Pit {
    queue: VecDeque<Coord>,
}

impl Pit {
    pub fn new() -> Self {
        Pit::default()
    }

    pub fn push(&mut self, cell: Coord) {
        self.queue.push_back(cell);
    }

    pub fn pop(&mut self) -> Option<Coord> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
