//! Closed-set tracking for a single traversal.

use ndarray::Array2;

use crate::grid::Coord;

/// Boolean mask of finalized cells. A closed cell is never reopened.
#[derive(Debug, Clone)]
pub struct ClosedMask {
    cells: Array2<bool>,
    count: usize,
}

impl ClosedMask {
    pub fn new(shape: (usize, usize)) -> Self {
        ClosedMask {
            cells: Array2::from_elem(shape, false),
            count: 0,
        }
    }

    pub fn is_closed(&self, c: Coord) -> bool {
        self.cells[c]
    }

    /// Marks `c` closed. Returns `false` if it already was.
    pub fn close(&mut self, c: Coord) -> bool {
        if self.cells[c] {
            return false;
        }
        self.cells[c] = true;
        self.count += 1;
        true
    }

    /// Number of closed cells.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_complete(&self) -> bool {
        self.count == self.cells.len()
    }
}
