//! Grid accessor: bounds checks, cell access and neighbour enumeration over a
//! caller-owned 2D array.

use std::fmt::{Debug, Display};
use std::ops::Sub;

use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use num::ToPrimitive;

use crate::error::{FloodError, Result};

/// A `(row, column)` pair.
pub type Coord = (usize, usize);

/// Values that can be stored in a grid and filled.
///
/// Implemented for every primitive integer and float type. Incomparable
/// values (NaN) compare as equal.
pub trait Elevation:
    Copy + PartialOrd + Debug + Display + Sub<Output = Self> + ToPrimitive + Send + Sync + 'static
{
}

impl<T> Elevation for T where
    T: Copy + PartialOrd + Debug + Display + Sub<Output = T> + ToPrimitive + Send + Sync + 'static
{
}

const FOUR: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const EIGHT: [(isize, isize); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];

/// Which cells count as neighbours of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Up, down, left, right.
    #[default]
    Four,
    /// The four orthogonal neighbours plus the four diagonals.
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }

    /// Neighbours of `origin` inside a grid of the given `(rows, cols)` shape.
    ///
    /// Cells falling outside the grid are skipped, so border cells yield fewer
    /// neighbours.
    pub fn neighbours(self, origin: Coord, shape: (usize, usize)) -> Neighbours {
        Neighbours {
            origin,
            shape,
            offsets: self.offsets(),
            next: 0,
        }
    }
}

/// Is `(row, col)` inside `[0, rows) x [0, cols)`?
pub fn is_within(row: isize, col: isize, (rows, cols): (usize, usize)) -> bool {
    row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols
}

/// Iterator over the in-bounds neighbours of a cell.
#[derive(Debug, Clone)]
pub struct Neighbours {
    origin: Coord,
    shape: (usize, usize),
    offsets: &'static [(isize, isize)],
    next: usize,
}

impl Iterator for Neighbours {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        while let Some(&(dr, dc)) = self.offsets.get(self.next) {
            self.next += 1;
            let rn = self.origin.0 as isize + dr;
            let cn = self.origin.1 as isize + dc;
            if is_within(rn, cn, self.shape) {
                return Some((rn as usize, cn as usize));
            }
        }
        None
    }
}

/// Mutable, non-empty view over a caller-owned elevation grid.
///
/// The grid is borrowed, never copied: every write lands in the caller's
/// array.
#[derive(Debug)]
pub struct Grid<'a, T> {
    cells: ArrayViewMut2<'a, T>,
}

impl<'a, T: Elevation> Grid<'a, T> {
    /// Binds to an existing 2D view. Fails if either extent is zero.
    pub fn new(cells: ArrayViewMut2<'a, T>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || cols == 0 {
            return Err(FloodError::InvalidDimensions {
                rows,
                cols,
                reason: "both extents must be at least 1".to_string(),
            });
        }
        Ok(Grid { cells })
    }

    /// Binds to a row-major buffer of `rows * cols` values.
    pub fn from_slice(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows.saturating_mul(cols) {
            return Err(FloodError::InvalidDimensions {
                rows,
                cols,
                reason: format!("buffer holds {} values", data.len()),
            });
        }
        let cells = ArrayViewMut2::from_shape((rows, cols), data).map_err(|e| {
            FloodError::InvalidDimensions {
                rows,
                cols,
                reason: e.to_string(),
            }
        })?;
        Grid::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounds predicate. Never panics.
    pub fn contains(&self, (row, col): Coord) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn is_border(&self, (row, col): Coord) -> bool {
        row == 0 || col == 0 || row == self.rows() - 1 || col == self.cols() - 1
    }

    /// Reads a cell. `c` must satisfy [`Grid::contains`].
    pub fn get(&self, c: Coord) -> T {
        self.cells[c]
    }

    /// Writes a cell. `c` must satisfy [`Grid::contains`].
    pub fn set(&mut self, c: Coord, value: T) {
        self.cells[c] = value;
    }

    pub fn neighbours(&self, c: Coord, connectivity: Connectivity) -> Neighbours {
        connectivity.neighbours(c, self.shape())
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        self.cells.view()
    }
}

/// Builds an owned grid from nested rows, rejecting empty or ragged input.
pub fn grid_from_rows<T: Elevation>(rows: Vec<Vec<T>>) -> Result<Array2<T>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if nrows == 0 || ncols == 0 {
        return Err(FloodError::InvalidDimensions {
            rows: nrows,
            cols: ncols,
            reason: "grid is empty".to_string(),
        });
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(FloodError::InvalidDimensions {
            rows: nrows,
            cols: ncols,
            reason: format!("row {} has {} values", i, row.len()),
        });
    }
    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat).map_err(|e| FloodError::InvalidDimensions {
        rows: nrows,
        cols: ncols,
        reason: e.to_string(),
    })
}
