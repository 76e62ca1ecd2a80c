//! Priority-Flood depression filling (Barnes, Lehman & Mulla 2014, Algorithm 2).
//!
//! Border cells seed a min-priority queue (`Open`). Cells are expanded lowest
//! first; any unvisited neighbour at or below the expanded cell is lifted to
//! its level and put on a FIFO (`Pit`) that is drained before `Open` is
//! consulted again, so a filled depression is flooded breadth-first at a
//! single level. Every cell is closed exactly once, giving O(n log n) overall.
//!
//! Reference: Barnes, R., Lehman, C., Mulla, D. (2014). Priority-Flood: An
//! optimal depression-filling and watershed-labeling algorithm for digital
//! elevation models. *Computers & Geosciences*, 62, 117-127.

use log::{debug, warn};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use rayon::prelude::*;

use crate::closed::ClosedMask;
use crate::error::{FloodError, Result};
use crate::frontier::{Open, Pit};
use crate::grid::{Connectivity, Coord, Elevation, Grid};
use crate::observer::{FloodObserver, LogObserver, Queue, Silent};

/// Options for a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloodParams {
    /// Neighbourhood used when expanding a cell.
    pub connectivity: Connectivity,
    /// Narrate every traversal event at `trace` level.
    pub verbose: bool,
}

/// Counters collected by one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloodStats {
    /// Border cells placed on `Open` before the main loop.
    pub seeded: usize,
    /// Cells taken off either frontier and expanded.
    pub expanded: usize,
    /// Cells whose value strictly increased.
    pub raised: usize,
    /// Sum of all increases.
    pub volume: f64,
}

/// A traversal bound to one grid.
///
/// The grid is mutated in place by [`PriorityFlood::run`]. The closed mask and
/// both frontiers live only for the duration of a run, so a handle can be run
/// again and independent handles share nothing.
///
/// ```
/// use ndarray::array;
/// use priority_flood::PriorityFlood;
///
/// let mut dem = array![[5, 5, 5], [5, 1, 5], [5, 5, 5]];
/// PriorityFlood::new(&mut dem)?.run()?;
/// assert_eq!(dem[[1, 1]], 5);
/// # Ok::<(), priority_flood::FloodError>(())
/// ```
#[derive(Debug)]
pub struct PriorityFlood<'a, T, O = Silent> {
    grid: Grid<'a, T>,
    connectivity: Connectivity,
    observer: O,
    stats: FloodStats,
}

impl<'a, T: Elevation> PriorityFlood<'a, T, Silent> {
    /// Binds to `dem`. Fails with `InvalidDimensions` if it has no rows or no
    /// columns.
    pub fn new(dem: &'a mut Array2<T>) -> Result<Self> {
        Self::from_view(dem.view_mut())
    }

    pub fn from_view(view: ArrayViewMut2<'a, T>) -> Result<Self> {
        Ok(Self::from_grid(Grid::new(view)?))
    }

    /// Binds to a row-major buffer holding `rows * cols` values.
    pub fn from_slice(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_grid(Grid::from_slice(data, rows, cols)?))
    }

    pub fn from_grid(grid: Grid<'a, T>) -> Self {
        PriorityFlood {
            grid,
            connectivity: Connectivity::default(),
            observer: Silent,
            stats: FloodStats::default(),
        }
    }
}

impl<'a, T: Elevation, O: FloodObserver<T>> PriorityFlood<'a, T, O> {
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Replaces the observer notified during [`PriorityFlood::run`].
    pub fn with_observer<P: FloodObserver<T>>(self, observer: P) -> PriorityFlood<'a, T, P> {
        PriorityFlood {
            grid: self.grid,
            connectivity: self.connectivity,
            observer,
            stats: self.stats,
        }
    }

    pub fn grid(&self) -> &Grid<'a, T> {
        &self.grid
    }

    /// Counters from the most recent run.
    pub fn stats(&self) -> &FloodStats {
        &self.stats
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Fills every depression of the bound grid in place.
    pub fn run(&mut self) -> Result<()> {
        let shape = self.grid.shape();
        let mut closed = ClosedMask::new(shape);
        let mut open = Open::new();
        let mut pit = Pit::new();
        self.stats = FloodStats::default();

        self.seed(&mut open, &mut closed)?;
        debug!("seeded {} border cells of a {}x{} grid", self.stats.seeded, shape.0, shape.1);

        while !open.is_empty() || !pit.is_empty() {
            let (c, from) = match pit.pop() {
                Some(c) => (c, Queue::Pit),
                None => match open.pop_lowest() {
                    Some((_, c)) => (c, Queue::Open),
                    None => {
                        return Err(FloodError::InconsistentState(
                            "Open reported entries but yielded none".to_string(),
                        ));
                    }
                },
            };
            if !self.grid.contains(c) {
                warn!("skipping out-of-grid cell {:?}", c);
                continue;
            }

            let z = self.grid.get(c);
            self.observer.popped(c, z, from);
            self.stats.expanded += 1;

            for n in self.grid.neighbours(c, self.connectivity) {
                if !closed.close(n) {
                    continue;
                }
                let zn = self.grid.get(n);
                if zn <= z {
                    if zn < z {
                        self.grid.set(n, z);
                        self.stats.raised += 1;
                        self.stats.volume += raise_amount(zn, z);
                        self.observer.raised(n, zn, z);
                    }
                    pit.push(n);
                    self.observer.enqueued(n, z, Queue::Pit);
                } else {
                    open.insert(zn, n);
                    self.observer.enqueued(n, zn, Queue::Open);
                }
            }
        }

        if !closed.is_complete() {
            return Err(FloodError::InconsistentState(format!(
                "{} of {} cells closed when the frontiers ran dry",
                closed.count(),
                self.grid.len()
            )));
        }
        debug!(
            "expanded {} cells, raised {} by a total of {}",
            self.stats.expanded, self.stats.raised, self.stats.volume
        );
        Ok(())
    }

    fn seed(&mut self, open: &mut Open<T>, closed: &mut ClosedMask) -> Result<()> {
        for c in seed_cells(self.grid.shape()) {
            if !closed.close(c) {
                return Err(FloodError::InconsistentState(format!(
                    "border cell {:?} seeded twice",
                    c
                )));
            }
            let z = self.grid.get(c);
            open.insert(z, c);
            self.stats.seeded += 1;
            self.observer.seeded(c, z);
        }
        Ok(())
    }
}

fn raise_amount<T: Elevation>(from: T, to: T) -> f64 {
    match (from.to_f64(), to.to_f64()) {
        (Some(a), Some(b)) => b - a,
        _ => 0.0,
    }
}

/// The cells a traversal starts from, each listed once.
///
/// A single row is seeded only at its two ends; otherwise the whole outer
/// ring is seeded, top and bottom rows first.
pub fn seed_cells((rows, cols): (usize, usize)) -> Vec<Coord> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    if rows == 1 {
        return if cols == 1 { vec![(0, 0)] } else { vec![(0, 0), (0, cols - 1)] };
    }
    let mut cells = Vec::with_capacity(2 * (rows + cols));
    for col in 0..cols {
        cells.push((0, col));
        cells.push((rows - 1, col));
    }
    for row in 1..rows - 1 {
        cells.push((row, 0));
        if cols > 1 {
            cells.push((row, cols - 1));
        }
    }
    cells
}

fn is_seed((row, col): Coord, (rows, cols): (usize, usize)) -> bool {
    if rows == 1 {
        col == 0 || col == cols - 1
    } else {
        row == 0 || col == 0 || row == rows - 1 || col == cols - 1
    }
}

/// Fills depressions in `dem` in place and returns the run's counters.
///
/// ```
/// use ndarray::array;
/// use priority_flood::{fill_depressions, FloodParams};
///
/// let mut dem = array![[9.0, 9.0, 1.0, 9.0, 9.0]];
/// let stats = fill_depressions(&mut dem, &FloodParams::default())?;
/// assert_eq!(dem, array![[9.0, 9.0, 9.0, 9.0, 9.0]]);
/// assert_eq!(stats.raised, 1);
/// # Ok::<(), priority_flood::FloodError>(())
/// ```
pub fn fill_depressions<T: Elevation>(dem: &mut Array2<T>, params: &FloodParams) -> Result<FloodStats> {
    fill_view(dem.view_mut(), params, "")
}

pub(crate) fn fill_view<T: Elevation>(
    view: ArrayViewMut2<'_, T>,
    params: &FloodParams,
    label: &str,
) -> Result<FloodStats> {
    let flood = PriorityFlood::from_view(view)?.with_connectivity(params.connectivity);
    if params.verbose {
        let mut flood = flood.with_observer(LogObserver::new(label));
        flood.run()?;
        Ok(*flood.stats())
    } else {
        let mut flood = flood;
        flood.run()?;
        Ok(*flood.stats())
    }
}

/// Cells strictly lower than every neighbour, excluding the cells a traversal
/// would seed from. A filled grid has none.
///
/// Rows are scanned in parallel.
pub fn find_pits<T: Elevation>(dem: ArrayView2<'_, T>, connectivity: Connectivity) -> Vec<Coord> {
    let shape = dem.dim();
    (0..shape.0)
        .into_par_iter()
        .flat_map(|row| {
            let mut local_pits = Vec::new();
            for col in 0..shape.1 {
                if is_seed((row, col), shape) {
                    continue;
                }
                let z = dem[[row, col]];
                // is anything at or below me?
                let apit = connectivity.neighbours((row, col), shape).all(|n| dem[n] > z);
                if apit {
                    local_pits.push((row, col));
                }
            }
            local_pits
        })
        .collect()
}
