//! # Priority-flood
//!
//! `priority-flood` fills depressions in rectangular grids of ordered values: digital elevation
//! models, or single channels of an image.  After filling, every cell has a non-decreasing path
//! to the grid border, so flow routing and watershed labelling no longer get trapped in sinks.
//!
//! The traversal is Algorithm 2 of Barnes, Lehman & Mulla (2014), "Priority-Flood: An Optimal
//! Depression-Filling and Watershed-Labeling Algorithm for Digital Elevation Models".  Each
//! traversal owns its grid, closed mask and queues, so independent grids (e.g. the bands of an
//! RGB image) can be filled in parallel; see [`fill_channels`].
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use priority_flood::{fill_depressions, FloodParams};
//!
//! let mut dem = array![
//!     [5, 5, 5],
//!     [5, 1, 5],
//!     [5, 5, 5],
//! ];
//!
//! let stats = fill_depressions(&mut dem, &FloodParams::default())?;
//! assert_eq!(dem, array![[5, 5, 5], [5, 5, 5], [5, 5, 5]]);
//! assert_eq!(stats.raised, 1);
//! # Ok::<(), priority_flood::FloodError>(())
//! ```
pub mod channels;
pub mod closed;
pub mod error;
pub mod flood;
pub mod frontier;
pub mod grid;
pub mod observer;
pub mod phase;
pub mod raster;

pub use channels::{difference, fill_channels, merge_channels, split_channels};
pub use error::{FloodError, RasterError, Result};
pub use flood::{FloodParams, FloodStats, PriorityFlood, fill_depressions, find_pits, seed_cells};
pub use grid::{Connectivity, Coord, Elevation, Grid, grid_from_rows};
pub use observer::{FloodObserver, LogObserver, Queue, Silent};
pub use phase::Phases;
pub use raster::{Bands, Raster, decode_raster, encode_raster, read_raster, write_raster};
