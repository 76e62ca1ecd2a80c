//! Splitting pixel-interleaved images into single-band grids, filling each
//! band independently and merging them back.

use ndarray::{Array2, Array3, ArrayView2, Axis, Zip};
use rayon::prelude::*;

use crate::error::{FloodError, Result};
use crate::flood::{FloodParams, FloodStats, fill_view};
use crate::grid::Elevation;

/// De-interleaves `data` (row-major, `channels` samples per pixel) into one
/// grid per channel.
pub fn split_channels<T: Elevation>(
    data: &[T],
    rows: usize,
    cols: usize,
    channels: usize,
) -> Result<Vec<Array2<T>>> {
    if rows == 0 || cols == 0 || channels == 0 {
        return Err(FloodError::InvalidDimensions {
            rows,
            cols,
            reason: format!("{} channels requested", channels),
        });
    }
    let pixels = Array3::from_shape_vec((rows, cols, channels), data.to_vec()).map_err(|e| {
        FloodError::InvalidDimensions {
            rows,
            cols,
            reason: format!("{} values for {} channels: {}", data.len(), channels, e),
        }
    })?;
    Ok(pixels
        .axis_iter(Axis(2))
        .map(|band| band.to_owned())
        .collect())
}

/// Interleaves equally shaped bands back into a row-major pixel buffer.
pub fn merge_channels<T: Elevation>(bands: &[Array2<T>]) -> Result<Vec<T>> {
    let Some(first) = bands.first() else {
        return Err(FloodError::InvalidDimensions {
            rows: 0,
            cols: 0,
            reason: "no bands to merge".to_string(),
        });
    };
    let (rows, cols) = first.dim();
    if let Some(other) = bands.iter().find(|b| b.dim() != (rows, cols)) {
        return Err(FloodError::InvalidDimensions {
            rows: other.nrows(),
            cols: other.ncols(),
            reason: format!("band shape differs from the first band ({}x{})", rows, cols),
        });
    }
    let pixels = Array3::from_shape_fn((rows, cols, bands.len()), |(r, c, b)| bands[b][[r, c]]);
    Ok(pixels.into_raw_vec())
}

/// Fills every band with its own traversal, in parallel.
///
/// Bands share no state. Stats are returned in band order; the first failing
/// band aborts the whole call.
pub fn fill_channels<T: Elevation>(
    bands: &mut [Array2<T>],
    params: &FloodParams,
) -> Result<Vec<FloodStats>> {
    bands
        .par_iter_mut()
        .enumerate()
        .map(|(i, band)| fill_view(band.view_mut(), params, &format!("band {}", i)))
        .collect()
}

/// Per-cell `filled - original`. Filling only raises values, so this never
/// goes negative.
pub fn difference<T: Elevation>(filled: ArrayView2<'_, T>, original: ArrayView2<'_, T>) -> Result<Array2<T>> {
    if filled.dim() != original.dim() {
        return Err(FloodError::InvalidDimensions {
            rows: original.nrows(),
            cols: original.ncols(),
            reason: format!("filled grid is {}x{}", filled.nrows(), filled.ncols()),
        });
    }
    Ok(Zip::from(&filled)
        .and(&original)
        .map_collect(|&f, &o| if f > o { f - o } else { o - o }))
}
