//! Error types for depression filling and raster I/O.

use thiserror::Error;

/// Errors raised while binding to a grid or running a traversal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FloodError {
    #[error("invalid grid dimensions {rows}x{cols}: {reason}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        reason: String,
    },

    /// A traversal invariant was broken. Should be unreachable.
    #[error("inconsistent traversal state: {0}")]
    InconsistentState(String),
}

/// Errors raised while reading, writing or processing a raster file.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("unsupported raster layout: {0}")]
    UnsupportedLayout(String),

    #[error("band mismatch: {0}")]
    BandMismatch(String),

    #[error(transparent)]
    Flood(#[from] FloodError),
}

pub type Result<T> = std::result::Result<T, FloodError>;
