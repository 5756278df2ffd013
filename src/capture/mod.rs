//! Capture conversion and packaging
//!
//! Pure conversions from raw sensor buffers to the serializable capture
//! envelope, plus the pipeline that persists one capture as a pair of files
//! and a history record. Geometry failures abort before anything is written.

pub mod crop;
pub mod depth;
pub mod mask;
pub mod pipeline;

use thiserror::Error;

pub use pipeline::{package_capture, CaptureError, RawCapture};

/// Geometry error types
///
/// All of these abort a capture before any I/O or network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The computed pixel region has zero or negative extent
    #[error("crop region is empty: {rows} x {cols} px")]
    InvalidRegion { rows: i64, cols: i64 },

    /// The computed pixel region falls outside the source frame.
    /// Rejected rather than clamped so geometry stays deterministic.
    #[error("crop rect exceeds source bounds: rows {start_row}..{end_row}, cols {start_col}..{end_col}")]
    CropOutOfBounds {
        start_row: i64,
        end_row: i64,
        start_col: i64,
        end_col: i64,
    },

    /// A flat buffer does not match its declared dimensions
    #[error("buffer of length {len} does not match {width} x {height}")]
    ShapeMismatch {
        len: usize,
        width: usize,
        height: usize,
    },
}
