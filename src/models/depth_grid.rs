//! Metric depth grid
//!
//! Rows x cols matrix of 32-bit depths, one cell per pixel of the cropped
//! region. Cells hold `1 / disparity`; a zero disparity therefore yields a
//! non-finite value which is kept as-is so consumers filter non-finite depth
//! explicitly.

use serde::{Deserialize, Serialize};

/// Cropped metric depth map, serialized as a plain 2-D array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepthGrid {
    values: Vec<Vec<f32>>,
}

impl DepthGrid {
    /// Build a grid from row-major rows. All rows must have equal length.
    pub fn from_rows(values: Vec<Vec<f32>>) -> Self {
        debug_assert!(
            values.windows(2).all(|w| w[0].len() == w[1].len()),
            "depth grid rows must have equal length"
        );
        Self { values }
    }

    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.values.first().map(Vec::len).unwrap_or(0)
    }

    /// Depth at `(row, col)`, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn values(&self) -> &[Vec<f32>] {
        &self.values
    }
}
