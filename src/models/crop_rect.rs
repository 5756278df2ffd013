//! Normalized crop rectangle
//!
//! The same rect value must be applied to both the color image and the depth
//! buffer of one capture, otherwise the two modalities desynchronize spatially.

use serde::{Deserialize, Serialize};

/// Point in normalized [0,1] coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPoint {
    pub x: f64,
    pub y: f64,
}

/// Extent in normalized [0,1] coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSize {
    pub width: f64,
    pub height: f64,
}

/// Normalized crop rectangle, origin plus size
///
/// Serializes to the `{"origin": {...}, "size": {...}}` shape the capture
/// envelope schema expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub origin: RectPoint,
    pub size: RectSize,
}

/// Pixel-space bounds derived from a normalized rect and a frame size
///
/// Signed so that degenerate or out-of-frame rects survive long enough to be
/// rejected with a useful error instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub start_row: i64,
    pub end_row: i64,
    pub start_col: i64,
    pub end_col: i64,
}

impl PixelBounds {
    /// Number of rows covered, may be zero or negative for degenerate rects
    pub fn rows(&self) -> i64 {
        self.end_row - self.start_row
    }

    /// Number of columns covered, may be zero or negative for degenerate rects
    pub fn cols(&self) -> i64 {
        self.end_col - self.start_col
    }

    /// Whether the bounds lie fully inside a `width` x `height` frame
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.start_row >= 0
            && self.start_col >= 0
            && self.end_row <= height as i64
            && self.end_col <= width as i64
    }
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: RectPoint { x, y },
            size: RectSize { width, height },
        }
    }

    /// Convert to pixel bounds on a `width` x `height` frame
    ///
    /// Rows and columns are floored independently:
    /// `start_row = floor(y * height)`, `end_row = floor((y + h) * height)`,
    /// and analogously for columns.
    pub fn pixel_bounds(&self, width: usize, height: usize) -> PixelBounds {
        PixelBounds {
            start_row: (self.origin.y * height as f64).floor() as i64,
            end_row: ((self.origin.y + self.size.height) * height as f64).floor() as i64,
            start_col: (self.origin.x * width as f64).floor() as i64,
            end_col: ((self.origin.x + self.size.width) * width as f64).floor() as i64,
        }
    }
}
