//! Depth frame conversion
//!
//! Turns a raw per-pixel disparity buffer into a cropped metric depth grid.
//! Pure and stateless; independent frames can be converted concurrently.

use crate::models::{CropRect, DepthGrid};

use super::GeometryError;

/// Convert a disparity buffer to a cropped depth grid
///
/// `disparity` is a row-major `width` x `height` buffer of inverse depths.
/// Output cell = `1.0 / disparity[row * width + col]` over the pixel bounds
/// derived from `rect`. A zero disparity yields a non-finite depth which is
/// propagated untouched; consumers filter non-finite values explicitly.
pub fn convert(
    disparity: &[f32],
    width: usize,
    height: usize,
    rect: &CropRect,
) -> Result<DepthGrid, GeometryError> {
    if disparity.len() != width * height {
        return Err(GeometryError::ShapeMismatch {
            len: disparity.len(),
            width,
            height,
        });
    }

    let bounds = rect.pixel_bounds(width, height);
    if bounds.rows() <= 0 || bounds.cols() <= 0 {
        return Err(GeometryError::InvalidRegion {
            rows: bounds.rows(),
            cols: bounds.cols(),
        });
    }
    if !bounds.fits(width, height) {
        return Err(GeometryError::CropOutOfBounds {
            start_row: bounds.start_row,
            end_row: bounds.end_row,
            start_col: bounds.start_col,
            end_col: bounds.end_col,
        });
    }

    let mut rows = Vec::with_capacity(bounds.rows() as usize);
    for row in bounds.start_row..bounds.end_row {
        let mut line = Vec::with_capacity(bounds.cols() as usize);
        for col in bounds.start_col..bounds.end_col {
            let value = disparity[row as usize * width + col as usize];
            line.push(1.0 / value);
        }
        rows.push(line);
    }
    Ok(DepthGrid::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_disparity_center_crop() {
        // Quarter-inset rect on a 100x100 frame of disparity 0.5:
        // a 50x50 grid where every depth is 2.0.
        let disparity = vec![0.5f32; 100 * 100];
        let rect = CropRect::new(0.25, 0.25, 0.5, 0.5);
        let grid = convert(&disparity, 100, 100, &rect).unwrap();
        assert_eq!(grid.rows(), 50);
        assert_eq!(grid.cols(), 50);
        assert!(grid
            .values()
            .iter()
            .all(|row| row.iter().all(|&d| d == 2.0)));
    }

    #[test]
    fn test_output_dimensions_match_bounds_formula() {
        let disparity = vec![1.0f32; 64 * 48];
        let rect = CropRect::new(0.1, 0.2, 0.45, 0.6);
        let bounds = rect.pixel_bounds(64, 48);
        let grid = convert(&disparity, 64, 48, &rect).unwrap();
        assert_eq!(grid.rows() as i64, bounds.rows());
        assert_eq!(grid.cols() as i64, bounds.cols());
    }

    #[test]
    fn test_zero_disparity_propagates_non_finite() {
        let mut disparity = vec![0.5f32; 4 * 4];
        disparity[2 * 4 + 2] = 0.0;
        let rect = CropRect::new(0.0, 0.0, 1.0, 1.0);
        let grid = convert(&disparity, 4, 4, &rect).unwrap();
        assert!(grid.get(2, 2).unwrap().is_infinite());
        assert_eq!(grid.get(0, 0), Some(2.0));
    }

    #[test]
    fn test_empty_region_rejected() {
        let disparity = vec![0.5f32; 10 * 10];
        let rect = CropRect::new(0.5, 0.5, 0.0, 0.5);
        let err = convert(&disparity, 10, 10, &rect).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidRegion { .. }));
    }

    #[test]
    fn test_out_of_frame_region_rejected() {
        let disparity = vec![0.5f32; 10 * 10];
        let rect = CropRect::new(0.5, 0.5, 0.8, 0.8);
        let err = convert(&disparity, 10, 10, &rect).unwrap_err();
        assert!(matches!(err, GeometryError::CropOutOfBounds { .. }));
    }

    #[test]
    fn test_buffer_length_mismatch_rejected() {
        let disparity = vec![0.5f32; 99];
        let rect = CropRect::new(0.0, 0.0, 1.0, 1.0);
        let err = convert(&disparity, 10, 10, &rect).unwrap_err();
        assert_eq!(
            err,
            GeometryError::ShapeMismatch {
                len: 99,
                width: 10,
                height: 10
            }
        );
    }
}
